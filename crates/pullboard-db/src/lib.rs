pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod migrations;
pub mod models;
pub mod pulls;
pub mod schedule;
pub mod scores;
pub mod users;

pub use catalog::RefreshStats;
pub use error::{Result, StoreError};
pub use scores::AssignOutcome;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Handle to the backing store. One connection, one writer at a time; every
/// write runs inside a single transaction so readers never see a half-applied
/// delete-then-insert.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Run `f` in one transaction. Commits on `Ok`, rolls back on `Err`.
    pub fn with_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let out = f(&*tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Delete every row of every table. Development and test use only.
    pub fn wipe_all(&self) -> Result<()> {
        self.with_tx(|conn| {
            conn.execute_batch(
                "
                DELETE FROM items;
                DELETE FROM item_attributes;
                DELETE FROM scores;
                DELETE FROM users;
                DELETE FROM pulls;
                DELETE FROM schedule;
                ",
            )?;
            Ok(())
        })?;

        info!("All data wiped");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use pullboard_types::models::{AttrCode, Item};

    pub fn item(id: &str, category: i64) -> Item {
        Item {
            id: id.to_string(),
            image_url: format!("https://img.example.jp/item/{id}.jpg"),
            display_name: Some(format!("Item {id}")),
            category,
            attributes: [(AttrCode::Get, 1)].into_iter().collect(),
        }
    }

    pub fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, item};
    use chrono::NaiveDate;
    use pullboard_types::models::{Schedule, ScheduleKind};

    #[test]
    fn migrations_are_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| migrations::run(conn)).unwrap();

        let version: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        db.refresh_catalog(&[item("a", 0)]).unwrap();

        let result: Result<()> = db.with_tx(|conn| {
            conn.execute("DELETE FROM items", [])?;
            conn.execute("INSERT INTO no_such_table VALUES (1)", [])?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(db.item_count().unwrap(), 1);
    }

    #[test]
    fn wipe_clears_every_table() {
        let db = Database::open_in_memory().unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        db.refresh_catalog(&[item("a", 0)]).unwrap();
        db.assign_score(&ids(&["a"]), 7).unwrap();
        db.create_user("u1", "alice", "hash", None).unwrap();
        db.record_pulls("u1", &ids(&["a"]), day).unwrap();
        db.set_schedule_date(ScheduleKind::Scoring, day).unwrap();

        db.wipe_all().unwrap();

        assert_eq!(db.item_count().unwrap(), 0);
        assert!(db.score_ledger().unwrap().is_empty());
        assert!(db.list_users().unwrap().is_empty());
        assert!(db.all_pulls().unwrap().is_empty());
        assert_eq!(db.schedule().unwrap(), Schedule::default());
    }
}
