use rusqlite::{Connection, params};
use tracing::info;

use pullboard_types::models::User;

use crate::Database;
use crate::error::Result;
use crate::models::UserRow;

impl Database {
    // -- Users --

    /// Store a new user. Names are not unique; registering an existing name
    /// creates a second account.
    pub fn create_user(
        &self,
        uid: &str,
        name: &str,
        password_hash: &str,
        icon: Option<&str>,
    ) -> Result<()> {
        self.with_tx(|conn| {
            conn.execute(
                "INSERT INTO users (uid, name, password, icon) VALUES (?1, ?2, ?3, ?4)",
                params![uid, name, password_hash, icon],
            )?;
            Ok(())
        })?;

        info!(uid, name, "User created");
        Ok(())
    }

    /// Every account registered under `name`, oldest first.
    pub fn get_users_by_name(&self, name: &str) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT uid, name, password, icon FROM users WHERE name = ?1 ORDER BY rowid",
            )?;

            let rows = stmt
                .query_map([name], |row| {
                    Ok(UserRow {
                        uid: row.get(0)?,
                        name: row.get(1)?,
                        password: row.get(2)?,
                        icon: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(query_users)
    }

    pub fn user_names(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name FROM users ORDER BY rowid")?;
            let names = stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;
            Ok(names)
        })
    }
}

pub(crate) fn query_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT uid, name, icon FROM users ORDER BY rowid")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(User {
                uid: row.get(0)?,
                name: row.get(1)?,
                icon: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_accepted() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "h1", Some("cat.png")).unwrap();
        db.create_user("u2", "alice", "h2", None).unwrap();

        let rows = db.get_users_by_name("alice").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].uid, "u1");
        assert_eq!(rows[0].icon.as_deref(), Some("cat.png"));
        assert_eq!(rows[1].password, "h2");
        assert_eq!(db.user_names().unwrap(), vec!["alice", "alice"]);
    }

    #[test]
    fn duplicate_uid_is_a_store_error() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "alice", "h", None).unwrap();
        assert!(db.create_user("u1", "bob", "h", None).is_err());
    }

    #[test]
    fn listing_keeps_registration_order() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("zz", "zed", "h", None).unwrap();
        db.create_user("aa", "amy", "h", None).unwrap();

        let users = db.list_users().unwrap();
        assert_eq!(users.iter().map(|u| u.uid.as_str()).collect::<Vec<_>>(), ["zz", "aa"]);
    }
}
