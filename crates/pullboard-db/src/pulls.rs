use chrono::NaiveDate;
use rusqlite::{Connection, params};
use tracing::info;

use pullboard_types::dates::parse_calendar_date;
use pullboard_types::models::{PullRecord, PullsByDate};

use crate::Database;
use crate::error::Result;

impl Database {
    /// Set the pulls of `uid` on `date` to exactly `item_ids`, replacing
    /// whatever was recorded for that day before.
    pub fn record_pulls(&self, uid: &str, item_ids: &[String], date: NaiveDate) -> Result<usize> {
        let replaced = self.with_tx(|conn| {
            let replaced = conn.execute(
                "DELETE FROM pulls WHERE uid = ?1 AND date = ?2",
                params![uid, date],
            )?;

            let mut insert =
                conn.prepare("INSERT INTO pulls (uid, item_id, date) VALUES (?1, ?2, ?3)")?;
            for item_id in item_ids {
                insert.execute(params![uid, item_id, date])?;
            }

            Ok(replaced)
        })?;

        info!(uid, %date, pulls = item_ids.len(), replaced, "Pulls recorded");
        Ok(item_ids.len())
    }

    /// Like [`Database::record_pulls`], normalising a date or timestamp
    /// string to its calendar day first.
    pub fn record_pulls_on(&self, uid: &str, item_ids: &[String], date: &str) -> Result<NaiveDate> {
        let day = parse_calendar_date(date)?;
        self.record_pulls(uid, item_ids, day)?;
        Ok(day)
    }

    /// Pulls of one user grouped by day, oldest day first.
    pub fn pulls_by_date(&self, uid: &str) -> Result<PullsByDate> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT date, item_id FROM pulls WHERE uid = ?1 ORDER BY date, rowid",
            )?;

            let mut grouped = PullsByDate::new();
            let rows = stmt.query_map([uid], |row| {
                Ok((row.get::<_, NaiveDate>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (date, item_id) = row?;
                grouped.entry(date).or_default().push(item_id);
            }

            Ok(grouped)
        })
    }

    #[cfg(test)]
    pub(crate) fn all_pulls(&self) -> Result<Vec<PullRecord>> {
        self.with_conn(query_pulls)
    }
}

pub(crate) fn query_pulls(conn: &Connection) -> Result<Vec<PullRecord>> {
    let mut stmt = conn.prepare("SELECT uid, item_id, date FROM pulls ORDER BY date, rowid")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PullRecord {
                uid: row.get(0)?,
                item_id: row.get(1)?,
                date: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
