use chrono::NaiveDate;
use rusqlite::{OptionalExtension, params};
use tracing::info;

use pullboard_types::models::{Schedule, ScheduleKind};

use crate::Database;
use crate::error::Result;

impl Database {
    pub fn schedule(&self) -> Result<Schedule> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT date FROM schedule WHERE id = ?1")?;
            let mut date_of = |kind: ScheduleKind| -> Result<Option<NaiveDate>> {
                Ok(stmt.query_row([kind.slot()], |row| row.get(0)).optional()?)
            };

            Ok(Schedule {
                scoring: date_of(ScheduleKind::Scoring)?,
                opening: date_of(ScheduleKind::Opening)?,
            })
        })
    }

    pub fn set_schedule_date(&self, kind: ScheduleKind, date: NaiveDate) -> Result<()> {
        self.with_tx(|conn| {
            conn.execute(
                "INSERT INTO schedule (id, date) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET date = excluded.date",
                params![kind.slot(), date],
            )?;
            Ok(())
        })?;

        info!(?kind, %date, "Schedule updated");
        Ok(())
    }
}
