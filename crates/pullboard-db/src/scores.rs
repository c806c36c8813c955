use std::collections::HashSet;

use rusqlite::{Connection, params, params_from_iter};
use tracing::{info, warn};

use pullboard_types::models::{BASELINE_SCORE, RESERVED_SCORES, ScoreAssignment, ScoreReport};

use crate::Database;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignOutcome {
    /// Previous holders of the score that were reset to the baseline.
    pub evicted: Vec<String>,
    /// Ids now holding the score.
    pub assigned: Vec<String>,
    /// Requested ids with no ledger row; left untouched.
    pub unknown: Vec<String>,
}

impl Database {
    /// Give `score` to exactly `item_ids`.
    ///
    /// Score values act as exclusive slots: whoever held `score` before and
    /// is not in `item_ids` drops back to the baseline.
    pub fn assign_score(&self, item_ids: &[String], score: i64) -> Result<AssignOutcome> {
        let mut seen = HashSet::new();
        let requested: Vec<&String> = item_ids.iter().filter(|id| seen.insert(*id)).collect();

        let outcome = self.with_tx(|conn| {
            let holders = query_holders(conn, score)?;
            conn.execute(
                "UPDATE scores SET score = ?1 WHERE score = ?2",
                params![BASELINE_SCORE, score],
            )?;

            let mut outcome = AssignOutcome {
                evicted: holders.into_iter().filter(|id| !seen.contains(id)).collect(),
                ..Default::default()
            };

            let mut update = conn.prepare("UPDATE scores SET score = ?1 WHERE item_id = ?2")?;
            for id in &requested {
                if update.execute(params![score, id])? == 0 {
                    outcome.unknown.push(id.to_string());
                } else {
                    outcome.assigned.push(id.to_string());
                }
            }

            Ok(outcome)
        })?;

        if !outcome.unknown.is_empty() {
            warn!(score, unknown = ?outcome.unknown, "Score requested for ids missing from the ledger");
        }
        info!(
            score,
            assigned = outcome.assigned.len(),
            evicted = outcome.evicted.len(),
            "Score assigned"
        );
        Ok(outcome)
    }

    /// Holders of every score outside the reserved baseline set.
    pub fn score_report(&self) -> Result<ScoreReport> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT score, item_id FROM scores
                 WHERE score IS NOT NULL AND score NOT IN (?1, ?2, ?3)
                 ORDER BY score, item_id",
            )?;

            let mut report = ScoreReport::new();
            let rows = stmt.query_map(params_from_iter(RESERVED_SCORES), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (score, item_id) = row?;
                report.entry(score).or_default().push(item_id);
            }

            Ok(report)
        })
    }

    /// Every ledger row, including ids no longer in the catalog.
    #[cfg(test)]
    pub(crate) fn score_ledger(&self) -> Result<Vec<ScoreAssignment>> {
        self.with_conn(query_ledger)
    }
}

fn query_holders(conn: &Connection, score: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT item_id FROM scores WHERE score = ?1 ORDER BY item_id")?;
    let rows = stmt
        .query_map([score], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(rows)
}

pub(crate) fn query_ledger(conn: &Connection) -> Result<Vec<ScoreAssignment>> {
    let mut stmt = conn.prepare("SELECT item_id, score FROM scores ORDER BY item_id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ScoreAssignment {
                item_id: row.get(0)?,
                score: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
