//! Per-user score rollups.
//!
//! Everything is computed as an in-memory fold over one consistent snapshot
//! of users, pulls, the ledger and item categories. The daily series is
//! dense: every user gets a row for every day between the first recorded
//! pull (across all users) and `today`, with zero on days without pulls.

use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::Connection;

use pullboard_types::dates::{self, days_inclusive};
use pullboard_types::models::{
    CATEGORY_PRIMARY, CATEGORY_SECONDARY, PullRecord, User, UserDailyTotal, UserTotal,
};

use crate::Database;
use crate::error::Result;
use crate::pulls::query_pulls;
use crate::scores::query_ledger;
use crate::users::query_users;

/// What an unscored item is worth, by category. Items with no known
/// category are worth nothing.
pub fn fallback_score(category: Option<i64>) -> i64 {
    match category {
        Some(CATEGORY_SECONDARY) => 1,
        Some(CATEGORY_PRIMARY) => 3,
        _ => 0,
    }
}

/// Assigned score if positive, otherwise the category fallback.
pub fn effective_score(score: Option<i64>, category: Option<i64>) -> i64 {
    match score {
        Some(score) if score > 0 => score,
        _ => fallback_score(category),
    }
}

/// Ledger scores and catalog categories keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    scores: HashMap<String, Option<i64>>,
    categories: HashMap<String, i64>,
}

impl ScoreTable {
    pub fn new(
        scores: impl IntoIterator<Item = (String, Option<i64>)>,
        categories: impl IntoIterator<Item = (String, i64)>,
    ) -> Self {
        Self {
            scores: scores.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }

    pub fn value_of(&self, item_id: &str) -> i64 {
        effective_score(
            self.scores.get(item_id).copied().flatten(),
            self.categories.get(item_id).copied(),
        )
    }
}

/// Lifetime total of every user, in user order. Pulls by unknown uids are ignored.
pub fn fold_totals(users: &[User], pulls: &[PullRecord], table: &ScoreTable) -> Vec<UserTotal> {
    let mut sums: HashMap<&str, i64> = HashMap::new();
    for pull in pulls {
        *sums.entry(pull.uid.as_str()).or_default() += table.value_of(&pull.item_id);
    }

    users
        .iter()
        .map(|user| UserTotal {
            name: user.name.clone(),
            uid: user.uid.clone(),
            total: sums.get(user.uid.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// Gap-filled daily totals, grouped by user then ascending date.
///
/// The date axis starts at the earliest pull of anyone (or `today` when
/// there are none) and ends at `today`. Pulls dated after `today` fall
/// outside the axis and are not reported.
pub fn fold_daily(
    users: &[User],
    pulls: &[PullRecord],
    table: &ScoreTable,
    today: NaiveDate,
) -> Vec<UserDailyTotal> {
    let start = pulls.iter().map(|p| p.date).min().unwrap_or(today);

    let mut sums: HashMap<(&str, NaiveDate), i64> = HashMap::new();
    for pull in pulls {
        *sums.entry((pull.uid.as_str(), pull.date)).or_default() += table.value_of(&pull.item_id);
    }

    let mut series = Vec::new();
    for user in users {
        for date in days_inclusive(start, today) {
            series.push(UserDailyTotal {
                name: user.name.clone(),
                uid: user.uid.clone(),
                date,
                total: sums.get(&(user.uid.as_str(), date)).copied().unwrap_or(0),
            });
        }
    }
    series
}

struct Snapshot {
    users: Vec<User>,
    pulls: Vec<PullRecord>,
    table: ScoreTable,
}

fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    let ledger = query_ledger(conn)?;

    let mut stmt = conn.prepare("SELECT id, category FROM items")?;
    let categories = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Snapshot {
        users: query_users(conn)?,
        pulls: query_pulls(conn)?,
        table: ScoreTable::new(ledger.into_iter().map(|s| (s.item_id, s.score)), categories),
    })
}

impl Database {
    pub fn total_per_user(&self) -> Result<Vec<UserTotal>> {
        let snap = self.with_conn(load_snapshot)?;
        Ok(fold_totals(&snap.users, &snap.pulls, &snap.table))
    }

    pub fn daily_per_user(&self, today: NaiveDate) -> Result<Vec<UserDailyTotal>> {
        let snap = self.with_conn(load_snapshot)?;
        Ok(fold_daily(&snap.users, &snap.pulls, &snap.table, today))
    }

    /// [`Database::daily_per_user`] ending at the current UTC day.
    pub fn daily_per_user_until_now(&self) -> Result<Vec<UserDailyTotal>> {
        self.daily_per_user(dates::today())
    }
}
