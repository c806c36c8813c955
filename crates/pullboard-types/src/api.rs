use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ScheduleKind, ScoreReport};

// -- Catalog --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub primary: usize,
    pub secondary: usize,
    pub total: usize,
    /// Items in the catalog afterwards. Lower than `total` when the sources
    /// repeat an id.
    pub stored: usize,
}

// -- Scores --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignScoresRequest {
    pub score: i64,
    pub item_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignScoresResponse {
    /// Report after the assignment.
    pub report: ScoreReport,
    /// Previous holders that dropped back to the baseline.
    pub evicted: Vec<String>,
    /// Requested ids with no ledger entry; nothing was stored for them.
    pub unknown: Vec<String>,
}

// -- Pulls --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordPullsRequest {
    pub item_ids: Vec<String>,
    /// Falls back to the scoring date, then to today.
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPullsResponse {
    pub uid: String,
    pub date: NaiveDate,
    pub count: usize,
}

// -- Schedule --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateScheduleRequest {
    pub kind: ScheduleKind,
    pub date: String,
}

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    pub icon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub uid: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub uid: String,
    pub name: String,
}
