use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Score held by an item nobody has ranked yet.
pub const BASELINE_SCORE: i64 = 0;

/// Scores excluded from the ranking report: the baseline plus the two
/// category fallback ranks.
pub const RESERVED_SCORES: [i64; 3] = [BASELINE_SCORE, 1, 3];

/// Category stamped on items from the primary source table.
pub const CATEGORY_PRIMARY: i64 = 0;
/// Category stamped on items from the secondary source table.
pub const CATEGORY_SECONDARY: i64 = 1;

/// Classifier codes the upstream site encodes as CSS class prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrCode {
    Zo,
    Bu,
    Ca,
    Sk,
    Sw,
    Get,
}

impl AttrCode {
    pub const ALL: [AttrCode; 6] = [
        AttrCode::Zo,
        AttrCode::Bu,
        AttrCode::Ca,
        AttrCode::Sk,
        AttrCode::Sw,
        AttrCode::Get,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttrCode::Zo => "zo",
            AttrCode::Bu => "bu",
            AttrCode::Ca => "ca",
            AttrCode::Sk => "sk",
            AttrCode::Sw => "sw",
            AttrCode::Get => "get",
        }
    }
}

impl fmt::Display for AttrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute code '{0}'")]
pub struct UnknownAttrCode(pub String);

impl FromStr for AttrCode {
    type Err = UnknownAttrCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttrCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownAttrCode(s.to_string()))
    }
}

/// Attribute map of an item. A missing key is not the same as zero.
pub type Attributes = BTreeMap<AttrCode, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub image_url: String,
    pub display_name: Option<String>,
    pub category: i64,
    #[serde(default)]
    pub attributes: Attributes,
}

/// One row of the score ledger. `None` is a legacy "unset" value and is
/// treated exactly like the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAssignment {
    pub item_id: String,
    pub score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRecord {
    pub uid: String,
    pub item_id: String,
    pub date: NaiveDate,
}

/// Public view of a user. The password hash never leaves the store crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTotal {
    pub name: String,
    pub uid: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDailyTotal {
    pub name: String,
    pub uid: String,
    pub date: NaiveDate,
    pub total: i64,
}

/// Score value -> ids of the items currently holding it.
pub type ScoreReport = BTreeMap<i64, Vec<String>>;

/// Calendar date -> ids pulled that day.
pub type PullsByDate = BTreeMap<NaiveDate, Vec<String>>;

/// The two dates an operator pins for the running event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    /// Day pull submissions are currently scored for.
    Scoring,
    /// Day the event opened.
    Opening,
}

impl ScheduleKind {
    /// Row id in the schedule table.
    pub fn slot(self) -> i64 {
        match self {
            ScheduleKind::Scoring => 1,
            ScheduleKind::Opening => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub scoring: Option<NaiveDate>,
    pub opening: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_codes_parse_from_their_names() {
        for code in AttrCode::ALL {
            assert_eq!(code.as_str().parse::<AttrCode>().unwrap(), code);
        }
        assert!("zz".parse::<AttrCode>().is_err());
    }

    #[test]
    fn attributes_serialize_with_lowercase_keys() {
        let mut attrs = Attributes::new();
        attrs.insert(AttrCode::Get, 2);
        attrs.insert(AttrCode::Zo, 5);

        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json, serde_json::json!({ "zo": 5, "get": 2 }));
    }
}
