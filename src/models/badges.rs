use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedBadge {
    pub id: String,
    pub title: String,
    pub requirement: String,
    pub icon: String,
    pub category: String,
}

/// Badge state. A badge id is never in both `earned` and `locked`; `earned`
/// only grows outside a full reset and preserves unlock order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgesRecord {
    pub earned: Vec<EarnedBadge>,
    pub locked: Vec<LockedBadge>,
    /// Display-only completion percentages, refreshed when sessions land.
    pub progress: BTreeMap<String, f64>,
    pub last_earned: Option<EarnedBadge>,
}

impl BadgesRecord {
    pub fn is_earned(&self, badge_id: &str) -> bool {
        self.earned.iter().any(|badge| badge.id == badge_id)
    }
}
