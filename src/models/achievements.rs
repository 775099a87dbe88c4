use serde::{Deserialize, Serialize};

/// Personal-record high-water-marks. Only ever move up outside a full reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecords {
    pub best_motion_score: f64,
    pub longest_streak: u32,
    pub longest_session_secs: u64,
}

/// Aggregate counters. `total_badges_earned` always equals the number of
/// earned badges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementsRecord {
    pub total_badges_earned: u32,
    pub total_milestones_completed: u32,
    pub personal_records: PersonalRecords,
}
