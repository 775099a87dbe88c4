use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedMilestone {
    pub id: String,
    pub title: String,
    pub xp_reward: u64,
    pub completed_at: DateTime<Utc>,
}

/// A milestone moves from `in_progress` to `completed` exactly once and
/// grants its XP reward exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonesRecord {
    pub completed: Vec<CompletedMilestone>,
    pub in_progress: Vec<MilestoneDescriptor>,
    pub total_xp_earned: u64,
}
