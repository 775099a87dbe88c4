use serde::Serialize;

use crate::models::{CompletedMilestone, EarnedBadge, SessionRecord, UserData};

/// What changed. Serialized with a `type` tag matching the event names the
/// UI layer switches on.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventKind {
    #[serde(rename_all = "camelCase")]
    XpAdded {
        amount: u64,
        source: String,
        old_level: u32,
        new_level: u32,
        total_xp: u64,
    },
    #[serde(rename_all = "camelCase")]
    LevelUp {
        amount: u64,
        source: String,
        old_level: u32,
        new_level: u32,
        total_xp: u64,
    },
    SessionAdded { session: SessionRecord },
    BadgeUnlocked { badge: EarnedBadge },
    MilestoneCompleted { milestone: CompletedMilestone },
    ProfileUpdated,
    SettingsUpdated,
    DataImported,
    /// Full-aggregate invalidation; no granular change information.
    DataReset,
}

/// One notification: the change descriptor plus a snapshot of the whole
/// aggregate taken after the mutation settled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEvent {
    #[serde(flatten)]
    pub kind: EventKind,
    pub data: UserData,
}
