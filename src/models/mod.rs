mod achievements;
mod badges;
mod milestones;
mod profile;
mod progress;
mod sessions;
mod settings;

pub use achievements::{AchievementsRecord, PersonalRecords};
pub use badges::{BadgesRecord, EarnedBadge, LockedBadge};
pub use milestones::{CompletedMilestone, MilestoneDescriptor, MilestonesRecord};
pub use profile::{Profile, ProfileUpdate};
pub use progress::{level_for_xp, Progress, PERFECT_FORM_SCORE, XP_PER_LEVEL};
pub use sessions::{
    ExerciseKind, ExerciseStats, SessionInput, SessionRecord, SessionsRecord, HISTORY_CAP,
    RECENT_ANALYSIS_CAP,
};
pub use settings::{
    CameraFacing, CameraSettings, CameraSettingsUpdate, Difficulty, MotionAnalysisSettings,
    MotionAnalysisSettingsUpdate, NotificationSettings, NotificationSettingsUpdate,
    PreferenceSettings, PreferenceSettingsUpdate, PrivacySettings, PrivacySettingsUpdate,
    ProfileVisibility, SettingsUpdate, Units, UserSettings,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog;

/// The combined in-memory state of all seven user-data records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub profile: Profile,
    pub progress: Progress,
    pub badges: BadgesRecord,
    pub milestones: MilestonesRecord,
    pub sessions: SessionsRecord,
    pub settings: UserSettings,
    pub achievements: AchievementsRecord,
}

impl UserData {
    /// First-run aggregate: a new identity, zeroed counters, and the badge
    /// and milestone catalogs in their starting positions.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            profile: Profile::fresh(now),
            progress: Progress::default(),
            badges: catalog::starting_badges(),
            milestones: catalog::starting_milestones(),
            sessions: SessionsRecord::default(),
            settings: UserSettings::default(),
            achievements: AchievementsRecord::default(),
        }
    }
}
