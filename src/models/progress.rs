use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Each full 1000 XP advances one level.
pub const XP_PER_LEVEL: u64 = 1000;

/// Motion score at or above which a session counts as a perfect form.
pub const PERFECT_FORM_SCORE: f64 = 90.0;

/// Cumulative fitness counters. `level` is always recomputed from `xp`
/// after a mutation; `longest_streak` never drops below `streak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub level: u32,
    pub xp: u64,
    pub total_sessions: u32,
    pub perfect_forms: u32,
    pub streak: u32,
    pub longest_streak: u32,
    /// Calendar day of the most recent session, device-local.
    pub last_session_date: Option<NaiveDate>,
    pub total_workout_secs: u64,
    /// Mean motion score over the 20 most recent sessions, not all time.
    pub average_motion_score: f64,
    pub best_motion_score: f64,
    pub exercises_analyzed: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_sessions: 0,
            perfect_forms: 0,
            streak: 0,
            longest_streak: 0,
            last_session_date: None,
            total_workout_secs: 0,
            average_motion_score: 0.0,
            best_motion_score: 0.0,
            exercises_analyzed: 0,
        }
    }
}

pub fn level_for_xp(xp: u64) -> u32 {
    let level = xp / XP_PER_LEVEL + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}
