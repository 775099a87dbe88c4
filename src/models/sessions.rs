use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bounded most-recent-first session log.
pub const HISTORY_CAP: usize = 100;

/// Shorter prefix of the same log, kept for quick-glance UI.
pub const RECENT_ANALYSIS_CAP: usize = 10;

/// The exercise kinds with per-exercise stat tracking. Sessions for any
/// other movement still land in `history` but skip the stats map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Squat,
    Pushup,
    Lunge,
    Plank,
    Deadlift,
}

impl ExerciseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::Lunge => "lunge",
            ExerciseKind::Plank => "plank",
            ExerciseKind::Deadlift => "deadlift",
        }
    }

    /// Accepts the singular and plural spellings the UI layers send.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "squat" | "squats" => Some(ExerciseKind::Squat),
            "pushup" | "pushups" | "push-up" | "push-ups" => Some(ExerciseKind::Pushup),
            "lunge" | "lunges" => Some(ExerciseKind::Lunge),
            "plank" | "planks" => Some(ExerciseKind::Plank),
            "deadlift" | "deadlifts" => Some(ExerciseKind::Deadlift),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub exercise_type: String,
    pub motion_score: f64,
    pub duration_secs: u64,
    pub feedback: Vec<String>,
    pub improvements: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseStats {
    pub count: u32,
    pub average_score: f64,
    pub best_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsRecord {
    pub history: Vec<SessionRecord>,
    pub recent_analysis: Vec<SessionRecord>,
    pub exercise_stats: BTreeMap<ExerciseKind, ExerciseStats>,
}

/// Input for recording a session. `recorded_at` defaults to now; an explicit
/// timestamp lets hosts backfill sessions analyzed offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub exercise_type: String,
    pub motion_score: f64,
    pub duration_secs: u64,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}
