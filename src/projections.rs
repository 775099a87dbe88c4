//! Pure read-side projections over store snapshots. Nothing here caches or
//! persists; every call recomputes from the records it is handed.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{
    catalog,
    models::{Progress, SessionsRecord, PERFECT_FORM_SCORE},
};

/// Cumulative XP required to finish each level on the display curve. Index 0
/// is the floor of level 1. This curve is intentionally steeper than the
/// flat 1000-XP-per-level rule the store levels up with; the two are kept
/// separate on purpose and this one only drives progress bars.
pub const LEVEL_XP_THRESHOLDS: [u64; 14] = [
    0, 1000, 2500, 4500, 7000, 10_000, 14_000, 19_000, 25_000, 32_000, 50_000, 92_000, 150_000,
    300_000,
];

/// Levels at or past this display as a full bar.
pub const DISPLAY_LEVEL_CAP: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub current_level: u32,
    pub current_xp: u64,
    pub xp_floor: u64,
    pub xp_ceiling: u64,
    pub progress_xp: u64,
    pub required_xp: u64,
    pub percentage: f64,
}

/// Cumulative XP at which `level` is complete, saturating at the top of the
/// table.
pub fn xp_for_level(level: u32) -> u64 {
    let index = (level as usize).min(LEVEL_XP_THRESHOLDS.len() - 1);
    LEVEL_XP_THRESHOLDS[index]
}

pub fn level_progress(progress: &Progress) -> LevelProgress {
    let level = progress.level;
    let xp_floor = xp_for_level(level.saturating_sub(1));
    let xp_ceiling = xp_for_level(level);
    let required_xp = xp_ceiling.saturating_sub(xp_floor);
    let progress_xp = progress.xp.saturating_sub(xp_floor);

    let percentage = if level >= DISPLAY_LEVEL_CAP || required_xp == 0 {
        100.0
    } else {
        (progress_xp as f64 / required_xp as f64 * 100.0).clamp(0.0, 100.0)
    };

    LevelProgress {
        current_level: level,
        current_xp: progress.xp,
        xp_floor,
        xp_ceiling,
        progress_xp,
        required_xp,
        percentage,
    }
}

/// Percentage toward every catalog badge, from the same rules the unlock
/// check evaluates.
pub fn badge_progress(progress: &Progress) -> BTreeMap<String, f64> {
    catalog::BADGES
        .iter()
        .map(|def| (def.id.to_string(), def.rule.percent(progress)))
        .collect()
}

/// Percentage toward every catalog milestone.
pub fn milestone_progress(progress: &Progress) -> BTreeMap<String, f64> {
    catalog::MILESTONES
        .iter()
        .map(|def| (def.id.to_string(), def.rule.percent(progress)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub sessions: u32,
    pub average_score: f64,
    pub perfect_forms: u32,
    pub total_duration_secs: u64,
    pub exercises: Vec<String>,
}

/// Per-calendar-day rollup of the bounded session history, most recent day
/// first. Days are device-local, matching the streak bookkeeping.
pub fn daily_summary(sessions: &SessionsRecord) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for record in &sessions.history {
        let date = record.recorded_at.with_timezone(&Local).date_naive();
        let entry = days.entry(date).or_insert_with(|| DailySummary {
            date,
            sessions: 0,
            average_score: 0.0,
            perfect_forms: 0,
            total_duration_secs: 0,
            exercises: Vec::new(),
        });

        entry.sessions += 1;
        entry.average_score = (entry.average_score * f64::from(entry.sessions - 1)
            + record.motion_score)
            / f64::from(entry.sessions);
        if record.motion_score >= PERFECT_FORM_SCORE {
            entry.perfect_forms += 1;
        }
        entry.total_duration_secs += record.duration_secs;
        if !entry.exercises.contains(&record.exercise_type) {
            entry.exercises.push(record.exercise_type.clone());
        }
    }

    days.into_values().rev().collect()
}

/// XP award for one analyzed session: a flat base plus bonuses for score
/// and duration (2 XP per minute, capped at 30 minutes). Hosts pair this
/// with `add_xp` after recording.
pub fn session_xp_reward(motion_score: f64, duration_secs: u64) -> u64 {
    let mut xp: u64 = 50;
    xp += if motion_score >= 95.0 {
        50
    } else if motion_score >= 90.0 {
        30
    } else if motion_score >= 80.0 {
        20
    } else if motion_score >= 70.0 {
        10
    } else {
        0
    };
    xp += duration_secs.min(30 * 60) / 30;
    xp
}
