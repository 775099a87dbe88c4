mod error;
mod events;
mod observers;

pub use error::StoreError;
pub use events::{EventKind, StoreEvent};
pub use observers::ObserverHandle;

use std::sync::RwLock;

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OnceCell};
use uuid::Uuid;

use crate::{
    catalog,
    db::{Database, RecordKey},
    models::{
        level_for_xp, AchievementsRecord, BadgesRecord, CompletedMilestone, EarnedBadge,
        MilestonesRecord, Profile, ProfileUpdate, Progress, SessionInput, SessionRecord,
        SessionsRecord, SettingsUpdate, UserData, UserSettings, ExerciseKind, HISTORY_CAP,
        PERFECT_FORM_SCORE, RECENT_ANALYSIS_CAP,
    },
};

/// Export-format version stamped on every export and checked on import.
pub const EXPORT_VERSION: u32 = 1;

/// Number of most recent sessions feeding `average_motion_score`.
const ROLLING_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Lifecycle {
    Uninitialized,
    Initializing,
    Ready,
}

/// Envelope for data export/import. `version` must match for an import to
/// be accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataExport {
    pub version: u32,
    pub export_date: DateTime<Utc>,
    pub user_data: UserData,
}

/// Owns the seven-record user-data aggregate: loads it, mutates it on
/// behalf of callers, persists the affected records, and fans events out to
/// observers. Construct one per process and share the handle.
///
/// Every mutating operation runs under one aggregate-wide lock, held across
/// its persistence writes, so in-flight mutations never interleave.
pub struct UserDataStore {
    db: Database,
    data: Mutex<UserData>,
    lifecycle: RwLock<Lifecycle>,
    init_gate: OnceCell<()>,
    observers: observers::SharedObservers,
}

impl UserDataStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            // Placeholder until initialize() swaps the loaded aggregate in;
            // unreachable through the public API while Uninitialized.
            data: Mutex::new(UserData::fresh(Utc::now())),
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
            init_gate: OnceCell::new(),
            observers: observers::SharedObservers::default(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.read().unwrap()
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle() == Lifecycle::Ready
    }

    /// Loads all seven records (concurrently) or synthesizes defaults when
    /// no profile exists yet. Load failures are logged and replaced with
    /// defaults; the store always ends up Ready. Concurrent callers share
    /// one in-flight initialization.
    pub async fn initialize(&self) -> UserData {
        self.init_gate
            .get_or_init(|| async {
                *self.lifecycle.write().unwrap() = Lifecycle::Initializing;
                let loaded = self.load_or_default().await;
                *self.data.lock().await = loaded;
                *self.lifecycle.write().unwrap() = Lifecycle::Ready;
                info!("user data store ready");
            })
            .await;

        self.data.lock().await.clone()
    }

    async fn load_or_default(&self) -> UserData {
        let now = Utc::now();
        let (profile, progress, badges, milestones, sessions, settings, achievements) = tokio::join!(
            self.db.load::<Profile>(RecordKey::Profile),
            self.db.load::<Progress>(RecordKey::Progress),
            self.db.load::<BadgesRecord>(RecordKey::Badges),
            self.db.load::<MilestonesRecord>(RecordKey::Milestones),
            self.db.load::<SessionsRecord>(RecordKey::Sessions),
            self.db.load::<UserSettings>(RecordKey::Settings),
            self.db.load::<AchievementsRecord>(RecordKey::Achievements),
        );

        let profile = match profile {
            Ok(profile) => profile,
            Err(err) => {
                warn!("failed to load the profile record: {err:#}");
                None
            }
        };

        // No profile means a first run or a wiped device. Whatever partial
        // data the other keys held is ignored; everything restarts from
        // defaults.
        let Some(profile) = profile else {
            info!("no stored profile, creating default user data");
            let fresh = UserData::fresh(now);
            if let Err(err) = self.persist_aggregate(&fresh).await {
                warn!("failed to persist default user data: {err}");
            }
            return fresh;
        };

        UserData {
            profile,
            progress: loaded_or(progress, RecordKey::Progress, Progress::default),
            badges: loaded_or(badges, RecordKey::Badges, catalog::starting_badges),
            milestones: loaded_or(milestones, RecordKey::Milestones, catalog::starting_milestones),
            sessions: loaded_or(sessions, RecordKey::Sessions, SessionsRecord::default),
            settings: loaded_or(settings, RecordKey::Settings, UserSettings::default),
            achievements: loaded_or(
                achievements,
                RecordKey::Achievements,
                AchievementsRecord::default,
            ),
        }
    }

    // === read accessors ===

    pub async fn snapshot(&self) -> Result<UserData, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.clone())
    }

    pub async fn profile(&self) -> Result<Profile, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.profile.clone())
    }

    pub async fn progress(&self) -> Result<Progress, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.progress.clone())
    }

    pub async fn badges(&self) -> Result<BadgesRecord, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.badges.clone())
    }

    pub async fn milestones(&self) -> Result<MilestonesRecord, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.milestones.clone())
    }

    pub async fn sessions(&self) -> Result<SessionsRecord, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.sessions.clone())
    }

    pub async fn settings(&self) -> Result<UserSettings, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.settings.clone())
    }

    pub async fn achievements(&self) -> Result<AchievementsRecord, StoreError> {
        self.ensure_ready()?;
        Ok(self.data.lock().await.achievements.clone())
    }

    /// Registers an observer. Events are delivered synchronously, in
    /// registration order, before the mutating call returns.
    pub fn subscribe<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    // === mutations ===

    /// Grants XP and recomputes the level. Emits `LevelUp` when the level
    /// moved, `XpAdded` otherwise.
    pub async fn add_xp(&self, amount: u64, source: &str) -> Result<Progress, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        let outcome = apply_xp(&mut guard.progress, amount);
        let progress = guard.progress.clone();
        self.persist(RecordKey::Progress, &progress).await?;

        let snapshot = (*guard).clone();
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: xp_event(&outcome, source),
            data: snapshot,
        });
        Ok(progress)
    }

    /// Records a completed analysis session: updates the bounded history
    /// views and per-exercise stats, advances the cumulative counters and
    /// streak, then runs the achievement check. Badges unlocked along the
    /// way emit their own events before the final `SessionAdded`.
    pub async fn record_session(&self, input: SessionInput) -> Result<SessionRecord, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        let recorded_at = input.recorded_at.unwrap_or_else(Utc::now);
        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            exercise_type: input.exercise_type,
            motion_score: input.motion_score,
            duration_secs: input.duration_secs,
            feedback: input.feedback,
            improvements: input.improvements,
            recorded_at,
        };

        let badges_before = guard.badges.clone();
        let achievements_before = guard.achievements.clone();
        let unlocked;
        {
            let data = &mut *guard;

            // Both views are prefixes of the same log, independently capped.
            data.sessions.history.insert(0, record.clone());
            data.sessions.history.truncate(HISTORY_CAP);
            data.sessions.recent_analysis.insert(0, record.clone());
            data.sessions.recent_analysis.truncate(RECENT_ANALYSIS_CAP);

            match ExerciseKind::parse(&record.exercise_type) {
                Some(kind) => {
                    let stats = data.sessions.exercise_stats.entry(kind).or_default();
                    stats.count += 1;
                    stats.average_score = (stats.average_score * f64::from(stats.count - 1)
                        + record.motion_score)
                        / f64::from(stats.count);
                    stats.best_score = stats.best_score.max(record.motion_score);
                }
                None => {
                    debug!(
                        "unknown exercise type '{}', skipping per-exercise stats",
                        record.exercise_type
                    );
                }
            }

            let progress = &mut data.progress;
            progress.total_sessions += 1;
            progress.exercises_analyzed += 1;
            progress.total_workout_secs += record.duration_secs;
            if record.motion_score >= PERFECT_FORM_SCORE {
                progress.perfect_forms += 1;
            }
            progress.average_motion_score = rolling_average(&data.sessions.history);
            progress.best_motion_score = progress.best_motion_score.max(record.motion_score);
            update_streak(progress, local_day(recorded_at));

            let records = &mut data.achievements.personal_records;
            records.best_motion_score = records.best_motion_score.max(record.motion_score);
            records.longest_streak = records.longest_streak.max(progress.longest_streak);
            records.longest_session_secs = records.longest_session_secs.max(record.duration_secs);

            unlocked = check_achievements(data, recorded_at);
        }

        let sessions = guard.sessions.clone();
        let progress = guard.progress.clone();
        tokio::try_join!(
            self.persist(RecordKey::Sessions, &sessions),
            self.persist(RecordKey::Progress, &progress),
        )?;
        if guard.badges != badges_before {
            let badges = guard.badges.clone();
            self.persist(RecordKey::Badges, &badges).await?;
        }
        if guard.achievements != achievements_before {
            let achievements = guard.achievements.clone();
            self.persist(RecordKey::Achievements, &achievements).await?;
        }

        let snapshot = (*guard).clone();
        drop(guard);

        for badge in unlocked {
            self.observers.notify(&StoreEvent {
                kind: EventKind::BadgeUnlocked { badge },
                data: snapshot.clone(),
            });
        }
        self.observers.notify(&StoreEvent {
            kind: EventKind::SessionAdded {
                session: record.clone(),
            },
            data: snapshot,
        });

        Ok(record)
    }

    /// Unlocks a catalog badge by id. Already-earned and out-of-catalog ids
    /// are a quiet `false`.
    pub async fn unlock_badge(&self, badge_id: &str) -> Result<bool, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        if guard.badges.is_earned(badge_id) {
            return Ok(false);
        }
        let Some(def) = catalog::badge(badge_id) else {
            debug!("ignoring unlock for unknown badge id '{badge_id}'");
            return Ok(false);
        };

        let badge = grant_badge(&mut guard, def, Utc::now());

        let badges = guard.badges.clone();
        let achievements = guard.achievements.clone();
        tokio::try_join!(
            self.persist(RecordKey::Badges, &badges),
            self.persist(RecordKey::Achievements, &achievements),
        )?;

        let snapshot = (*guard).clone();
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: EventKind::BadgeUnlocked { badge },
            data: snapshot,
        });
        Ok(true)
    }

    /// Completes a pending milestone, granting its XP reward through the
    /// same path as `add_xp` (whose event fires first, independently).
    /// Unknown or already-completed ids are a quiet `false`.
    pub async fn complete_milestone(&self, milestone_id: &str) -> Result<bool, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        let Some(position) = guard
            .milestones
            .in_progress
            .iter()
            .position(|milestone| milestone.id == milestone_id)
        else {
            debug!("ignoring completion for unknown or finished milestone '{milestone_id}'");
            return Ok(false);
        };

        let descriptor = guard.milestones.in_progress.remove(position);
        let completed = CompletedMilestone {
            id: descriptor.id,
            title: descriptor.title,
            xp_reward: descriptor.xp_reward,
            completed_at: Utc::now(),
        };
        guard.milestones.completed.push(completed.clone());
        guard.milestones.total_xp_earned += completed.xp_reward;
        guard.achievements.total_milestones_completed += 1;
        let outcome = apply_xp(&mut guard.progress, completed.xp_reward);

        let milestones = guard.milestones.clone();
        let achievements = guard.achievements.clone();
        let progress = guard.progress.clone();
        tokio::try_join!(
            self.persist(RecordKey::Milestones, &milestones),
            self.persist(RecordKey::Achievements, &achievements),
            self.persist(RecordKey::Progress, &progress),
        )?;

        let snapshot = (*guard).clone();
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: xp_event(&outcome, "milestone"),
            data: snapshot.clone(),
        });
        self.observers.notify(&StoreEvent {
            kind: EventKind::MilestoneCompleted {
                milestone: completed,
            },
            data: snapshot,
        });
        Ok(true)
    }

    /// Applies a whitelisted partial update and stamps `last_active`.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        update.apply(&mut guard.profile);
        guard.profile.last_active = Utc::now();

        let profile = guard.profile.clone();
        self.persist(RecordKey::Profile, &profile).await?;

        let snapshot = (*guard).clone();
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: EventKind::ProfileUpdated,
            data: snapshot,
        });
        Ok(profile)
    }

    /// Applies a whitelisted partial settings update.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<UserSettings, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        update.apply(&mut guard.settings);

        let settings = guard.settings.clone();
        self.persist(RecordKey::Settings, &settings).await?;

        let snapshot = (*guard).clone();
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: EventKind::SettingsUpdated,
            data: snapshot,
        });
        Ok(settings)
    }

    /// Deletes every persisted record and recreates defaults. Observers get
    /// a single `DataReset` and must treat the whole aggregate as replaced.
    pub async fn reset_all_data(&self) -> Result<UserData, StoreError> {
        self.ensure_ready()?;
        let mut guard = self.data.lock().await;

        for key in RecordKey::ALL {
            self.db
                .delete(key)
                .await
                .map_err(|source| StoreError::Persistence { key, source })?;
        }

        let fresh = UserData::fresh(Utc::now());
        self.persist_aggregate(&fresh).await?;
        *guard = fresh.clone();
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: EventKind::DataReset,
            data: fresh.clone(),
        });
        Ok(fresh)
    }

    /// Snapshot of the aggregate wrapped in a versioned envelope.
    pub async fn export_user_data(&self) -> Result<UserDataExport, StoreError> {
        self.ensure_ready()?;
        let guard = self.data.lock().await;
        Ok(UserDataExport {
            version: EXPORT_VERSION,
            export_date: Utc::now(),
            user_data: (*guard).clone(),
        })
    }

    /// Wholesale-replaces the aggregate from an export envelope after
    /// checking the format version, then persists all seven records.
    pub async fn import_user_data(&self, payload: UserDataExport) -> Result<(), StoreError> {
        self.ensure_ready()?;
        if payload.version != EXPORT_VERSION {
            return Err(StoreError::IncompatibleImport {
                found: payload.version,
                expected: EXPORT_VERSION,
            });
        }

        let mut guard = self.data.lock().await;
        *guard = payload.user_data;
        let snapshot = (*guard).clone();
        self.persist_aggregate(&snapshot).await?;
        drop(guard);

        self.observers.notify(&StoreEvent {
            kind: EventKind::DataImported,
            data: snapshot,
        });
        Ok(())
    }

    // === internals ===

    fn ensure_ready(&self) -> Result<(), StoreError> {
        if self.lifecycle() == Lifecycle::Ready {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    async fn persist<T: Serialize>(&self, key: RecordKey, record: &T) -> Result<(), StoreError> {
        self.db
            .store(key, record)
            .await
            .map_err(|source| StoreError::Persistence { key, source })
    }

    async fn persist_aggregate(&self, data: &UserData) -> Result<(), StoreError> {
        tokio::try_join!(
            self.persist(RecordKey::Profile, &data.profile),
            self.persist(RecordKey::Progress, &data.progress),
            self.persist(RecordKey::Badges, &data.badges),
            self.persist(RecordKey::Milestones, &data.milestones),
            self.persist(RecordKey::Sessions, &data.sessions),
            self.persist(RecordKey::Settings, &data.settings),
            self.persist(RecordKey::Achievements, &data.achievements),
        )?;
        Ok(())
    }
}

fn loaded_or<T>(
    result: anyhow::Result<Option<T>>,
    key: RecordKey,
    default: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(Some(value)) => value,
        Ok(None) => default(),
        Err(err) => {
            warn!("failed to load the {key} record: {err:#}");
            default()
        }
    }
}

struct XpOutcome {
    amount: u64,
    old_level: u32,
    new_level: u32,
    total_xp: u64,
}

fn apply_xp(progress: &mut Progress, amount: u64) -> XpOutcome {
    let old_level = progress.level;
    progress.xp = progress.xp.saturating_add(amount);
    progress.level = level_for_xp(progress.xp);
    XpOutcome {
        amount,
        old_level,
        new_level: progress.level,
        total_xp: progress.xp,
    }
}

fn xp_event(outcome: &XpOutcome, source: &str) -> EventKind {
    if outcome.new_level > outcome.old_level {
        EventKind::LevelUp {
            amount: outcome.amount,
            source: source.into(),
            old_level: outcome.old_level,
            new_level: outcome.new_level,
            total_xp: outcome.total_xp,
        }
    } else {
        EventKind::XpAdded {
            amount: outcome.amount,
            source: source.into(),
            old_level: outcome.old_level,
            new_level: outcome.new_level,
            total_xp: outcome.total_xp,
        }
    }
}

fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Calendar-day streak bookkeeping. Same-day sessions are a no-op, a
/// consecutive day extends the streak, any gap restarts it at 1.
fn update_streak(progress: &mut Progress, session_day: NaiveDate) {
    match progress.last_session_date {
        None => progress.streak = 1,
        Some(previous) if previous == session_day => {}
        Some(previous) if previous.succ_opt() == Some(session_day) => progress.streak += 1,
        Some(_) => progress.streak = 1,
    }
    progress.longest_streak = progress.longest_streak.max(progress.streak);
    progress.last_session_date = Some(session_day);
}

/// Mean motion score over the newest `ROLLING_WINDOW` history entries.
/// History is most-recent-first, so the window is a prefix.
fn rolling_average(history: &[SessionRecord]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let window = &history[..history.len().min(ROLLING_WINDOW)];
    window.iter().map(|session| session.motion_score).sum::<f64>() / window.len() as f64
}

/// Walks the badge catalog in order and unlocks everything whose rule is
/// newly satisfied, then refreshes the advisory progress map.
fn check_achievements(data: &mut UserData, now: DateTime<Utc>) -> Vec<EarnedBadge> {
    let mut unlocked = Vec::new();
    for def in catalog::BADGES {
        if data.badges.is_earned(def.id) {
            continue;
        }
        if def.rule.satisfied(&data.progress) {
            unlocked.push(grant_badge(data, def, now));
        }
    }

    for def in catalog::BADGES {
        let percent = if data.badges.is_earned(def.id) {
            100.0
        } else {
            def.rule.percent(&data.progress)
        };
        data.badges.progress.insert(def.id.to_string(), percent);
    }

    unlocked
}

fn grant_badge(data: &mut UserData, def: &catalog::BadgeDef, now: DateTime<Utc>) -> EarnedBadge {
    let badge = def.to_earned(now);
    data.badges.earned.push(badge.clone());
    data.badges.locked.retain(|locked| locked.id != def.id);
    data.badges.last_earned = Some(badge.clone());
    data.badges.progress.insert(def.id.to_string(), 100.0);
    data.achievements.total_badges_earned += 1;
    info!("badge unlocked: {}", def.id);
    badge
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(score: f64) -> SessionRecord {
        SessionRecord {
            id: "s".into(),
            exercise_type: "squat".into(),
            motion_score: score,
            duration_secs: 60,
            feedback: Vec::new(),
            improvements: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn first_session_starts_a_streak() {
        let mut progress = Progress::default();
        update_streak(&mut progress, day(2026, 3, 1));
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.longest_streak, 1);
        assert_eq!(progress.last_session_date, Some(day(2026, 3, 1)));
    }

    #[test]
    fn same_day_session_does_not_double_count() {
        let mut progress = Progress::default();
        update_streak(&mut progress, day(2026, 3, 1));
        update_streak(&mut progress, day(2026, 3, 1));
        assert_eq!(progress.streak, 1);
    }

    #[test]
    fn consecutive_days_extend_the_streak() {
        let mut progress = Progress::default();
        update_streak(&mut progress, day(2026, 3, 1));
        update_streak(&mut progress, day(2026, 3, 2));
        update_streak(&mut progress, day(2026, 3, 3));
        assert_eq!(progress.streak, 3);
        assert_eq!(progress.longest_streak, 3);
    }

    #[test]
    fn skipping_a_day_resets_but_keeps_the_record() {
        let mut progress = Progress::default();
        for d in 1..=5 {
            update_streak(&mut progress, day(2026, 3, d));
        }
        update_streak(&mut progress, day(2026, 3, 7));
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.longest_streak, 5);
    }

    #[test]
    fn month_boundary_counts_as_consecutive() {
        let mut progress = Progress::default();
        update_streak(&mut progress, day(2026, 2, 28));
        update_streak(&mut progress, day(2026, 3, 1));
        assert_eq!(progress.streak, 2);
    }

    #[test]
    fn xp_level_recurrence() {
        let mut progress = Progress::default();
        let outcome = apply_xp(&mut progress, 999);
        assert_eq!(outcome.new_level, 1);
        assert_eq!(outcome.old_level, 1);

        let outcome = apply_xp(&mut progress, 1);
        assert_eq!(progress.xp, 1000);
        assert_eq!(outcome.new_level, 2);
        assert!(outcome.new_level > outcome.old_level);
    }

    #[test]
    fn rolling_average_uses_only_the_newest_window() {
        // 20 newest score 100, older tail scores 0: the tail is ignored.
        let mut history: Vec<SessionRecord> = (0..20).map(|_| session(100.0)).collect();
        history.extend((0..30).map(|_| session(0.0)));
        assert_eq!(rolling_average(&history), 100.0);
    }

    #[test]
    fn rolling_average_of_empty_history_is_zero() {
        assert_eq!(rolling_average(&[]), 0.0);
    }

    #[test]
    fn achievement_check_unlocks_in_catalog_order() {
        let now = Utc::now();
        let mut data = UserData::fresh(now);
        data.progress.total_sessions = 5;
        data.progress.perfect_forms = 10;

        let unlocked = check_achievements(&mut data, now);
        let ids: Vec<&str> = unlocked.iter().map(|badge| badge.id.as_str()).collect();
        assert_eq!(ids, vec!["first_steps", "tech_guru", "form_master"]);
        assert_eq!(data.achievements.total_badges_earned, 3);
        assert!(!data.badges.locked.iter().any(|b| b.id == "first_steps"));
    }

    #[test]
    fn granted_badges_never_unlock_twice() {
        let now = Utc::now();
        let mut data = UserData::fresh(now);
        data.progress.total_sessions = 1;

        assert_eq!(check_achievements(&mut data, now).len(), 1);
        assert!(check_achievements(&mut data, now).is_empty());
        assert_eq!(data.achievements.total_badges_earned, 1);
    }
}
