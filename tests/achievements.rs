use motionsync::{models::SessionInput, Database, EventKind, UserDataStore};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

async fn open_store(dir: &TempDir) -> UserDataStore {
    let db = Database::new(dir.path().join("motionsync.sqlite3")).unwrap();
    let store = UserDataStore::new(db);
    store.initialize().await;
    store
}

fn session(score: f64) -> SessionInput {
    SessionInput {
        exercise_type: "squat".into(),
        motion_score: score,
        duration_secs: 60,
        feedback: Vec::new(),
        improvements: Vec::new(),
        recorded_at: None,
    }
}

#[tokio::test]
async fn first_session_unlocks_first_steps() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store.record_session(session(50.0)).await.unwrap();

    let badges = store.badges().await.unwrap();
    assert!(badges.is_earned("first_steps"));
    assert!(!badges.locked.iter().any(|badge| badge.id == "first_steps"));
    assert_eq!(badges.last_earned.as_ref().unwrap().id, "first_steps");

    let achievements = store.achievements().await.unwrap();
    assert_eq!(achievements.total_badges_earned, 1);
}

#[tokio::test]
async fn tenth_perfect_form_unlocks_form_master_in_the_same_call() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    // Nine perfect forms, none crossing the form_master threshold yet.
    for _ in 0..9 {
        store.record_session(session(92.0)).await.unwrap();
    }
    let badges = store.badges().await.unwrap();
    assert!(!badges.is_earned("form_master"));

    let unlocked = Arc::new(Mutex::new(Vec::new()));
    let sink = unlocked.clone();
    let handle = store.subscribe(move |event| {
        if let EventKind::BadgeUnlocked { badge } = &event.kind {
            sink.lock().unwrap().push(badge.id.clone());
        }
    });

    store.record_session(session(95.0)).await.unwrap();

    let progress = store.progress().await.unwrap();
    assert_eq!(progress.perfect_forms, 10);
    assert!(unlocked.lock().unwrap().contains(&"form_master".to_string()));
    // Score 95 also tripped the best-score badge in the same pass.
    assert!(unlocked
        .lock()
        .unwrap()
        .contains(&"perfectionist".to_string()));
    handle.unsubscribe();
}

#[tokio::test]
async fn earned_badge_count_matches_the_achievement_counter() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    for _ in 0..12 {
        store.record_session(session(96.0)).await.unwrap();
    }
    store.unlock_badge("consistency_king").await.unwrap();

    let badges = store.badges().await.unwrap();
    let achievements = store.achievements().await.unwrap();
    assert_eq!(
        badges.earned.len(),
        achievements.total_badges_earned as usize
    );

    // No id appears twice and none is both earned and locked.
    for badge in &badges.earned {
        assert_eq!(
            badges.earned.iter().filter(|b| b.id == badge.id).count(),
            1
        );
        assert!(!badges.locked.iter().any(|locked| locked.id == badge.id));
    }
}

#[tokio::test]
async fn unlocking_twice_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    assert!(store.unlock_badge("first_steps").await.unwrap());
    assert!(!store.unlock_badge("first_steps").await.unwrap());

    let achievements = store.achievements().await.unwrap();
    assert_eq!(achievements.total_badges_earned, 1);
}

#[tokio::test]
async fn out_of_catalog_badge_ids_are_ignored() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    assert!(!store.unlock_badge("no_such_badge").await.unwrap());
    let achievements = store.achievements().await.unwrap();
    assert_eq!(achievements.total_badges_earned, 0);
}

#[tokio::test]
async fn milestone_completion_grants_xp_exactly_once() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    assert!(store.complete_milestone("first_session").await.unwrap());
    assert!(!store.complete_milestone("first_session").await.unwrap());

    let progress = store.progress().await.unwrap();
    assert_eq!(progress.xp, 100);

    let milestones = store.milestones().await.unwrap();
    assert_eq!(milestones.completed.len(), 1);
    assert_eq!(milestones.total_xp_earned, 100);
    assert!(!milestones
        .in_progress
        .iter()
        .any(|milestone| milestone.id == "first_session"));

    let achievements = store.achievements().await.unwrap();
    assert_eq!(achievements.total_milestones_completed, 1);
}

#[tokio::test]
async fn milestone_xp_can_level_up_with_its_own_event() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let _handle = store.subscribe(move |event| {
        let tag = match &event.kind {
            EventKind::XpAdded { .. } => "xpAdded",
            EventKind::LevelUp { new_level, .. } => {
                assert_eq!(*new_level, 2);
                "levelUp"
            }
            EventKind::MilestoneCompleted { .. } => "milestoneCompleted",
            _ => "other",
        };
        sink.lock().unwrap().push(tag.to_string());
    });

    // 100 + 150 + 200 + 250 + 300 = 1000 XP: the last one crosses a level.
    for id in [
        "first_session",
        "camera_setup",
        "form_improvement",
        "consistency_week",
        "exercise_variety",
    ] {
        assert!(store.complete_milestone(id).await.unwrap());
    }

    let events = events.lock().unwrap();
    // Each completion fires its XP event before its milestone event.
    assert_eq!(
        events[..2],
        ["xpAdded".to_string(), "milestoneCompleted".to_string()]
    );
    assert_eq!(
        events[events.len() - 2..],
        ["levelUp".to_string(), "milestoneCompleted".to_string()]
    );

    let progress = store.progress().await.unwrap();
    assert_eq!(progress.xp, 1000);
    assert_eq!(progress.level, 2);
}

#[tokio::test]
async fn unknown_milestones_are_ignored() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    assert!(!store.complete_milestone("not_a_milestone").await.unwrap());
    let progress = store.progress().await.unwrap();
    assert_eq!(progress.xp, 0);
}

#[tokio::test]
async fn badge_progress_map_tracks_partial_completion() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    for _ in 0..5 {
        store.record_session(session(50.0)).await.unwrap();
    }

    let badges = store.badges().await.unwrap();
    assert_eq!(badges.progress["first_steps"], 100.0);
    assert_eq!(badges.progress["motion_tracker"], 5.0);
}
