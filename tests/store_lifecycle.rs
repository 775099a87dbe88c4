use motionsync::{catalog, models::SessionInput, Database, StoreError, UserDataStore};
use tempfile::TempDir;

fn open_database(dir: &TempDir) -> Database {
    Database::new(dir.path().join("motionsync.sqlite3")).unwrap()
}

#[tokio::test]
async fn accessors_fail_before_initialization() {
    let dir = TempDir::new().unwrap();
    let store = UserDataStore::new(open_database(&dir));

    assert!(!store.is_initialized());
    assert!(matches!(
        store.progress().await,
        Err(StoreError::NotInitialized)
    ));
    assert!(matches!(
        store.add_xp(10, "test").await,
        Err(StoreError::NotInitialized)
    ));
}

#[tokio::test]
async fn first_run_synthesizes_defaults() {
    let dir = TempDir::new().unwrap();
    let store = UserDataStore::new(open_database(&dir));

    let data = store.initialize().await;
    assert!(store.is_initialized());
    assert_eq!(data.progress.level, 1);
    assert_eq!(data.progress.xp, 0);
    assert!(data.badges.earned.is_empty());
    assert_eq!(data.milestones.in_progress.len(), catalog::MILESTONES.len());
    assert!(!data.profile.user_id.is_empty());
    assert_eq!(data.settings.motion_analysis.target_accuracy, 85);
}

#[tokio::test]
async fn concurrent_initialization_is_single_flight() {
    let dir = TempDir::new().unwrap();
    let store = UserDataStore::new(open_database(&dir));

    let (first, second) = tokio::join!(store.initialize(), store.initialize());
    assert_eq!(first.profile.user_id, second.profile.user_id);

    // A later call must return the already-loaded aggregate, not rebuild it.
    let third = store.initialize().await;
    assert_eq!(first.profile.user_id, third.profile.user_id);
}

#[tokio::test]
async fn state_survives_a_reopen() {
    let dir = TempDir::new().unwrap();

    let user_id = {
        let store = UserDataStore::new(open_database(&dir));
        let data = store.initialize().await;

        store
            .record_session(SessionInput {
                exercise_type: "squat".into(),
                motion_score: 88.0,
                duration_secs: 300,
                feedback: vec!["keep chest up".into()],
                improvements: Vec::new(),
                recorded_at: None,
            })
            .await
            .unwrap();
        store.add_xp(250, "test").await.unwrap();

        data.profile.user_id
    };

    let store = UserDataStore::new(open_database(&dir));
    let data = store.initialize().await;

    assert_eq!(data.profile.user_id, user_id);
    assert_eq!(data.progress.xp, 250);
    assert_eq!(data.progress.total_sessions, 1);
    assert_eq!(data.sessions.history.len(), 1);
    assert_eq!(data.sessions.history[0].motion_score, 88.0);
    assert_eq!(data.sessions.history[0].feedback, vec!["keep chest up"]);
}

#[tokio::test]
async fn reset_recreates_defaults() {
    let dir = TempDir::new().unwrap();
    let store = UserDataStore::new(open_database(&dir));
    store.initialize().await;

    store.add_xp(5000, "test").await.unwrap();
    store.unlock_badge("first_steps").await.unwrap();
    store.complete_milestone("first_session").await.unwrap();

    let data = store.reset_all_data().await.unwrap();
    assert_eq!(data.progress.level, 1);
    assert_eq!(data.progress.xp, 0);
    assert!(data.badges.earned.is_empty());
    assert_eq!(data.achievements.total_badges_earned, 0);
    assert_eq!(data.milestones.in_progress.len(), catalog::MILESTONES.len());

    // The wipe is durable, not just in-memory.
    drop(store);
    let store = UserDataStore::new(open_database(&dir));
    let data = store.initialize().await;
    assert_eq!(data.progress.xp, 0);
    assert!(data.badges.earned.is_empty());
}
