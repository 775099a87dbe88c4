use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use motionsync::{
    models::{ProfileUpdate, SessionInput, SettingsUpdate},
    Database, EventKind, ObserverHandle, UserDataStore,
};
use tempfile::TempDir;

async fn open_store(dir: &TempDir) -> UserDataStore {
    let db = Database::new(dir.path().join("motionsync.sqlite3")).unwrap();
    let store = UserDataStore::new(db);
    store.initialize().await;
    store
}

#[tokio::test]
async fn observers_fire_in_registration_order() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let order = Arc::new(Mutex::new(Vec::new()));
    let first = order.clone();
    let _a = store.subscribe(move |_| first.lock().unwrap().push("a"));
    let second = order.clone();
    let _b = store.subscribe(move |_| second.lock().unwrap().push("b"));

    store.add_xp(10, "test").await.unwrap();
    store.add_xp(10, "test").await.unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["a", "b", "a", "b"]);
}

#[tokio::test]
async fn events_carry_the_post_mutation_aggregate() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let seen_xp = Arc::new(Mutex::new(Vec::new()));
    let sink = seen_xp.clone();
    let _handle = store.subscribe(move |event| {
        sink.lock().unwrap().push(event.data.progress.xp);
    });

    store.add_xp(100, "test").await.unwrap();
    store.add_xp(150, "test").await.unwrap();

    assert_eq!(*seen_xp.lock().unwrap(), vec![100, 250]);
}

#[tokio::test]
async fn unsubscribed_observers_stop_receiving_events() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let count = Arc::new(AtomicUsize::new(0));
    let sink = count.clone();
    let handle = store.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    store.add_xp(10, "test").await.unwrap();
    handle.unsubscribe();
    store.add_xp(10, "test").await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unsubscribing_during_fan_out_is_safe() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    // The first observer tears the second one down mid-dispatch. The
    // in-flight notification still reaches the second observer; the next
    // one does not.
    let victim: Arc<Mutex<Option<ObserverHandle>>> = Arc::new(Mutex::new(None));
    let slot = victim.clone();
    let _saboteur = store.subscribe(move |_| {
        if let Some(handle) = slot.lock().unwrap().take() {
            handle.unsubscribe();
        }
    });

    let count = Arc::new(AtomicUsize::new(0));
    let sink = count.clone();
    let handle = store.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    *victim.lock().unwrap() = Some(handle);

    store.add_xp(10, "test").await.unwrap();
    store.add_xp(10, "test").await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn level_up_and_xp_added_are_distinct_events() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let tags = Arc::new(Mutex::new(Vec::new()));
    let sink = tags.clone();
    let _handle = store.subscribe(move |event| {
        let tag = match &event.kind {
            EventKind::XpAdded {
                old_level,
                new_level,
                ..
            } => {
                assert_eq!(old_level, new_level);
                "xpAdded"
            }
            EventKind::LevelUp {
                old_level,
                new_level,
                total_xp,
                ..
            } => {
                assert!(new_level > old_level);
                assert_eq!(*total_xp, 1000);
                "levelUp"
            }
            _ => "other",
        };
        sink.lock().unwrap().push(tag);
    });

    store.add_xp(999, "test").await.unwrap();
    store.add_xp(1, "test").await.unwrap();

    assert_eq!(*tags.lock().unwrap(), vec!["xpAdded", "levelUp"]);
}

#[tokio::test]
async fn each_mutation_kind_emits_its_event() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let tags = Arc::new(Mutex::new(Vec::new()));
    let sink = tags.clone();
    let _handle = store.subscribe(move |event| {
        let tag = match &event.kind {
            EventKind::SessionAdded { .. } => "sessionAdded",
            EventKind::BadgeUnlocked { .. } => "badgeUnlocked",
            EventKind::ProfileUpdated => "profileUpdated",
            EventKind::SettingsUpdated => "settingsUpdated",
            EventKind::DataReset => "dataReset",
            _ => "other",
        };
        sink.lock().unwrap().push(tag);
    });

    // The first session unlocks first_steps, whose event precedes
    // sessionAdded.
    store
        .record_session(SessionInput {
            exercise_type: "squat".into(),
            motion_score: 50.0,
            duration_secs: 60,
            feedback: Vec::new(),
            improvements: Vec::new(),
            recorded_at: None,
        })
        .await
        .unwrap();
    store
        .update_profile(ProfileUpdate {
            name: Some("Alex".into()),
            email: None,
            avatar: None,
        })
        .await
        .unwrap();
    store
        .update_settings(SettingsUpdate::default())
        .await
        .unwrap();
    store.reset_all_data().await.unwrap();

    assert_eq!(
        *tags.lock().unwrap(),
        vec![
            "badgeUnlocked",
            "sessionAdded",
            "profileUpdated",
            "settingsUpdated",
            "dataReset"
        ]
    );
}
