use std::io;
use std::sync::Arc;

use tracker_core::{
    AttributeFact, Category, CharacterFacts, LedgerError, Pool, SavedUsage, UpdateError,
    UsageKey,
};
use tracker_runtime::{
    Event, InMemoryUsageRepo, PersistenceEvent, RepositoryError, RuntimeConfig, Topic, Tracker,
    UsageRepository,
};

/// Human, constitution 3, mystic 2, willpower 3: 40 LP, 10 focus, 3 splinters.
fn selana() -> CharacterFacts {
    CharacterFacts {
        name: "Selana".to_owned(),
        race: "human".to_owned(),
        attributes: [("constitution", 3), ("mystic", 2), ("willpower", 3)]
            .into_iter()
            .map(|(id, value)| AttributeFact {
                id: id.to_owned(),
                value,
            })
            .collect(),
        ..CharacterFacts::default()
    }
}

fn config_in(dir: &tempfile::TempDir) -> RuntimeConfig {
    RuntimeConfig {
        data_dir: dir.path().to_path_buf(),
        ..RuntimeConfig::default()
    }
}

/// Repository whose saves always fail.
struct BrokenRepo;

impl UsageRepository for BrokenRepo {
    fn save(&self, _name: &str, _record: &SavedUsage) -> tracker_runtime::repository::Result<()> {
        Err(RepositoryError::Io(io::Error::other("disk full")))
    }

    fn load(&self, _name: &str) -> tracker_runtime::repository::Result<Option<SavedUsage>> {
        Ok(None)
    }

    fn exists(&self, _name: &str) -> bool {
        false
    }

    fn delete(&self, _name: &str) -> tracker_runtime::repository::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn usage_and_note_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let tracker = Tracker::builder()
        .config(config_in(&dir))
        .build()
        .await
        .unwrap();
    let mut session = tracker.open(&selana()).unwrap();
    session.spend(Pool::Lp, "b3").unwrap();
    session.spend(Pool::Focus, "k2v1").unwrap();
    session.set_note("poisoned");
    tracker.flush().await.unwrap();
    assert_eq!(tracker.list_saved().unwrap(), ["Selana"]);
    tracker.close(session);
    tracker.shutdown().await.unwrap();

    let tracker = Tracker::builder()
        .config(config_in(&dir))
        .build()
        .await
        .unwrap();
    let session = tracker.open(&selana()).unwrap();
    let usage = session.usage();
    assert_eq!(usage.of(Pool::Lp, Category::Exhausted), 3);
    assert_eq!(usage.of(Pool::Focus, Category::Channeled), 1);
    assert_eq!(usage.of(Pool::Focus, Category::Consumed), 1);
    assert_eq!(session.character().note(), "poisoned");
    // History is not persisted.
    assert!(session.history().is_empty());
    tracker.shutdown().await.unwrap();
}

#[tokio::test]
async fn disabled_persistence_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let tracker = Tracker::builder()
        .config(config_in(&dir))
        .enable_persistence(false)
        .build()
        .await
        .unwrap();
    assert!(!tracker.persistence_enabled());

    let mut session = tracker.open(&selana()).unwrap();
    session.spend(Pool::Splinters, "1").unwrap();
    tracker.flush().await.unwrap();

    assert!(!dir.path().join("usage").exists());
    assert!(tracker.list_saved().unwrap().is_empty());
    tracker.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_save_is_reported_and_keeps_state() {
    let tracker = Tracker::builder()
        .repository(Arc::new(BrokenRepo))
        .build()
        .await
        .unwrap();
    let mut saves = tracker.subscribe(Topic::Persistence);

    let mut session = tracker.open(&selana()).unwrap();
    session.spend(Pool::Focus, "4").unwrap();
    tracker.flush().await.unwrap();

    match saves.recv().await.unwrap() {
        Event::Persistence(PersistenceEvent::Failed { name, error, .. }) => {
            assert_eq!(name, "Selana");
            assert!(error.contains("disk full"), "{error}");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(session.usage().of(Pool::Focus, Category::Consumed), 4);
    assert_eq!(session.history().len(), 1);
    tracker.shutdown().await.unwrap();
}

#[tokio::test]
async fn usage_events_skip_replays_and_rejections() {
    let repository = Arc::new(InMemoryUsageRepo::new());
    let tracker = Tracker::builder()
        .repository(repository.clone())
        .build()
        .await
        .unwrap();
    let mut changes = tracker.subscribe(Topic::Usage);

    let mut session = tracker.open(&selana()).unwrap();
    session.spend(Pool::Splinters, "2").unwrap();

    match changes.try_recv().unwrap() {
        Event::Usage(event) => {
            assert_eq!(event.character, "Selana");
            assert_eq!(event.after.get(UsageKey::new(Pool::Splinters, Category::Consumed)), Some(2));
            assert_eq!(event.before.get(UsageKey::new(Pool::Splinters, Category::Consumed)), Some(0));
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = session.spend(Pool::Splinters, "2").unwrap_err();
    assert!(matches!(
        err,
        UpdateError::Ledger(LedgerError::InsufficientCapacity { missing: 1, .. })
    ));
    assert!(session.undo());
    assert!(session.redo());
    assert!(changes.try_recv().is_err());

    tracker.flush().await.unwrap();
    let saved = repository.load("Selana").unwrap().unwrap();
    assert_eq!(saved.usage.of(Pool::Splinters, Category::Consumed), 2);
    tracker.shutdown().await.unwrap();
}
