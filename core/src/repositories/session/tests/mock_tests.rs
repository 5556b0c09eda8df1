//! Unit tests for the mock session store

use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::DomainError;
use crate::repositories::session::{MockSessionStore, SessionStore};
use crate::services::clock::ManualClock;

const DEADLINE: Duration = Duration::from_millis(200);

fn store() -> (Arc<ManualClock>, MockSessionStore) {
    let clock = Arc::new(ManualClock::starting_now());
    let store = MockSessionStore::new(clock.clone());
    (clock, store)
}

#[tokio::test]
async fn test_set_get_and_expire() {
    let (clock, store) = store();

    store
        .set("refresh:a", "hash", Duration::from_secs(60), DEADLINE)
        .await
        .unwrap();
    assert_eq!(
        store.get("refresh:a", DEADLINE).await.unwrap().as_deref(),
        Some("hash")
    );

    clock.advance(ChronoDuration::seconds(60));
    assert_eq!(store.get("refresh:a", DEADLINE).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_reports_whether_a_key_was_removed() {
    let (_, store) = store();
    store
        .set("refresh:a", "hash", Duration::from_secs(60), DEADLINE)
        .await
        .unwrap();

    assert!(store.delete("refresh:a", DEADLINE).await.unwrap());
    assert!(!store.delete("refresh:a", DEADLINE).await.unwrap());
}

#[tokio::test]
async fn test_unavailable_store_errors_instead_of_missing() {
    let (_, store) = store();
    store.set_unavailable(true);

    let err = store.get("refresh:a", DEADLINE).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
}

#[tokio::test]
async fn test_lost_race_removes_but_reports_false() {
    let (_, store) = store();
    store
        .set("refresh:a", "hash", Duration::from_secs(60), DEADLINE)
        .await
        .unwrap();
    store.lose_next_delete_race("refresh:a").await;

    assert!(!store.delete("refresh:a", DEADLINE).await.unwrap());
    assert_eq!(store.peek("refresh:a").await, None);
}
