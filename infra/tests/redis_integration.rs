//! Integration tests for the Redis session store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p gk_infra --test redis_integration -- --ignored

use std::time::Duration;

use gk_core::repositories::SessionStore;
use gk_infra::cache::{CacheConfig, RedisClient, RedisSessionStore};
use gk_shared::config::CacheType;

const DEADLINE: Duration = Duration::from_millis(500);

fn config() -> CacheConfig {
    CacheConfig {
        cache_type: CacheType::Redis,
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        key_prefix: Some(format!("gk-test-{}", std::process::id())),
        ..CacheConfig::default()
    }
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let client = RedisClient::new(config()).await;
    assert!(client.is_ok(), "Failed to connect to Redis");
    assert!(client.unwrap().health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_delete() {
    let store = RedisSessionStore::new(RedisClient::new(config()).await.unwrap());

    store
        .set("refresh:abc", "digest", Duration::from_secs(60), DEADLINE)
        .await
        .unwrap();
    assert_eq!(
        store.get("refresh:abc", DEADLINE).await.unwrap(),
        Some("digest".to_string())
    );

    assert!(store.delete("refresh:abc", DEADLINE).await.unwrap());
    assert!(!store.delete("refresh:abc", DEADLINE).await.unwrap());
    assert_eq!(store.get("refresh:abc", DEADLINE).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_expiry() {
    let store = RedisSessionStore::new(RedisClient::new(config()).await.unwrap());

    store
        .set("refresh:short", "digest", Duration::from_millis(200), DEADLINE)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(store.get("refresh:short", DEADLINE).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_concurrent_delete_has_single_winner() {
    let store = RedisSessionStore::new(RedisClient::new(config()).await.unwrap());
    store
        .set("refresh:race", "digest", Duration::from_secs(60), DEADLINE)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        store.delete("refresh:race", DEADLINE),
        store.delete("refresh:race", DEADLINE)
    );

    assert!(a.unwrap() ^ b.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_prefixes_isolate_deployments() {
    let first = RedisSessionStore::new(RedisClient::new(config()).await.unwrap());
    let mut other = config();
    other.key_prefix = Some(format!("gk-other-{}", std::process::id()));
    let second = RedisSessionStore::new(RedisClient::new(other).await.unwrap());

    first
        .set("refresh:shared", "one", Duration::from_secs(60), DEADLINE)
        .await
        .unwrap();

    assert_eq!(second.get("refresh:shared", DEADLINE).await.unwrap(), None);
    first.delete("refresh:shared", DEADLINE).await.unwrap();
}
