//! Unit tests for access and refresh token validation

use chrono::Duration;

use super::{fixture, identity, ISSUER, REFRESH_SECRET};
use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;
use crate::services::token::{session_key, tombstone_key, TokenCodec, TokenLifecycle};

fn token_error(err: DomainError) -> TokenError {
    match err {
        DomainError::Token(e) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_access_token_valid_until_expiry() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();

    f.advance(Duration::minutes(5));
    let claims = f.service.validate_access(&pair.access_token).unwrap();
    assert_eq!(claims.user_id, 42);

    f.advance(Duration::minutes(6));
    let err = f.service.validate_access(&pair.access_token).unwrap_err();
    assert_eq!(token_error(err), TokenError::Expired);
}

#[tokio::test]
async fn test_access_token_expires_exactly_at_exp() {
    let f = fixture();
    let token = f.service.issue_access_token(&identity()).unwrap();

    f.advance(Duration::seconds(599));
    assert!(f.service.validate_access(&token).is_ok());

    f.advance(Duration::seconds(1));
    let err = f.service.validate_access(&token).unwrap_err();
    assert_eq!(token_error(err), TokenError::Expired);
}

#[tokio::test]
async fn test_access_validation_does_not_touch_store() {
    let f = fixture();
    let token = f.service.issue_access_token(&identity()).unwrap();
    f.store.set_unavailable(true);

    assert!(f.service.validate_access(&token).is_ok());
}

#[tokio::test]
async fn test_token_kinds_are_not_interchangeable() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();

    assert!(f.service.validate_access(&pair.refresh_token).is_err());

    let err = f.service.validate_refresh(&pair.access_token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::InvalidSignature);
}

#[tokio::test]
async fn test_live_refresh_token_returns_claims() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();

    let claims = f.service.validate_refresh(&pair.refresh_token).await.unwrap();

    assert_eq!(claims.kind, TokenKind::Refresh);
    assert_eq!(claims.identity(), identity());
    assert!(claims.jti.is_some());
}

#[tokio::test]
async fn test_refresh_token_without_jti() {
    let f = fixture();
    let now = f.now();
    let codec = TokenCodec::new(REFRESH_SECRET, TokenKind::Refresh, ISSUER);
    let token = codec
        .encode(&Claims::new(&identity(), TokenKind::Refresh, ISSUER, now, now + 60, None))
        .unwrap();

    let err = f.service.validate_refresh(&token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::MissingSessionId);
}

#[tokio::test]
async fn test_session_holding_another_hash_is_rejected() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    let key = session_key(&f.jti_of(&pair.refresh_token));
    f.store
        .set(&key, "0000", std::time::Duration::from_secs(60), std::time::Duration::from_millis(200))
        .await
        .unwrap();

    let err = f.service.validate_refresh(&pair.refresh_token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::InvalidSignature);
}

#[tokio::test]
async fn test_missing_session_without_tombstone_is_expired_or_revoked() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    let key = session_key(&f.jti_of(&pair.refresh_token));
    f.store
        .delete(&key, std::time::Duration::from_millis(200))
        .await
        .unwrap();

    let err = f.service.validate_refresh(&pair.refresh_token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::SessionExpiredOrRevoked);
}

#[tokio::test]
async fn test_missing_session_with_tombstone_is_replay() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    let jti = f.jti_of(&pair.refresh_token);
    f.service.rotate(&pair.refresh_token).await.unwrap();

    f.advance(Duration::seconds(30));
    let err = f.service.validate_refresh(&pair.refresh_token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::ReplayDetected);

    // teardown re-arms the tombstone for a full grace window
    assert_eq!(f.store.peek(&tombstone_key(&jti)).await.as_deref(), Some("1"));
    assert_eq!(f.store.ttl_seconds(&tombstone_key(&jti)).await, Some(120));
    assert_eq!(f.store.peek(&session_key(&jti)).await, None);
}

#[tokio::test]
async fn test_replay_after_grace_window_reads_as_revoked() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    f.service.rotate(&pair.refresh_token).await.unwrap();

    f.advance(Duration::minutes(2));
    let err = f.service.validate_refresh(&pair.refresh_token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::SessionExpiredOrRevoked);
}

#[tokio::test]
async fn test_expired_refresh_token() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();

    f.advance(Duration::days(7));
    let err = f.service.validate_refresh(&pair.refresh_token).await.unwrap_err();
    assert_eq!(token_error(err), TokenError::Expired);
}

#[tokio::test]
async fn test_store_outage_is_not_a_session_miss() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    f.store.set_unavailable(true);

    let err = f.service.validate_refresh(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
}
