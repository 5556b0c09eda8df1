//! Unit tests for refresh token rotation

use chrono::Duration;

use super::{fixture, identity};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{session_key, tombstone_key, TokenLifecycle};

fn assert_token_error(result: Result<impl std::fmt::Debug, DomainError>, expected: TokenError) {
    match result {
        Err(DomainError::Token(e)) => assert_eq!(e, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

#[tokio::test]
async fn test_rotation_retires_old_token() {
    let f = fixture();
    let first = f.service.issue_pair(&identity()).await.unwrap();
    let old_jti = f.jti_of(&first.refresh_token);

    let second = f.service.rotate(&first.refresh_token).await.unwrap();

    assert_ne!(second.refresh_token, first.refresh_token);
    assert_token_error(
        f.service.validate_refresh(&first.refresh_token).await,
        TokenError::ReplayDetected,
    );
    assert!(f.service.validate_refresh(&second.refresh_token).await.is_ok());
    assert!(f.service.validate_access(&second.access_token).is_ok());

    assert_eq!(f.store.peek(&session_key(&old_jti)).await, None);
    assert_eq!(f.store.ttl_seconds(&tombstone_key(&old_jti)).await, Some(120));
}

#[tokio::test]
async fn test_second_rotation_with_same_token_is_replay() {
    let f = fixture();
    let first = f.service.issue_pair(&identity()).await.unwrap();
    f.service.rotate(&first.refresh_token).await.unwrap();

    assert_token_error(
        f.service.rotate(&first.refresh_token).await,
        TokenError::ReplayDetected,
    );
}

#[tokio::test]
async fn test_rotation_carries_identity_and_chain_origin() {
    let f = fixture();
    let origin = f.now();
    let mut pair = f.service.issue_pair(&identity()).await.unwrap();

    for _ in 0..4 {
        f.advance(Duration::days(6));
        pair = f.service.rotate(&pair.refresh_token).await.unwrap();

        let claims = f.refresh_claims(&pair.refresh_token);
        assert_eq!(claims.iat, origin);
        assert_eq!(claims.exp, f.now() + 7 * 24 * 3600);
        assert_eq!(claims.identity(), identity());
    }
}

#[tokio::test]
async fn test_rotation_past_ceiling_ends_chain() {
    let f = fixture();
    let mut pair = f.service.issue_pair(&identity()).await.unwrap();

    // rotate every 6 days: T+6, T+12, T+18, T+24
    for _ in 0..4 {
        f.advance(Duration::days(6));
        pair = f.service.rotate(&pair.refresh_token).await.unwrap();
    }

    // T+30d+1h: the token itself is valid until T+31d
    f.advance(Duration::days(6) + Duration::hours(1));
    let claims = f.refresh_claims(&pair.refresh_token);
    assert!(claims.exp > f.now());
    let jti = claims.jti.unwrap();

    assert_token_error(
        f.service.rotate(&pair.refresh_token).await,
        TokenError::SessionExpired,
    );
    assert_eq!(f.store.peek(&session_key(&jti)).await, None);
    assert_token_error(
        f.service.validate_refresh(&pair.refresh_token).await,
        TokenError::SessionExpiredOrRevoked,
    );
}

#[tokio::test]
async fn test_rotation_at_ceiling_boundary() {
    let f = fixture();
    let mut pair = f.service.issue_pair(&identity()).await.unwrap();
    for _ in 0..4 {
        f.advance(Duration::days(6));
        pair = f.service.rotate(&pair.refresh_token).await.unwrap();
    }

    // exactly T+30d
    f.advance(Duration::days(6));
    assert_token_error(
        f.service.rotate(&pair.refresh_token).await,
        TokenError::SessionExpired,
    );
}

#[tokio::test]
async fn test_losing_delete_race_is_replay_and_issues_nothing() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    let jti = f.jti_of(&pair.refresh_token);
    f.store.lose_next_delete_race(&session_key(&jti)).await;

    assert_token_error(
        f.service.rotate(&pair.refresh_token).await,
        TokenError::ReplayDetected,
    );
    assert_eq!(f.store.peek(&tombstone_key(&jti)).await.as_deref(), Some("1"));
    // only the tombstone remains
    assert_eq!(f.store.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_rotations_have_one_winner() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();

    let (a, b) = tokio::join!(
        f.service.rotate(&pair.refresh_token),
        f.service.rotate(&pair.refresh_token)
    );

    let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    let loser = if a.is_ok() { b } else { a };
    assert_token_error(loser, TokenError::ReplayDetected);
}

#[tokio::test]
async fn test_rotation_propagates_validation_errors() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();

    assert_token_error(f.service.rotate("garbage").await, TokenError::Malformed);
    assert_token_error(
        f.service.rotate(&pair.access_token).await,
        TokenError::InvalidSignature,
    );

    f.advance(Duration::days(7));
    assert_token_error(f.service.rotate(&pair.refresh_token).await, TokenError::Expired);
}

#[tokio::test]
async fn test_rotation_with_store_down() {
    let f = fixture();
    let pair = f.service.issue_pair(&identity()).await.unwrap();
    f.store.set_unavailable(true);

    let err = f.service.rotate(&pair.refresh_token).await.unwrap_err();
    assert!(err.is_unavailable());

    f.store.set_unavailable(false);
    assert!(f.service.rotate(&pair.refresh_token).await.is_ok());
}
