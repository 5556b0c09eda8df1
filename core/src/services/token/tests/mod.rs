//! Token service test suites

mod rotation_tests;
mod validator_tests;

use chrono::Duration as ChronoDuration;
use std::sync::Arc;

use gk_shared::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{Identity, Role};
use crate::repositories::MockSessionStore;
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const ACCESS_SECRET: &str = "access-secret-for-tests";
pub(super) const REFRESH_SECRET: &str = "refresh-secret-for-tests";
pub(super) const ISSUER: &str = "auth-service";

pub(super) struct Fixture {
    pub clock: Arc<ManualClock>,
    pub store: Arc<MockSessionStore>,
    pub service: TokenService<Arc<MockSessionStore>>,
}

impl Fixture {
    pub fn now(&self) -> i64 {
        self.clock.now().timestamp()
    }

    pub fn advance(&self, by: ChronoDuration) {
        self.clock.advance(by);
    }

    /// Claims of a refresh token regardless of expiry
    pub fn refresh_claims(&self, token: &str) -> Claims {
        self.service.refresh_codec.decode_allow_expired(token).unwrap()
    }

    pub fn jti_of(&self, token: &str) -> String {
        self.refresh_claims(token).jti.unwrap()
    }
}

/// 10m access, 7d refresh, 2m grace, 30d ceiling
pub(super) fn jwt_config() -> JwtConfig {
    JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET)
}

pub(super) fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::starting_now());
    let store = Arc::new(MockSessionStore::new(clock.clone()));
    let service = TokenService::with_clock(
        store.clone(),
        TokenServiceConfig::new(jwt_config()),
        clock.clone(),
    )
    .unwrap();

    Fixture {
        clock,
        store,
        service,
    }
}

pub(super) fn identity() -> Identity {
    Identity::new(42, "ada", Role::User)
}
