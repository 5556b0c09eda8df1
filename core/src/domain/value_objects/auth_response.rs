//! Result of a successful login.

use crate::domain::entities::{token::TokenPair, user::User};

/// An authenticated user together with the first token pair of a new chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

impl AuthSession {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }
}
