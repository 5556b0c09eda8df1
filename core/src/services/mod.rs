//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, RegisterInput};
pub use clock::{Clock, ManualClock, SystemClock};
pub use password::PasswordHasher;
pub use token::{
    AccessTokenVerifier, TokenCodec, TokenLifecycle, TokenService, TokenServiceConfig,
};
