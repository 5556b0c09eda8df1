pub mod auth;
pub mod error;
pub mod user;

pub use auth::{AccessTokenResponse, LoginRequest, LogoutResponse, RefreshTokenRequest, RegisterRequest};
pub use error::{ErrorResponse, ErrorResponseExt};
pub use user::UserResponse;
