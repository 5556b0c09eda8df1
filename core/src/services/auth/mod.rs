//! Authentication service module
//!
//! Use cases on top of the user directory and the token lifecycle:
//! - registration with input validation and password hashing
//! - login issuing the first token pair of a chain
//! - refresh (rotation) and logout (revocation)
//! - user lookup for profile routes

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, RegisterInput};
