pub mod session;
pub mod user;

pub use session::SessionStore;
pub use user::UserRepository;

#[cfg(test)]
pub use session::MockSessionStore;
#[cfg(test)]
pub use user::MockUserRepository;
