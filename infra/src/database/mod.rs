//! Database module - user directory implementations
//!
//! - Connection pool management for MySQL
//! - `MySqlUserRepository` over SQLx
//! - `InMemoryUserRepository` for development without a database

pub mod connection;
pub mod memory;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use memory::InMemoryUserRepository;
pub use mysql::MySqlUserRepository;
