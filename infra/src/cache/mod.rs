//! Cache module for the refresh session store
//!
//! This module provides the Redis client and the two `SessionStore`
//! implementations: Redis for deployments and in-memory for development.

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;


pub use memory_store::MemorySessionStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisSessionStore;

// Re-export commonly used types
pub use gk_shared::config::CacheConfig;
