//! Cache module for OTP storage
//!
//! Provides the process-local store and the Redis-backed store, along with
//! the Redis client both the store and health checks use.

pub mod memory_store;
pub mod otp_cache;
pub mod redis_client;


pub use memory_store::InMemoryOtpStore;
pub use otp_cache::{otp_key, RedisOtpStore};
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use mo_shared::config::CacheConfig;
