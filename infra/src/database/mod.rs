//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The MySQL-backed OTP store

pub mod connection;
pub mod otp_repository;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use otp_repository::MySqlOtpStore;
