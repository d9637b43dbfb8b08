//! Type definitions shared by the server crates
//!
//! - `response` - health check documents

pub mod response;

pub use response::{HealthResponse, HealthStatus, ServiceHealth};
