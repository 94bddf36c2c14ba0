//! Shared types for the queen-cell record keeping service
//!
//! Domain models, the pure inventory rules, and the unified error
//! system used by the HTTP service and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
