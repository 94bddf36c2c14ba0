//! Data models
//!
//! Shared between queen-cloud and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID v4, timestamps are Unix milliseconds and calendar
//! fields are `NaiveDate`.

pub mod dashboard;
pub mod order;
pub mod principal;
pub mod production;
pub mod report;
pub mod stock;

// Re-exports
pub use dashboard::*;
pub use order::*;
pub use principal::*;
pub use production::*;
pub use report::*;
pub use stock::*;
