//! queen-cloud: record keeping service for queen cell production
//!
//! - Identity: registration, login, bearer token resolution
//! - Order and production ledgers with hive groups
//! - Inventory engine: stock packages and atomic sales
//! - Reports (CSV/PDF export) and dashboard rollups

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod services;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
