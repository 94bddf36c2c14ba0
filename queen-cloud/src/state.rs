//! Application state

use std::sync::Arc;

use crate::BoxError;
use crate::config::Config;
use crate::db::{self, Store};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Store>,
    /// JWT secret for principal authentication
    pub jwt_secret: Arc<str>,
    /// Token lifetime in days
    pub jwt_expires_days: i64,
    /// Argon2 time cost for new password hashes
    pub hash_cost: u32,
}

impl AppState {
    /// Create a new AppState, opening the configured store
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store = db::connect(config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Build state around an already opened store
    pub fn with_store(config: &Config, store: Arc<dyn Store>) -> Self {
        Self {
            store,
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            jwt_expires_days: config.jwt_expires_days,
            hash_cost: config.hash_cost,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
