//! Store layer
//!
//! [`Store`] is the only access path to persisted state. Every operation on
//! owned data takes the caller's `owner_id` and treats rows owned by someone
//! else exactly like missing rows.
//!
//! Two implementations:
//! - [`postgres::PgStore`]: PostgreSQL via sqlx (production)
//! - [`memory::MemoryStore`]: in-process maps behind one lock (`memory://`)

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    CustomerOrder, DashboardStats, ExpiringItem, HiveGroup, OrderFilter, Principal,
    ProductionBatch, ProductionFilter, Sale, SaleCreate, StockPackage, UpcomingItem,
};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ServiceResult;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    // ── Principals ──

    /// Fails with `EmailAlreadyRegistered` when the email is taken
    async fn insert_principal(&self, principal: &Principal) -> ServiceResult<()>;
    async fn find_principal_by_email(&self, email: &str) -> ServiceResult<Option<Principal>>;
    async fn find_principal_by_id(&self, id: Uuid) -> ServiceResult<Option<Principal>>;

    // ── Orders ──

    async fn list_orders(&self, owner_id: Uuid) -> ServiceResult<Vec<CustomerOrder>>;
    async fn insert_order(&self, order: &CustomerOrder) -> ServiceResult<()>;
    async fn find_order(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<CustomerOrder>>;
    /// Returns `false` when no row owned by `order.owner_id` matched
    async fn update_order(&self, order: &CustomerOrder) -> ServiceResult<bool>;
    /// Detaches referencing batches, then deletes the order
    async fn delete_order(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<bool>;

    // ── Production batches ──

    async fn list_batches(&self, owner_id: Uuid) -> ServiceResult<Vec<ProductionBatch>>;
    /// Inserts the batch and its hive groups together
    async fn insert_batch(&self, batch: &ProductionBatch) -> ServiceResult<()>;
    async fn find_batch(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<ProductionBatch>>;
    /// Writes the batch fields; replaces the hive set when `hives` is given
    async fn update_batch(
        &self,
        batch: &ProductionBatch,
        hives: Option<&[HiveGroup]>,
    ) -> ServiceResult<bool>;
    async fn record_acceptance(
        &self,
        id: Uuid,
        owner_id: Uuid,
        accepted_cells: i32,
        acceptance_date: NaiveDate,
        now: i64,
    ) -> ServiceResult<Option<ProductionBatch>>;
    /// Deletes sales, packages and hive groups of the batch, then the batch
    async fn delete_batch(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<bool>;

    // ── Stock ──

    async fn insert_package(&self, package: &StockPackage) -> ServiceResult<()>;
    /// All packages, or only the sellable ones on `active_on` when given
    async fn list_packages(
        &self,
        owner_id: Uuid,
        active_on: Option<NaiveDate>,
    ) -> ServiceResult<Vec<StockPackage>>;
    async fn find_package(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<StockPackage>>;
    /// Record a sale and decrement the package in one atomic step.
    ///
    /// Returns `Ok(None)` when the package does not exist for `owner_id`.
    /// Rule violations (`InvalidCellCount`, `InsufficientStock`) leave the
    /// package and its sales untouched.
    async fn sell(
        &self,
        package_id: Uuid,
        owner_id: Uuid,
        sale: SaleCreate,
        today: NaiveDate,
        now: i64,
    ) -> ServiceResult<Option<(StockPackage, Sale)>>;
    async fn list_sales(&self, package_id: Uuid) -> ServiceResult<Vec<Sale>>;

    // ── Reports ──

    async fn filter_orders(
        &self,
        owner_id: Uuid,
        filter: &OrderFilter,
    ) -> ServiceResult<Vec<CustomerOrder>>;
    async fn filter_batches(
        &self,
        owner_id: Uuid,
        filter: &ProductionFilter,
    ) -> ServiceResult<Vec<ProductionBatch>>;

    // ── Dashboard ──

    async fn dashboard_stats(&self, owner_id: Uuid, today: NaiveDate)
    -> ServiceResult<DashboardStats>;
    async fn upcoming_orders(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
        limit: i64,
    ) -> ServiceResult<Vec<UpcomingItem>>;
    async fn expiring_packages(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
        horizon_days: i64,
    ) -> ServiceResult<Vec<ExpiringItem>>;
}

/// Open the store selected by `config.database_url`
pub async fn connect(config: &Config) -> ServiceResult<Arc<dyn Store>> {
    if config.uses_memory_store() {
        tracing::warn!("Using in-memory store; data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = PgStore::connect(&config.database_url).await?;
    Ok(Arc::new(store))
}
