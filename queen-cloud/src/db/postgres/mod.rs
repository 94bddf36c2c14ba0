//! PostgreSQL store
//!
//! Query functions live in per-table modules and take a `&PgPool`;
//! [`PgStore`] wires them to the [`Store`] trait.

pub mod dashboard;
pub mod orders;
pub mod principals;
pub mod productions;
pub mod stock;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CustomerOrder, DashboardStats, ExpiringItem, HiveGroup, OrderFilter, Principal,
    ProductionBatch, ProductionFilter, Sale, SaleCreate, StockPackage, UpcomingItem,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::Store;
use crate::error::ServiceResult;

/// Maximum pooled connections
const MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and apply pending migrations
    pub async fn connect(database_url: &str) -> ServiceResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("PostgreSQL connected, migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_principal(&self, principal: &Principal) -> ServiceResult<()> {
        if !principals::create(&self.pool, principal).await? {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
        }
        Ok(())
    }

    async fn find_principal_by_email(&self, email: &str) -> ServiceResult<Option<Principal>> {
        Ok(principals::find_by_email(&self.pool, email).await?)
    }

    async fn find_principal_by_id(&self, id: Uuid) -> ServiceResult<Option<Principal>> {
        Ok(principals::find_by_id(&self.pool, id).await?)
    }

    async fn list_orders(&self, owner_id: Uuid) -> ServiceResult<Vec<CustomerOrder>> {
        Ok(orders::list(&self.pool, owner_id).await?)
    }

    async fn insert_order(&self, order: &CustomerOrder) -> ServiceResult<()> {
        Ok(orders::create(&self.pool, order).await?)
    }

    async fn find_order(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<CustomerOrder>> {
        Ok(orders::find(&self.pool, id, owner_id).await?)
    }

    async fn update_order(&self, order: &CustomerOrder) -> ServiceResult<bool> {
        Ok(orders::update(&self.pool, order).await?)
    }

    async fn delete_order(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<bool> {
        Ok(orders::delete(&self.pool, id, owner_id).await?)
    }

    async fn list_batches(&self, owner_id: Uuid) -> ServiceResult<Vec<ProductionBatch>> {
        Ok(productions::list(&self.pool, owner_id).await?)
    }

    async fn insert_batch(&self, batch: &ProductionBatch) -> ServiceResult<()> {
        Ok(productions::create(&self.pool, batch).await?)
    }

    async fn find_batch(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<ProductionBatch>> {
        Ok(productions::find(&self.pool, id, owner_id).await?)
    }

    async fn update_batch(
        &self,
        batch: &ProductionBatch,
        hives: Option<&[HiveGroup]>,
    ) -> ServiceResult<bool> {
        Ok(productions::update(&self.pool, batch, hives).await?)
    }

    async fn record_acceptance(
        &self,
        id: Uuid,
        owner_id: Uuid,
        accepted_cells: i32,
        acceptance_date: NaiveDate,
        now: i64,
    ) -> ServiceResult<Option<ProductionBatch>> {
        Ok(productions::record_acceptance(
            &self.pool,
            id,
            owner_id,
            accepted_cells,
            acceptance_date,
            now,
        )
        .await?)
    }

    async fn delete_batch(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<bool> {
        Ok(productions::delete(&self.pool, id, owner_id).await?)
    }

    async fn insert_package(&self, package: &StockPackage) -> ServiceResult<()> {
        Ok(stock::create(&self.pool, package).await?)
    }

    async fn list_packages(
        &self,
        owner_id: Uuid,
        active_on: Option<NaiveDate>,
    ) -> ServiceResult<Vec<StockPackage>> {
        Ok(stock::list(&self.pool, owner_id, active_on).await?)
    }

    async fn find_package(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<StockPackage>> {
        Ok(stock::find(&self.pool, id, owner_id).await?)
    }

    async fn sell(
        &self,
        package_id: Uuid,
        owner_id: Uuid,
        sale: SaleCreate,
        today: NaiveDate,
        now: i64,
    ) -> ServiceResult<Option<(StockPackage, Sale)>> {
        stock::sell(&self.pool, package_id, owner_id, sale, today, now).await
    }

    async fn list_sales(&self, package_id: Uuid) -> ServiceResult<Vec<Sale>> {
        Ok(stock::list_sales(&self.pool, package_id).await?)
    }

    async fn filter_orders(
        &self,
        owner_id: Uuid,
        filter: &OrderFilter,
    ) -> ServiceResult<Vec<CustomerOrder>> {
        Ok(orders::filter(&self.pool, owner_id, filter).await?)
    }

    async fn filter_batches(
        &self,
        owner_id: Uuid,
        filter: &ProductionFilter,
    ) -> ServiceResult<Vec<ProductionBatch>> {
        Ok(productions::filter(&self.pool, owner_id, filter).await?)
    }

    async fn dashboard_stats(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<DashboardStats> {
        Ok(dashboard::stats(&self.pool, owner_id, today).await?)
    }

    async fn upcoming_orders(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
        limit: i64,
    ) -> ServiceResult<Vec<UpcomingItem>> {
        Ok(dashboard::upcoming(&self.pool, owner_id, today, limit).await?)
    }

    async fn expiring_packages(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
        horizon_days: i64,
    ) -> ServiceResult<Vec<ExpiringItem>> {
        Ok(dashboard::expiring(&self.pool, owner_id, today, horizon_days).await?)
    }
}
