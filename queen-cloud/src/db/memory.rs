//! In-memory store
//!
//! All tables live behind a single `RwLock`. Writers hold the write guard for
//! the whole operation, so a check-then-update such as `sell` cannot
//! interleave with another writer. Lists come back in insertion order.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CustomerOrder, DashboardStats, ExpiringItem, HiveGroup, ORDER_STATUS_IN_PRODUCTION,
    ORDER_STATUS_PENDING, OrderFilter, Principal, ProductionBatch, ProductionFilter, Sale,
    SaleCreate, StockPackage, UpcomingItem,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::ServiceResult;

#[derive(Default)]
struct Tables {
    principals: HashMap<Uuid, Principal>,
    orders: Vec<CustomerOrder>,
    batches: Vec<ProductionBatch>,
    hives: Vec<HiveGroup>,
    packages: Vec<StockPackage>,
    sales: Vec<Sale>,
}

impl Tables {
    fn hives_of(&self, batch_id: Uuid) -> Vec<HiveGroup> {
        self.hives
            .iter()
            .filter(|h| h.batch_id == batch_id)
            .cloned()
            .collect()
    }

    /// Batch row with its hive groups attached
    fn hydrate(&self, batch: &ProductionBatch) -> ProductionBatch {
        let mut batch = batch.clone();
        batch.hives = self.hives_of(batch.id);
        batch
    }

    fn package_mut(&mut self, id: Uuid, owner_id: Uuid) -> Option<&mut StockPackage> {
        self.packages
            .iter_mut()
            .find(|p| p.id == id && p.owner_id == owner_id)
    }
}

/// Process-local [`Store`] used for development and tests
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_principal(&self, principal: &Principal) -> ServiceResult<()> {
        let mut t = self.tables.write().await;
        if t.principals.values().any(|p| p.email == principal.email) {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
        }
        t.principals.insert(principal.id, principal.clone());
        Ok(())
    }

    async fn find_principal_by_email(&self, email: &str) -> ServiceResult<Option<Principal>> {
        let t = self.tables.read().await;
        Ok(t.principals.values().find(|p| p.email == email).cloned())
    }

    async fn find_principal_by_id(&self, id: Uuid) -> ServiceResult<Option<Principal>> {
        let t = self.tables.read().await;
        Ok(t.principals.get(&id).cloned())
    }

    // ── Orders ──

    async fn list_orders(&self, owner_id: Uuid) -> ServiceResult<Vec<CustomerOrder>> {
        let t = self.tables.read().await;
        Ok(t.orders
            .iter()
            .filter(|o| o.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_order(&self, order: &CustomerOrder) -> ServiceResult<()> {
        self.tables.write().await.orders.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<CustomerOrder>> {
        let t = self.tables.read().await;
        Ok(t.orders
            .iter()
            .find(|o| o.id == id && o.owner_id == owner_id)
            .cloned())
    }

    async fn update_order(&self, order: &CustomerOrder) -> ServiceResult<bool> {
        let mut t = self.tables.write().await;
        match t
            .orders
            .iter_mut()
            .find(|o| o.id == order.id && o.owner_id == order.owner_id)
        {
            Some(existing) => {
                *existing = order.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_order(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<bool> {
        let mut t = self.tables.write().await;
        let before = t.orders.len();
        t.orders.retain(|o| !(o.id == id && o.owner_id == owner_id));
        if t.orders.len() == before {
            return Ok(false);
        }
        for batch in t.batches.iter_mut().filter(|b| b.order_id == Some(id)) {
            batch.order_id = None;
        }
        Ok(true)
    }

    // ── Production batches ──

    async fn list_batches(&self, owner_id: Uuid) -> ServiceResult<Vec<ProductionBatch>> {
        let t = self.tables.read().await;
        Ok(t.batches
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .map(|b| t.hydrate(b))
            .collect())
    }

    async fn insert_batch(&self, batch: &ProductionBatch) -> ServiceResult<()> {
        let mut t = self.tables.write().await;
        t.hives.extend(batch.hives.iter().cloned());
        let mut row = batch.clone();
        row.hives.clear();
        t.batches.push(row);
        Ok(())
    }

    async fn find_batch(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<ProductionBatch>> {
        let t = self.tables.read().await;
        Ok(t.batches
            .iter()
            .find(|b| b.id == id && b.owner_id == owner_id)
            .map(|b| t.hydrate(b)))
    }

    async fn update_batch(
        &self,
        batch: &ProductionBatch,
        hives: Option<&[HiveGroup]>,
    ) -> ServiceResult<bool> {
        let mut t = self.tables.write().await;
        let Some(existing) = t
            .batches
            .iter_mut()
            .find(|b| b.id == batch.id && b.owner_id == batch.owner_id)
        else {
            return Ok(false);
        };
        *existing = batch.clone();
        existing.hives.clear();
        if let Some(hives) = hives {
            t.hives.retain(|h| h.batch_id != batch.id);
            t.hives.extend(hives.iter().cloned());
        }
        Ok(true)
    }

    async fn record_acceptance(
        &self,
        id: Uuid,
        owner_id: Uuid,
        accepted_cells: i32,
        acceptance_date: NaiveDate,
        now: i64,
    ) -> ServiceResult<Option<ProductionBatch>> {
        let mut t = self.tables.write().await;
        let Some(batch) = t
            .batches
            .iter_mut()
            .find(|b| b.id == id && b.owner_id == owner_id)
        else {
            return Ok(None);
        };
        batch.accepted_cells = Some(accepted_cells);
        batch.acceptance_date = Some(acceptance_date);
        batch.updated_at = now;
        let batch = batch.clone();
        Ok(Some(t.hydrate(&batch)))
    }

    async fn delete_batch(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<bool> {
        let mut t = self.tables.write().await;
        if !t.batches.iter().any(|b| b.id == id && b.owner_id == owner_id) {
            return Ok(false);
        }
        let package_ids: Vec<Uuid> = t
            .packages
            .iter()
            .filter(|p| p.batch_id == id)
            .map(|p| p.id)
            .collect();
        t.sales.retain(|s| !package_ids.contains(&s.package_id));
        t.packages.retain(|p| p.batch_id != id);
        t.hives.retain(|h| h.batch_id != id);
        t.batches.retain(|b| b.id != id);
        Ok(true)
    }

    // ── Stock ──

    async fn insert_package(&self, package: &StockPackage) -> ServiceResult<()> {
        self.tables.write().await.packages.push(package.clone());
        Ok(())
    }

    async fn list_packages(
        &self,
        owner_id: Uuid,
        active_on: Option<NaiveDate>,
    ) -> ServiceResult<Vec<StockPackage>> {
        let t = self.tables.read().await;
        Ok(t.packages
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .filter(|p| active_on.is_none_or(|today| p.is_active_on(today)))
            .cloned()
            .collect())
    }

    async fn find_package(&self, id: Uuid, owner_id: Uuid) -> ServiceResult<Option<StockPackage>> {
        let t = self.tables.read().await;
        Ok(t.packages
            .iter()
            .find(|p| p.id == id && p.owner_id == owner_id)
            .cloned())
    }

    async fn sell(
        &self,
        package_id: Uuid,
        owner_id: Uuid,
        sale: SaleCreate,
        today: NaiveDate,
        now: i64,
    ) -> ServiceResult<Option<(StockPackage, Sale)>> {
        let mut t = self.tables.write().await;
        let Some(package) = t.package_mut(package_id, owner_id) else {
            return Ok(None);
        };
        let plan = package.plan_sale(&sale)?;
        package.apply_sale(&plan, now);
        let package = package.clone();

        let sale = sale.into_sale(package_id, today, now);
        t.sales.push(sale.clone());
        Ok(Some((package, sale)))
    }

    async fn list_sales(&self, package_id: Uuid) -> ServiceResult<Vec<Sale>> {
        let t = self.tables.read().await;
        Ok(t.sales
            .iter()
            .filter(|s| s.package_id == package_id)
            .cloned()
            .collect())
    }

    // ── Reports ──

    async fn filter_orders(
        &self,
        owner_id: Uuid,
        filter: &OrderFilter,
    ) -> ServiceResult<Vec<CustomerOrder>> {
        let t = self.tables.read().await;
        Ok(t.orders
            .iter()
            .filter(|o| o.owner_id == owner_id && filter.matches(o))
            .cloned()
            .collect())
    }

    async fn filter_batches(
        &self,
        owner_id: Uuid,
        filter: &ProductionFilter,
    ) -> ServiceResult<Vec<ProductionBatch>> {
        let t = self.tables.read().await;
        Ok(t.batches
            .iter()
            .filter(|b| b.owner_id == owner_id && filter.matches(b))
            .map(|b| t.hydrate(b))
            .collect())
    }

    // ── Dashboard ──

    async fn dashboard_stats(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<DashboardStats> {
        let t = self.tables.read().await;
        let horizon = today + Duration::days(shared::models::EXPIRING_HORIZON_DAYS);
        let window_start = today - Duration::days(shared::models::SALES_WINDOW_DAYS);

        let live: Vec<&StockPackage> = t
            .packages
            .iter()
            .filter(|p| p.owner_id == owner_id && !p.is_expired && p.expiration_date >= today)
            .collect();
        let owned: Vec<Uuid> = t
            .packages
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .map(|p| p.id)
            .collect();

        Ok(DashboardStats {
            total_available_cells: live.iter().map(|p| i64::from(p.available_cells)).sum(),
            pending_orders: t
                .orders
                .iter()
                .filter(|o| o.owner_id == owner_id && o.status == ORDER_STATUS_PENDING)
                .count() as i64,
            expiring_stock: live.iter().filter(|p| p.expiration_date <= horizon).count() as i64,
            total_sales_last_30_days: t
                .sales
                .iter()
                .filter(|s| owned.contains(&s.package_id) && s.sale_date >= window_start)
                .map(|s| i64::from(s.cells_sold))
                .sum(),
        })
    }

    async fn upcoming_orders(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
        limit: i64,
    ) -> ServiceResult<Vec<UpcomingItem>> {
        let t = self.tables.read().await;
        let mut orders: Vec<&CustomerOrder> = t
            .orders
            .iter()
            .filter(|o| {
                o.owner_id == owner_id
                    && (o.status == ORDER_STATUS_PENDING || o.status == ORDER_STATUS_IN_PRODUCTION)
                    && o.larvae_transfer_date >= today
            })
            .collect();
        orders.sort_by_key(|o| o.larvae_transfer_date);
        Ok(orders
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|o| UpcomingItem {
                id: o.id,
                customer_name: o.customer_name.clone(),
                delivery_date: o.delivery_date,
                larvae_transfer_date: o.larvae_transfer_date,
                number_of_cells: o.number_of_cells,
            })
            .collect())
    }

    async fn expiring_packages(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
        horizon_days: i64,
    ) -> ServiceResult<Vec<ExpiringItem>> {
        let t = self.tables.read().await;
        let horizon = today + Duration::days(horizon_days);
        let mut packages: Vec<&StockPackage> = t
            .packages
            .iter()
            .filter(|p| {
                p.owner_id == owner_id && p.is_active_on(today) && p.expiration_date <= horizon
            })
            .collect();
        packages.sort_by_key(|p| p.expiration_date);
        Ok(packages
            .into_iter()
            .map(|p| ExpiringItem {
                id: p.id,
                production_date: p.production_date,
                available_cells: p.available_cells,
                expiration_date: p.expiration_date,
            })
            .collect())
    }
}
