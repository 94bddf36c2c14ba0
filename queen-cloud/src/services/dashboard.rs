//! Dashboard rollups, computed fresh per request

use shared::models::{
    DashboardStats, EXPIRING_HORIZON_DAYS, ExpiringItem, UPCOMING_LIMIT, UpcomingItem,
};
use shared::util::today;
use uuid::Uuid;

use crate::db::Store;
use crate::error::ServiceResult;

pub async fn stats(store: &dyn Store, owner_id: Uuid) -> ServiceResult<DashboardStats> {
    store.dashboard_stats(owner_id, today()).await
}

/// Next pending or in-production orders by larvae transfer date
pub async fn upcoming(store: &dyn Store, owner_id: Uuid) -> ServiceResult<Vec<UpcomingItem>> {
    store.upcoming_orders(owner_id, today(), UPCOMING_LIMIT).await
}

/// Sellable packages expiring within the horizon, soonest first
pub async fn expiring(store: &dyn Store, owner_id: Uuid) -> ServiceResult<Vec<ExpiringItem>> {
    store
        .expiring_packages(owner_id, today(), EXPIRING_HORIZON_DAYS)
        .await
}
