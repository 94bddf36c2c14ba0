//! Dashboard rollup DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Packages expiring within this many days (inclusive) count as expiring
pub const EXPIRING_HORIZON_DAYS: i64 = 7;
/// Sales window for the rolling sales total
pub const SALES_WINDOW_DAYS: i64 = 30;
/// Maximum number of upcoming orders returned
pub const UPCOMING_LIMIT: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DashboardStats {
    pub total_available_cells: i64,
    pub pending_orders: i64,
    pub expiring_stock: i64,
    pub total_sales_last_30_days: i64,
}

/// Order whose larvae transfer is coming up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UpcomingItem {
    pub id: Uuid,
    pub customer_name: String,
    pub delivery_date: NaiveDate,
    pub larvae_transfer_date: NaiveDate,
    pub number_of_cells: i32,
}

/// Package close to its expiration date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ExpiringItem {
    pub id: Uuid,
    pub production_date: NaiveDate,
    pub available_cells: i32,
    pub expiration_date: NaiveDate,
}
