//! Customer Order Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Status a new order starts in
pub const ORDER_STATUS_PENDING: &str = "pending";
/// Status of an order whose cells are being reared
pub const ORDER_STATUS_IN_PRODUCTION: &str = "in_production";

/// Customer order entity
///
/// `status` is free-form; `pending`, `in_production`, `delivered` and
/// `cancelled` are the values clients use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerOrder {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub customer_name: String,
    pub number_of_cells: i32,
    pub delivery_date: NaiveDate,
    pub larvae_transfer_date: NaiveDate,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub number_of_cells: i32,
    pub delivery_date: NaiveDate,
    pub larvae_transfer_date: NaiveDate,
    pub status: Option<String>,
}

/// Replace order payload
///
/// Every field is overwritten; `status` keeps its current value when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: String,
    pub number_of_cells: i32,
    pub delivery_date: NaiveDate,
    pub larvae_transfer_date: NaiveDate,
    pub status: Option<String>,
}

impl OrderCreate {
    pub fn validate(&self) -> AppResult<()> {
        require_text("customer_name", &self.customer_name)?;
        if let Some(status) = &self.status {
            require_text("status", status)?;
        }
        Ok(())
    }

    /// Build the stored row; ids and timestamps are server-assigned
    pub fn into_order(self, owner_id: Uuid, now: i64) -> CustomerOrder {
        CustomerOrder {
            id: Uuid::new_v4(),
            owner_id,
            customer_name: self.customer_name.trim().to_string(),
            number_of_cells: self.number_of_cells,
            delivery_date: self.delivery_date,
            larvae_transfer_date: self.larvae_transfer_date,
            status: self
                .status
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| ORDER_STATUS_PENDING.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl OrderUpdate {
    pub fn validate(&self) -> AppResult<()> {
        require_text("customer_name", &self.customer_name)?;
        if let Some(status) = &self.status {
            require_text("status", status)?;
        }
        Ok(())
    }

    /// Apply the updatable field set to an existing order
    pub fn apply_to(&self, order: &mut CustomerOrder, now: i64) {
        order.customer_name = self.customer_name.trim().to_string();
        order.number_of_cells = self.number_of_cells;
        order.delivery_date = self.delivery_date;
        order.larvae_transfer_date = self.larvae_transfer_date;
        if let Some(status) = &self.status {
            order.status = status.trim().to_string();
        }
        order.updated_at = now;
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    Ok(())
}
