//! Stock Package Model and inventory consumption rules
//!
//! A package is created from a production batch with every cell available.
//! Sales are the only transition:
//!
//! ```text
//! ACTIVE (available > 0, not expired) --sell(n <= available)--> ACTIVE
//! ACTIVE --sell(n == available)--> DEPLETED (available == 0, is_expired)
//! ```
//!
//! `DEPLETED` accepts no further sales. Date expiry is orthogonal and is
//! evaluated at read time (see [`StockPackage::with_read_time_expiry`]).
//!
//! The rules here are pure. Stores call [`StockPackage::plan_sale`] while
//! holding the package row lock and persist the plan together with the
//! [`Sale`] row in one transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::require_text;
use crate::error::{AppError, AppResult, ErrorCode};

/// Stock package entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockPackage {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub batch_id: Uuid,
    pub production_date: NaiveDate,
    pub total_cells: i32,
    pub available_cells: i32,
    pub sold_cells: i32,
    pub expiration_date: NaiveDate,
    pub is_expired: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Sale ledger entry (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: Uuid,
    pub package_id: Uuid,
    pub customer_name: String,
    pub cells_sold: i32,
    pub sale_date: NaiveDate,
    pub created_at: i64,
}

/// Create package payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockCreate {
    #[serde(alias = "production_id")]
    pub batch_id: Uuid,
    pub production_date: NaiveDate,
    pub total_cells: i32,
    pub expiration_date: NaiveDate,
}

/// Sell payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    pub customer_name: String,
    pub cells_sold: i32,
    /// Defaults to the current date
    pub sale_date: Option<NaiveDate>,
}

/// Sell-path state of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageState {
    Active,
    Depleted,
}

/// Counter values a sale leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalePlan {
    pub cells_sold: i32,
    pub available_cells: i32,
    pub sold_cells: i32,
    pub is_expired: bool,
}

impl SalePlan {
    /// True when this sale takes the package to `DEPLETED`
    pub fn depletes(&self) -> bool {
        self.available_cells == 0
    }
}

impl StockCreate {
    pub fn validate(&self) -> AppResult<()> {
        if self.total_cells <= 0 {
            return Err(AppError::with_message(
                ErrorCode::InvalidCellCount,
                "total_cells must be greater than 0",
            )
            .with_detail("total_cells", self.total_cells));
        }
        Ok(())
    }

    /// Build a fresh package: everything available, nothing sold
    pub fn into_package(self, owner_id: Uuid, now: i64) -> StockPackage {
        StockPackage {
            id: Uuid::new_v4(),
            owner_id,
            batch_id: self.batch_id,
            production_date: self.production_date,
            total_cells: self.total_cells,
            available_cells: self.total_cells,
            sold_cells: 0,
            expiration_date: self.expiration_date,
            is_expired: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl SaleCreate {
    /// Resolve the sale date against `today`
    pub fn resolved_date(&self, today: NaiveDate) -> NaiveDate {
        self.sale_date.unwrap_or(today)
    }

    /// Build the ledger row for `package_id`
    pub fn into_sale(self, package_id: Uuid, today: NaiveDate, now: i64) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            package_id,
            sale_date: self.resolved_date(today),
            customer_name: self.customer_name.trim().to_string(),
            cells_sold: self.cells_sold,
            created_at: now,
        }
    }
}

impl StockPackage {
    pub fn state(&self) -> PackageState {
        if self.available_cells > 0 && !self.is_expired {
            PackageState::Active
        } else {
            PackageState::Depleted
        }
    }

    /// Whether the package is sellable stock on `today`
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.available_cells > 0 && !self.is_expired && self.expiration_date >= today
    }

    /// Report date-based expiry without persisting it
    pub fn with_read_time_expiry(mut self, today: NaiveDate) -> Self {
        if self.expiration_date < today {
            self.is_expired = true;
        }
        self
    }

    /// Check a sale against the current counters and compute the result.
    ///
    /// Checks run in this order: non-positive count, oversell, customer name.
    pub fn plan_sale(&self, sale: &SaleCreate) -> AppResult<SalePlan> {
        if sale.cells_sold <= 0 {
            return Err(AppError::new(ErrorCode::InvalidCellCount)
                .with_detail("cells_sold", sale.cells_sold));
        }
        if sale.cells_sold > self.available_cells {
            return Err(AppError::insufficient_stock(self.available_cells)
                .with_detail("requested", sale.cells_sold));
        }
        require_text("customer_name", &sale.customer_name)?;

        let available_cells = self.available_cells - sale.cells_sold;
        Ok(SalePlan {
            cells_sold: sale.cells_sold,
            available_cells,
            sold_cells: self.sold_cells + sale.cells_sold,
            is_expired: self.is_expired || available_cells == 0,
        })
    }

    /// Write a plan's counters into this package
    pub fn apply_sale(&mut self, plan: &SalePlan, now: i64) {
        self.available_cells = plan.available_cells;
        self.sold_cells = plan.sold_cells;
        self.is_expired = plan.is_expired;
        self.updated_at = now;
    }

    /// `available + sold == total` and `0 <= available <= total`
    pub fn counters_consistent(&self) -> bool {
        self.available_cells + self.sold_cells == self.total_cells
            && (0..=self.total_cells).contains(&self.available_cells)
    }
}
