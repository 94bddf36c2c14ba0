//! Report filters
//!
//! All filters are conjunctive. Date bounds compare against the record's
//! `created_at` and are inclusive of the whole end day.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::CustomerOrder;
use super::production::ProductionBatch;
use crate::error::{AppError, ErrorCode};
use crate::util::{end_of_day_millis, start_of_day_millis};

/// Which ledger an export draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Orders,
    Productions,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Orders => "orders",
            ReportType::Productions => "productions",
        }
    }
}

impl FromStr for ReportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "orders" => Ok(ReportType::Orders),
            "productions" => Ok(ReportType::Productions),
            other => Err(AppError::new(ErrorCode::InvalidReportType)
                .with_detail("report_type", other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(alias = "start")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "end")]
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    /// Case-insensitive substring
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductionFilter {
    #[serde(alias = "start")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "end")]
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Inclusive millisecond bounds for a date range
pub fn created_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (Option<i64>, Option<i64>) {
    (
        start.map(start_of_day_millis),
        end.map(end_of_day_millis),
    )
}

/// Trimmed status, `None` when absent or blank
fn status_needle(status: Option<&str>) -> Option<&str> {
    status.map(str::trim).filter(|s| !s.is_empty())
}

fn created_within(created_at: i64, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    let (from, to) = created_bounds(start, end);
    from.is_none_or(|from| created_at >= from) && to.is_none_or(|to| created_at <= to)
}

impl OrderFilter {
    pub fn status_needle(&self) -> Option<&str> {
        status_needle(self.status.as_deref())
    }

    /// Lower-cased name needle, `None` when absent or blank
    pub fn name_needle(&self) -> Option<String> {
        self.customer_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, order: &CustomerOrder) -> bool {
        created_within(order.created_at, self.start_date, self.end_date)
            && self.status_needle().is_none_or(|s| order.status == s)
            && self
                .name_needle()
                .is_none_or(|needle| order.customer_name.to_lowercase().contains(&needle))
    }
}

impl ProductionFilter {
    pub fn status_needle(&self) -> Option<&str> {
        status_needle(self.status.as_deref())
    }

    pub fn matches(&self, batch: &ProductionBatch) -> bool {
        created_within(batch.created_at, self.start_date, self.end_date)
            && self.status_needle().is_none_or(|s| batch.status == s)
    }
}

impl From<&OrderFilter> for ProductionFilter {
    fn from(filter: &OrderFilter) -> Self {
        Self {
            start_date: filter.start_date,
            end_date: filter.end_date,
            status: filter.status.clone(),
        }
    }
}
