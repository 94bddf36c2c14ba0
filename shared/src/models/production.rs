//! Production Batch Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::require_text;
use crate::error::AppResult;

/// Status a new batch starts in
pub const BATCH_STATUS_ACTIVE: &str = "active";

/// Production batch entity (one larvae transfer through harvest)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductionBatch {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub transfer_date: NaiveDate,
    pub larvae_transferred: i32,
    pub accepted_cells: Option<i32>,
    pub acceptance_date: Option<NaiveDate>,
    pub cells_produced: i32,
    pub order_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Always populated on reads, never null
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub hives: Vec<HiveGroup>,
}

/// Hive group used to rear a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HiveGroup {
    pub id: Uuid,
    pub batch_id: Uuid,
    pub hive_name: String,
    pub created_at: i64,
}

/// Hive entry in create/update payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiveCreate {
    pub hive_name: String,
}

/// Create batch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCreate {
    pub transfer_date: NaiveDate,
    pub larvae_transferred: i32,
    pub accepted_cells: Option<i32>,
    pub acceptance_date: Option<NaiveDate>,
    pub cells_produced: i32,
    pub order_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub hives: Vec<HiveCreate>,
}

/// Replace batch payload
///
/// Every scalar field is overwritten. `status` keeps its current value when
/// omitted; `hives` replaces the hive set only when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionUpdate {
    pub transfer_date: NaiveDate,
    pub larvae_transferred: i32,
    pub accepted_cells: Option<i32>,
    pub acceptance_date: Option<NaiveDate>,
    pub cells_produced: i32,
    pub order_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub hives: Option<Vec<HiveCreate>>,
}

/// Record acceptance payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptanceUpdate {
    pub accepted_cells: i32,
    /// Defaults to the current date
    pub acceptance_date: Option<NaiveDate>,
}

fn validate_hives(hives: &[HiveCreate]) -> AppResult<()> {
    for hive in hives {
        require_text("hive_name", &hive.hive_name)?;
    }
    Ok(())
}

fn build_hives(batch_id: Uuid, hives: &[HiveCreate], now: i64) -> Vec<HiveGroup> {
    hives
        .iter()
        .map(|h| HiveGroup {
            id: Uuid::new_v4(),
            batch_id,
            hive_name: h.hive_name.trim().to_string(),
            created_at: now,
        })
        .collect()
}

impl ProductionCreate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(status) = &self.status {
            require_text("status", status)?;
        }
        validate_hives(&self.hives)
    }

    /// Build the stored batch together with its hive groups
    pub fn into_batch(self, owner_id: Uuid, now: i64) -> ProductionBatch {
        let id = Uuid::new_v4();
        let hives = build_hives(id, &self.hives, now);
        ProductionBatch {
            id,
            owner_id,
            transfer_date: self.transfer_date,
            larvae_transferred: self.larvae_transferred,
            accepted_cells: self.accepted_cells,
            acceptance_date: self.acceptance_date,
            cells_produced: self.cells_produced,
            order_id: self.order_id,
            notes: self.notes,
            status: self
                .status
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| BATCH_STATUS_ACTIVE.to_string()),
            created_at: now,
            updated_at: now,
            hives,
        }
    }
}

impl ProductionUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(status) = &self.status {
            require_text("status", status)?;
        }
        match &self.hives {
            Some(hives) => validate_hives(hives),
            None => Ok(()),
        }
    }

    /// Apply the updatable field set; returns the replacement hive set if any
    pub fn apply_to(&self, batch: &mut ProductionBatch, now: i64) -> Option<Vec<HiveGroup>> {
        batch.transfer_date = self.transfer_date;
        batch.larvae_transferred = self.larvae_transferred;
        batch.accepted_cells = self.accepted_cells;
        batch.acceptance_date = self.acceptance_date;
        batch.cells_produced = self.cells_produced;
        batch.order_id = self.order_id;
        batch.notes = self.notes.clone();
        if let Some(status) = &self.status {
            batch.status = status.trim().to_string();
        }
        batch.updated_at = now;

        let replaced = self
            .hives
            .as_ref()
            .map(|hives| build_hives(batch.id, hives, now));
        if let Some(hives) = &replaced {
            batch.hives = hives.clone();
        }
        replaced
    }
}

impl AcceptanceUpdate {
    /// Resolve the acceptance date against `today`
    pub fn resolved_date(&self, today: NaiveDate) -> NaiveDate {
        self.acceptance_date.unwrap_or(today)
    }
}
