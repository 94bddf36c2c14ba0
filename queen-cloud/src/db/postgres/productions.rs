//! Production batch and hive group queries
//!
//! Batch reads always attach the batch's hive groups.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::{HiveGroup, ProductionBatch, ProductionFilter, created_bounds};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Load and attach hive groups for `batches`
async fn attach_hives(
    pool: &PgPool,
    mut batches: Vec<ProductionBatch>,
) -> Result<Vec<ProductionBatch>, sqlx::Error> {
    if batches.is_empty() {
        return Ok(batches);
    }
    let ids: Vec<Uuid> = batches.iter().map(|b| b.id).collect();
    let hives: Vec<HiveGroup> = sqlx::query_as(
        "SELECT * FROM hive_groups WHERE batch_id = ANY($1) ORDER BY created_at, id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut by_batch: HashMap<Uuid, Vec<HiveGroup>> = HashMap::new();
    for hive in hives {
        by_batch.entry(hive.batch_id).or_default().push(hive);
    }
    for batch in &mut batches {
        batch.hives = by_batch.remove(&batch.id).unwrap_or_default();
    }
    Ok(batches)
}

async fn insert_hives(
    tx: &mut Transaction<'_, Postgres>,
    hives: &[HiveGroup],
) -> Result<(), sqlx::Error> {
    for hive in hives {
        sqlx::query(
            "INSERT INTO hive_groups (id, batch_id, hive_name, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(hive.id)
        .bind(hive.batch_id)
        .bind(&hive.hive_name)
        .bind(hive.created_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<ProductionBatch>, sqlx::Error> {
    let batches: Vec<ProductionBatch> = sqlx::query_as(
        "SELECT * FROM production_batches WHERE owner_id = $1 ORDER BY created_at, id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    attach_hives(pool, batches).await
}

/// Insert a batch and its hive groups; all or nothing
pub async fn create(pool: &PgPool, batch: &ProductionBatch) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO production_batches (
            id, owner_id, transfer_date, larvae_transferred, accepted_cells,
            acceptance_date, cells_produced, order_id, notes, status,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(batch.id)
    .bind(batch.owner_id)
    .bind(batch.transfer_date)
    .bind(batch.larvae_transferred)
    .bind(batch.accepted_cells)
    .bind(batch.acceptance_date)
    .bind(batch.cells_produced)
    .bind(batch.order_id)
    .bind(&batch.notes)
    .bind(&batch.status)
    .bind(batch.created_at)
    .bind(batch.updated_at)
    .execute(&mut *tx)
    .await?;

    insert_hives(&mut tx, &batch.hives).await?;

    tx.commit().await?;
    Ok(())
}

pub async fn find(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<ProductionBatch>, sqlx::Error> {
    let batch: Option<ProductionBatch> =
        sqlx::query_as("SELECT * FROM production_batches WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?;
    match batch {
        Some(batch) => Ok(attach_hives(pool, vec![batch]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn update(
    pool: &PgPool,
    batch: &ProductionBatch,
    hives: Option<&[HiveGroup]>,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE production_batches SET
            transfer_date = $1, larvae_transferred = $2, accepted_cells = $3,
            acceptance_date = $4, cells_produced = $5, order_id = $6,
            notes = $7, status = $8, updated_at = $9
        WHERE id = $10 AND owner_id = $11
        "#,
    )
    .bind(batch.transfer_date)
    .bind(batch.larvae_transferred)
    .bind(batch.accepted_cells)
    .bind(batch.acceptance_date)
    .bind(batch.cells_produced)
    .bind(batch.order_id)
    .bind(&batch.notes)
    .bind(&batch.status)
    .bind(batch.updated_at)
    .bind(batch.id)
    .bind(batch.owner_id)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Ok(false);
    }

    if let Some(hives) = hives {
        sqlx::query("DELETE FROM hive_groups WHERE batch_id = $1")
            .bind(batch.id)
            .execute(&mut *tx)
            .await?;
        insert_hives(&mut tx, hives).await?;
    }

    tx.commit().await?;
    Ok(true)
}

pub async fn record_acceptance(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    accepted_cells: i32,
    acceptance_date: NaiveDate,
    now: i64,
) -> Result<Option<ProductionBatch>, sqlx::Error> {
    let batch: Option<ProductionBatch> = sqlx::query_as(
        r#"
        UPDATE production_batches SET
            accepted_cells = $1, acceptance_date = $2, updated_at = $3
        WHERE id = $4 AND owner_id = $5
        RETURNING *
        "#,
    )
    .bind(accepted_cells)
    .bind(acceptance_date)
    .bind(now)
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    match batch {
        Some(batch) => Ok(attach_hives(pool, vec![batch]).await?.pop()),
        None => Ok(None),
    }
}

/// Cascade delete: sales → packages → hive groups → batch, in one transaction
pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let owned: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM production_batches WHERE id = $1 AND owner_id = $2 FOR UPDATE",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(&mut *tx)
    .await?;
    if owned.is_none() {
        return Ok(false);
    }

    sqlx::query(
        "DELETE FROM sales WHERE package_id IN (SELECT id FROM stock_packages WHERE batch_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("DELETE FROM stock_packages WHERE batch_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM hive_groups WHERE batch_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM production_batches WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn filter(
    pool: &PgPool,
    owner_id: Uuid,
    filter: &ProductionFilter,
) -> Result<Vec<ProductionBatch>, sqlx::Error> {
    let (from, to) = created_bounds(filter.start_date, filter.end_date);
    let batches: Vec<ProductionBatch> = sqlx::query_as(
        r#"
        SELECT * FROM production_batches
        WHERE owner_id = $1
          AND ($2::BIGINT IS NULL OR created_at >= $2)
          AND ($3::BIGINT IS NULL OR created_at <= $3)
          AND ($4::TEXT IS NULL OR status = $4)
        ORDER BY created_at, id
        "#,
    )
    .bind(owner_id)
    .bind(from)
    .bind(to)
    .bind(filter.status_needle())
    .fetch_all(pool)
    .await?;
    attach_hives(pool, batches).await
}
