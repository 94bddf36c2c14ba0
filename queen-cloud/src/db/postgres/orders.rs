//! Customer order queries
//!
//! All queries enforce owner_id isolation.

use shared::models::{CustomerOrder, OrderFilter, created_bounds};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<CustomerOrder>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customer_orders WHERE owner_id = $1 ORDER BY created_at, id")
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, order: &CustomerOrder) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO customer_orders (
            id, owner_id, customer_name, number_of_cells, delivery_date,
            larvae_transfer_date, status, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(order.id)
    .bind(order.owner_id)
    .bind(&order.customer_name)
    .bind(order.number_of_cells)
    .bind(order.delivery_date)
    .bind(order.larvae_transfer_date)
    .bind(&order.status)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<CustomerOrder>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customer_orders WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(pool: &PgPool, order: &CustomerOrder) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE customer_orders SET
            customer_name = $1, number_of_cells = $2, delivery_date = $3,
            larvae_transfer_date = $4, status = $5, updated_at = $6
        WHERE id = $7 AND owner_id = $8
        "#,
    )
    .bind(&order.customer_name)
    .bind(order.number_of_cells)
    .bind(order.delivery_date)
    .bind(order.larvae_transfer_date)
    .bind(&order.status)
    .bind(order.updated_at)
    .bind(order.id)
    .bind(order.owner_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Detach referencing batches, then delete the order, in one transaction
pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let owned: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM customer_orders WHERE id = $1 AND owner_id = $2 FOR UPDATE")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Ok(false);
    }

    sqlx::query("UPDATE production_batches SET order_id = NULL WHERE order_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM customer_orders WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn filter(
    pool: &PgPool,
    owner_id: Uuid,
    filter: &OrderFilter,
) -> Result<Vec<CustomerOrder>, sqlx::Error> {
    let (from, to) = created_bounds(filter.start_date, filter.end_date);
    sqlx::query_as(
        r#"
        SELECT * FROM customer_orders
        WHERE owner_id = $1
          AND ($2::BIGINT IS NULL OR created_at >= $2)
          AND ($3::BIGINT IS NULL OR created_at <= $3)
          AND ($4::TEXT IS NULL OR status = $4)
          AND ($5::TEXT IS NULL OR strpos(lower(customer_name), $5) > 0)
        ORDER BY created_at, id
        "#,
    )
    .bind(owner_id)
    .bind(from)
    .bind(to)
    .bind(filter.status_needle())
    .bind(filter.name_needle())
    .fetch_all(pool)
    .await
}
