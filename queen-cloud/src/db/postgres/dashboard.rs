//! Dashboard rollups
//!
//! A package counts as live when it is not flagged expired and its
//! expiration date has not passed.

use chrono::{Duration, NaiveDate};
use shared::models::{
    DashboardStats, EXPIRING_HORIZON_DAYS, ExpiringItem, ORDER_STATUS_IN_PRODUCTION,
    ORDER_STATUS_PENDING, SALES_WINDOW_DAYS, UpcomingItem,
};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn stats(
    pool: &PgPool,
    owner_id: Uuid,
    today: NaiveDate,
) -> Result<DashboardStats, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT
            COALESCE((
                SELECT SUM(available_cells) FROM stock_packages
                WHERE owner_id = $1 AND NOT is_expired AND expiration_date >= $2
            ), 0)::BIGINT AS total_available_cells,
            (
                SELECT COUNT(*) FROM customer_orders
                WHERE owner_id = $1 AND status = $3
            ) AS pending_orders,
            (
                SELECT COUNT(*) FROM stock_packages
                WHERE owner_id = $1 AND NOT is_expired
                  AND expiration_date >= $2 AND expiration_date <= $4
            ) AS expiring_stock,
            COALESCE((
                SELECT SUM(s.cells_sold) FROM sales s
                JOIN stock_packages p ON p.id = s.package_id
                WHERE p.owner_id = $1 AND s.sale_date >= $5
            ), 0)::BIGINT AS total_sales_last_30_days
        "#,
    )
    .bind(owner_id)
    .bind(today)
    .bind(ORDER_STATUS_PENDING)
    .bind(today + Duration::days(EXPIRING_HORIZON_DAYS))
    .bind(today - Duration::days(SALES_WINDOW_DAYS))
    .fetch_one(pool)
    .await
}

pub async fn upcoming(
    pool: &PgPool,
    owner_id: Uuid,
    today: NaiveDate,
    limit: i64,
) -> Result<Vec<UpcomingItem>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, customer_name, delivery_date, larvae_transfer_date, number_of_cells
        FROM customer_orders
        WHERE owner_id = $1
          AND status IN ($2, $3)
          AND larvae_transfer_date >= $4
        ORDER BY larvae_transfer_date, created_at
        LIMIT $5
        "#,
    )
    .bind(owner_id)
    .bind(ORDER_STATUS_PENDING)
    .bind(ORDER_STATUS_IN_PRODUCTION)
    .bind(today)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn expiring(
    pool: &PgPool,
    owner_id: Uuid,
    today: NaiveDate,
    horizon_days: i64,
) -> Result<Vec<ExpiringItem>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, production_date, available_cells, expiration_date
        FROM stock_packages
        WHERE owner_id = $1
          AND NOT is_expired
          AND available_cells > 0
          AND expiration_date >= $2 AND expiration_date <= $3
        ORDER BY expiration_date, created_at
        "#,
    )
    .bind(owner_id)
    .bind(today)
    .bind(today + Duration::days(horizon_days))
    .fetch_all(pool)
    .await
}
