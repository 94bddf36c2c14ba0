//! Stock package and sale queries

use chrono::NaiveDate;
use shared::models::{Sale, SaleCreate, StockPackage};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ServiceResult;

pub async fn create(pool: &PgPool, package: &StockPackage) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO stock_packages (
            id, owner_id, batch_id, production_date, total_cells, available_cells,
            sold_cells, expiration_date, is_expired, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(package.id)
    .bind(package.owner_id)
    .bind(package.batch_id)
    .bind(package.production_date)
    .bind(package.total_cells)
    .bind(package.available_cells)
    .bind(package.sold_cells)
    .bind(package.expiration_date)
    .bind(package.is_expired)
    .bind(package.created_at)
    .bind(package.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list(
    pool: &PgPool,
    owner_id: Uuid,
    active_on: Option<NaiveDate>,
) -> Result<Vec<StockPackage>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM stock_packages
        WHERE owner_id = $1
          AND ($2::DATE IS NULL
               OR (available_cells > 0 AND NOT is_expired AND expiration_date >= $2))
        ORDER BY created_at, id
        "#,
    )
    .bind(owner_id)
    .bind(active_on)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
) -> Result<Option<StockPackage>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stock_packages WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// Atomic sale: lock the package row, check, insert the sale, update counters.
///
/// Any early return drops `tx`, which rolls the transaction back.
pub async fn sell(
    pool: &PgPool,
    package_id: Uuid,
    owner_id: Uuid,
    sale: SaleCreate,
    today: NaiveDate,
    now: i64,
) -> ServiceResult<Option<(StockPackage, Sale)>> {
    let mut tx = pool.begin().await?;

    let package: Option<StockPackage> = sqlx::query_as(
        "SELECT * FROM stock_packages WHERE id = $1 AND owner_id = $2 FOR UPDATE",
    )
    .bind(package_id)
    .bind(owner_id)
    .fetch_optional(&mut *tx)
    .await?;
    let Some(mut package) = package else {
        return Ok(None);
    };

    let plan = package.plan_sale(&sale)?;
    package.apply_sale(&plan, now);
    let sale = sale.into_sale(package_id, today, now);

    sqlx::query(
        r#"
        INSERT INTO sales (id, package_id, customer_name, cells_sold, sale_date, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(sale.id)
    .bind(sale.package_id)
    .bind(&sale.customer_name)
    .bind(sale.cells_sold)
    .bind(sale.sale_date)
    .bind(sale.created_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE stock_packages SET
            available_cells = $1, sold_cells = $2, is_expired = $3, updated_at = $4
        WHERE id = $5
        "#,
    )
    .bind(package.available_cells)
    .bind(package.sold_cells)
    .bind(package.is_expired)
    .bind(package.updated_at)
    .bind(package.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some((package, sale)))
}

pub async fn list_sales(pool: &PgPool, package_id: Uuid) -> Result<Vec<Sale>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM sales WHERE package_id = $1 ORDER BY created_at, id")
        .bind(package_id)
        .fetch_all(pool)
        .await
}
