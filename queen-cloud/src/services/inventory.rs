//! Inventory engine: stock packages and sales
//!
//! The sell path is delegated to [`Store::sell`], which runs the
//! check-then-update under a row lock. Listing and fetch operations report
//! date-based expiry at read time.

use shared::error::{AppError, ErrorCode};
use shared::models::{Sale, SaleCreate, StockCreate, StockPackage};
use shared::util::{now_millis, today};
use uuid::Uuid;

use crate::db::Store;
use crate::error::ServiceResult;

fn not_found() -> AppError {
    AppError::new(ErrorCode::StockPackageNotFound)
}

/// Create a package from one of the caller's batches with every cell available
pub async fn create_package(
    store: &dyn Store,
    owner_id: Uuid,
    data: StockCreate,
) -> ServiceResult<StockPackage> {
    data.validate()?;
    if store.find_batch(data.batch_id, owner_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::StockBatchInvalid)
            .with_detail("batch_id", data.batch_id.to_string())
            .into());
    }
    let package = data.into_package(owner_id, now_millis());
    store.insert_package(&package).await?;
    tracing::info!(
        package_id = %package.id,
        batch_id = %package.batch_id,
        total_cells = package.total_cells,
        "Stock package created"
    );
    Ok(package)
}

/// Sell cells from a package; returns the updated package
pub async fn sell(
    store: &dyn Store,
    package_id: Uuid,
    owner_id: Uuid,
    data: SaleCreate,
) -> ServiceResult<StockPackage> {
    let today = today();
    let (package, sale) = store
        .sell(package_id, owner_id, data, today, now_millis())
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        %package_id,
        sale_id = %sale.id,
        cells_sold = sale.cells_sold,
        remaining = package.available_cells,
        "Sale recorded"
    );
    if package.available_cells == 0 {
        tracing::info!(%package_id, "Stock package depleted");
    }
    Ok(package.with_read_time_expiry(today))
}

/// Sellable packages: cells left, not expired
pub async fn list_active(store: &dyn Store, owner_id: Uuid) -> ServiceResult<Vec<StockPackage>> {
    let today = today();
    store.list_packages(owner_id, Some(today)).await
}

pub async fn list_all(store: &dyn Store, owner_id: Uuid) -> ServiceResult<Vec<StockPackage>> {
    let today = today();
    Ok(store
        .list_packages(owner_id, None)
        .await?
        .into_iter()
        .map(|p| p.with_read_time_expiry(today))
        .collect())
}

pub async fn get(store: &dyn Store, id: Uuid, owner_id: Uuid) -> ServiceResult<StockPackage> {
    Ok(store
        .find_package(id, owner_id)
        .await?
        .ok_or_else(not_found)?
        .with_read_time_expiry(today()))
}

/// Sales ledger of one of the caller's packages
pub async fn sales_for(
    store: &dyn Store,
    package_id: Uuid,
    owner_id: Uuid,
) -> ServiceResult<Vec<Sale>> {
    if store.find_package(package_id, owner_id).await?.is_none() {
        return Err(not_found().into());
    }
    store.list_sales(package_id).await
}
