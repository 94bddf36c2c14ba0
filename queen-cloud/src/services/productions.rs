//! Production ledger

use shared::error::{AppError, ErrorCode};
use shared::models::{AcceptanceUpdate, ProductionBatch, ProductionCreate, ProductionUpdate};
use shared::util::{now_millis, today};
use uuid::Uuid;

use crate::db::Store;
use crate::error::ServiceResult;

fn not_found() -> AppError {
    AppError::new(ErrorCode::ProductionNotFound)
}

/// A referenced order must belong to the same owner
async fn check_order(store: &dyn Store, order_id: Option<Uuid>, owner_id: Uuid) -> ServiceResult<()> {
    let Some(order_id) = order_id else {
        return Ok(());
    };
    if store.find_order(order_id, owner_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::ProductionOrderInvalid)
            .with_detail("order_id", order_id.to_string())
            .into());
    }
    Ok(())
}

pub async fn list(store: &dyn Store, owner_id: Uuid) -> ServiceResult<Vec<ProductionBatch>> {
    store.list_batches(owner_id).await
}

/// Create a batch together with its hive groups
pub async fn create(
    store: &dyn Store,
    owner_id: Uuid,
    data: ProductionCreate,
) -> ServiceResult<ProductionBatch> {
    data.validate()?;
    check_order(store, data.order_id, owner_id).await?;
    let batch = data.into_batch(owner_id, now_millis());
    store.insert_batch(&batch).await?;
    Ok(batch)
}

pub async fn get(store: &dyn Store, id: Uuid, owner_id: Uuid) -> ServiceResult<ProductionBatch> {
    Ok(store.find_batch(id, owner_id).await?.ok_or_else(not_found)?)
}

pub async fn update(
    store: &dyn Store,
    id: Uuid,
    owner_id: Uuid,
    data: ProductionUpdate,
) -> ServiceResult<ProductionBatch> {
    data.validate()?;
    let mut batch = get(store, id, owner_id).await?;
    check_order(store, data.order_id, owner_id).await?;
    let hives = data.apply_to(&mut batch, now_millis());
    if !store.update_batch(&batch, hives.as_deref()).await? {
        return Err(not_found().into());
    }
    Ok(batch)
}

/// Set acceptance figures; calling again overwrites them
pub async fn record_acceptance(
    store: &dyn Store,
    id: Uuid,
    owner_id: Uuid,
    data: AcceptanceUpdate,
) -> ServiceResult<ProductionBatch> {
    let date = data.resolved_date(today());
    Ok(store
        .record_acceptance(id, owner_id, data.accepted_cells, date, now_millis())
        .await?
        .ok_or_else(not_found)?)
}

/// Delete a batch with its hive groups, packages and their sales
pub async fn delete(store: &dyn Store, id: Uuid, owner_id: Uuid) -> ServiceResult<()> {
    if !store.delete_batch(id, owner_id).await? {
        return Err(not_found().into());
    }
    tracing::info!(batch_id = %id, "Production batch deleted");
    Ok(())
}
