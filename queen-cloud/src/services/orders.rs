//! Order ledger

use shared::error::{AppError, ErrorCode};
use shared::models::{CustomerOrder, OrderCreate, OrderUpdate};
use shared::util::now_millis;
use uuid::Uuid;

use crate::db::Store;
use crate::error::ServiceResult;

fn not_found() -> AppError {
    AppError::new(ErrorCode::OrderNotFound)
}

pub async fn list(store: &dyn Store, owner_id: Uuid) -> ServiceResult<Vec<CustomerOrder>> {
    store.list_orders(owner_id).await
}

pub async fn create(
    store: &dyn Store,
    owner_id: Uuid,
    data: OrderCreate,
) -> ServiceResult<CustomerOrder> {
    data.validate()?;
    let order = data.into_order(owner_id, now_millis());
    store.insert_order(&order).await?;
    Ok(order)
}

pub async fn get(store: &dyn Store, id: Uuid, owner_id: Uuid) -> ServiceResult<CustomerOrder> {
    Ok(store.find_order(id, owner_id).await?.ok_or_else(not_found)?)
}

pub async fn update(
    store: &dyn Store,
    id: Uuid,
    owner_id: Uuid,
    data: OrderUpdate,
) -> ServiceResult<CustomerOrder> {
    data.validate()?;
    let mut order = get(store, id, owner_id).await?;
    data.apply_to(&mut order, now_millis());
    if !store.update_order(&order).await? {
        return Err(not_found().into());
    }
    Ok(order)
}

pub async fn delete(store: &dyn Store, id: Uuid, owner_id: Uuid) -> ServiceResult<()> {
    if !store.delete_order(id, owner_id).await? {
        return Err(not_found().into());
    }
    tracing::info!(order_id = %id, "Order deleted");
    Ok(())
}
