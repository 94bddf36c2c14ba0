//! Stock endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::AppError;
use shared::models::{Sale, SaleCreate, StockCreate, StockPackage};
use uuid::Uuid;

use super::ApiResult;
use crate::auth::CurrentPrincipal;
use crate::services::inventory;
use crate::state::AppState;

/// GET /api/stock (sellable packages only)
pub async fn list_active(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Vec<StockPackage>> {
    Ok(Json(inventory::list_active(state.store(), current.id).await?))
}

/// GET /api/stock/all
pub async fn list_all(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Vec<StockPackage>> {
    Ok(Json(inventory::list_all(state.store(), current.id).await?))
}

/// POST /api/stock
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Json(req): Json<StockCreate>,
) -> ApiResult<StockPackage> {
    Ok(Json(
        inventory::create_package(state.store(), current.id, req).await?,
    ))
}

/// GET /api/stock/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
) -> ApiResult<StockPackage> {
    Ok(Json(inventory::get(state.store(), id, current.id).await?))
}

/// POST /api/stock/{id}/sell
pub async fn sell(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
    Json(req): Json<SaleCreate>,
) -> Result<(StatusCode, Json<StockPackage>), AppError> {
    let package = inventory::sell(state.store(), id, current.id, req).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

/// GET /api/stock/{id}/sales
pub async fn sales(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<Sale>> {
    Ok(Json(inventory::sales_for(state.store(), id, current.id).await?))
}
