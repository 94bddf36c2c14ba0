//! Order endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{CustomerOrder, OrderCreate, OrderUpdate};
use uuid::Uuid;

use super::ApiResult;
use crate::auth::CurrentPrincipal;
use crate::services::orders;
use crate::state::AppState;

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
) -> ApiResult<Vec<CustomerOrder>> {
    Ok(Json(orders::list(state.store(), current.id).await?))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<CustomerOrder> {
    Ok(Json(orders::create(state.store(), current.id, req).await?))
}

/// GET /api/orders/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
) -> ApiResult<CustomerOrder> {
    Ok(Json(orders::get(state.store(), id, current.id).await?))
}

/// PUT /api/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
    Json(req): Json<OrderUpdate>,
) -> ApiResult<CustomerOrder> {
    Ok(Json(orders::update(state.store(), id, current.id, req).await?))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse, AppError> {
    orders::delete(state.store(), id, current.id).await?;
    Ok(ApiResponse::ok_with_message("Order deleted"))
}
