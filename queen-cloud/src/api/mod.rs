//! HTTP API for queen-cloud
//!
//! Public routes: `/`, `/health`, register and login. Everything under
//! `/api` beyond that is gated by [`require_auth`].

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod productions;
pub mod reports;
pub mod stock;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::routing::{get, post, put};
use axum::{BoxError, Json, Router, middleware};
use http::{HeaderName, HeaderValue};
use shared::error::{AppError, ErrorCode};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::config::Config;
use crate::state::AppState;

/// JSON handler result
pub type ApiResult<T> = Result<Json<T>, AppError>;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Routes that need a signed-in principal
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(auth::me))
        // Orders
        .route("/api/orders", get(orders::list).post(orders::create))
        .route(
            "/api/orders/{id}",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
        // Productions
        .route(
            "/api/productions",
            get(productions::list).post(productions::create),
        )
        .route(
            "/api/productions/{id}",
            get(productions::get)
                .put(productions::update)
                .delete(productions::delete),
        )
        .route(
            "/api/productions/{id}/acceptance",
            put(productions::record_acceptance),
        )
        // Stock
        .route("/api/stock", get(stock::list_active).post(stock::create))
        .route("/api/stock/all", get(stock::list_all))
        .route("/api/stock/{id}", get(stock::get))
        .route("/api/stock/{id}/sell", post(stock::sell))
        .route("/api/stock/{id}/sales", get(stock::sales))
        // Reports
        .route("/api/reports/orders", get(reports::orders))
        .route("/api/reports/productions", get(reports::productions))
        .route("/api/reports/export/csv", get(reports::export_csv))
        .route("/api/reports/export/pdf", get(reports::export_pdf))
        // Dashboard
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/upcoming", get(dashboard::upcoming))
        .route("/api/dashboard/expiring", get(dashboard::expiring))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

/// Map a failed middleware future onto the error envelope
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::new(ErrorCode::TimeoutError)
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        AppError::internal("Internal server error")
    }
}

/// `*` allows any origin, otherwise a comma-separated list
fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application with all routes, middleware and state
pub fn build_router(state: AppState, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                ))),
        )
        .layer(cors_layer(&config.cors_origin))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
        .layer(PropagateRequestIdLayer::new(request_id))
        .with_state(state)
}
