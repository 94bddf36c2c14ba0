//! Report endpoints: filtered listings and file exports

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{CustomerOrder, OrderFilter, ProductionBatch, ProductionFilter, ReportType};

use super::ApiResult;
use crate::auth::CurrentPrincipal;
use crate::report::{ExportFile, ExportFormat};
use crate::services::reports;
use crate::state::AppState;

/// Query string of the export endpoints
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub report_type: Option<String>,
    #[serde(alias = "start")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "end")]
    pub end_date: Option<NaiveDate>,
}

impl ExportQuery {
    fn report_type(&self) -> Result<ReportType, AppError> {
        self.report_type.as_deref().unwrap_or_default().parse()
    }

    fn filter(&self) -> OrderFilter {
        OrderFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            ..Default::default()
        }
    }
}

/// GET /api/reports/orders
pub async fn orders(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Query(filter): Query<OrderFilter>,
) -> ApiResult<Vec<CustomerOrder>> {
    Ok(Json(
        reports::filter_orders(state.store(), current.id, &filter).await?,
    ))
}

/// GET /api/reports/productions
pub async fn productions(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Query(filter): Query<ProductionFilter>,
) -> ApiResult<Vec<ProductionBatch>> {
    Ok(Json(
        reports::filter_productions(state.store(), current.id, &filter).await?,
    ))
}

/// GET /api/reports/export/csv
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    export(&state, &current, &query, ExportFormat::Csv).await
}

/// GET /api/reports/export/pdf
pub async fn export_pdf(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentPrincipal>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    export(&state, &current, &query, ExportFormat::Pdf).await
}

async fn export(
    state: &AppState,
    current: &CurrentPrincipal,
    query: &ExportQuery,
    format: ExportFormat,
) -> Result<Response, AppError> {
    let report_type = query.report_type()?;
    let file = reports::export(
        state.store(),
        current.id,
        report_type,
        format,
        &query.filter(),
    )
    .await?;
    Ok(attachment(file))
}

fn attachment(file: ExportFile) -> Response {
    let disposition = format!("attachment; filename={}", file.filename);
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}
