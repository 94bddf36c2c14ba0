//! Report filters and exports

use shared::models::{CustomerOrder, OrderFilter, ProductionBatch, ProductionFilter, ReportType};
use uuid::Uuid;

use crate::db::Store;
use crate::error::ServiceResult;
use crate::report::{self, ExportFile, ExportFormat};

pub async fn filter_orders(
    store: &dyn Store,
    owner_id: Uuid,
    filter: &OrderFilter,
) -> ServiceResult<Vec<CustomerOrder>> {
    store.filter_orders(owner_id, filter).await
}

pub async fn filter_productions(
    store: &dyn Store,
    owner_id: Uuid,
    filter: &ProductionFilter,
) -> ServiceResult<Vec<ProductionBatch>> {
    store.filter_batches(owner_id, filter).await
}

/// Export the filtered ledger; fails with `ExportEmpty` when nothing matches
pub async fn export(
    store: &dyn Store,
    owner_id: Uuid,
    report_type: ReportType,
    format: ExportFormat,
    filter: &OrderFilter,
) -> ServiceResult<ExportFile> {
    let table = match report_type {
        ReportType::Orders => {
            let orders = filter_orders(store, owner_id, filter).await?;
            report::orders_table(&orders, format)
        }
        ReportType::Productions => {
            let batches = filter_productions(store, owner_id, &filter.into()).await?;
            report::productions_table(&batches, format)
        }
    };

    let bytes = report::render(&table, format)?;
    tracing::debug!(
        report_type = report_type.as_str(),
        rows = table.rows.len(),
        "Report exported"
    );
    Ok(ExportFile {
        content_type: format.content_type(),
        filename: format.filename(report_type),
        bytes,
    })
}
