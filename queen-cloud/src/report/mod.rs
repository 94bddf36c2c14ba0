//! Report export
//!
//! Records are first flattened into a [`ReportTable`] (header + string rows),
//! then handed to one of the serializers:
//! - [`csv::to_csv`]: comma-separated text with a header row
//! - [`pdf::to_pdf`]: paginated single-table document with a shaded header
//!
//! Both refuse an empty table with [`ReportError::Empty`].

pub mod csv;
pub mod pdf;

use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::{CustomerOrder, ProductionBatch, ReportType};
use thiserror::Error;

use crate::error::ServiceError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no rows to export")]
    Empty,
    #[error("csv encoding failed: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("csv buffer: {0}")]
    Buffer(String),
}

impl From<ReportError> for ServiceError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Empty => ServiceError::App(AppError::empty()),
            other => ServiceError::Db(other.into()),
        }
    }
}

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// `orders_report.csv`, `productions_report.pdf`, ...
    pub fn filename(&self, report_type: ReportType) -> String {
        format!("{}_report.{}", report_type.as_str(), self.extension())
    }
}

/// Rendered export ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub content_type: &'static str,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Header plus rows of already formatted cells
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Shorten a UUID to its first 8 characters plus `...`
pub fn short_id(id: &uuid::Uuid) -> String {
    let full = id.to_string();
    format!("{}...", &full[..8])
}

pub fn orders_table(orders: &[CustomerOrder], format: ExportFormat) -> ReportTable {
    let headers = match format {
        ExportFormat::Csv => vec!["ID", "Customer Name", "Number of Cells", "Delivery Date", "Status"],
        ExportFormat::Pdf => vec!["ID", "Customer", "Cells", "Delivery Date", "Status"],
    };
    let rows = orders
        .iter()
        .map(|o| {
            vec![
                format_id(&o.id, format),
                o.customer_name.clone(),
                o.number_of_cells.to_string(),
                o.delivery_date.to_string(),
                o.status.clone(),
            ]
        })
        .collect();
    ReportTable { headers, rows }
}

pub fn productions_table(batches: &[ProductionBatch], format: ExportFormat) -> ReportTable {
    let headers = match format {
        ExportFormat::Csv => vec![
            "ID",
            "Transfer Date",
            "Larvae Transferred",
            "Accepted Cells",
            "Cells Produced",
            "Status",
        ],
        ExportFormat::Pdf => vec!["ID", "Transfer Date", "Larvae", "Accepted", "Produced", "Status"],
    };
    let missing = match format {
        ExportFormat::Csv => "",
        ExportFormat::Pdf => "-",
    };
    let rows = batches
        .iter()
        .map(|b| {
            vec![
                format_id(&b.id, format),
                b.transfer_date.to_string(),
                b.larvae_transferred.to_string(),
                b.accepted_cells
                    .map_or_else(|| missing.to_string(), |c| c.to_string()),
                b.cells_produced.to_string(),
                b.status.clone(),
            ]
        })
        .collect();
    ReportTable { headers, rows }
}

fn format_id(id: &uuid::Uuid, format: ExportFormat) -> String {
    match format {
        ExportFormat::Csv => id.to_string(),
        ExportFormat::Pdf => short_id(id),
    }
}

/// Serialize `table` in `format`
pub fn render(table: &ReportTable, format: ExportFormat) -> Result<Vec<u8>, ReportError> {
    match format {
        ExportFormat::Csv => csv::to_csv(table),
        ExportFormat::Pdf => pdf::to_pdf(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn batch(accepted: Option<i32>) -> ProductionBatch {
        ProductionBatch {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            transfer_date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            larvae_transferred: 60,
            accepted_cells: accepted,
            acceptance_date: None,
            cells_produced: 0,
            order_id: None,
            notes: None,
            status: "active".into(),
            created_at: 0,
            updated_at: 0,
            hives: vec![],
        }
    }

    #[test]
    fn short_id_keeps_eight_chars() {
        let id = Uuid::new_v4();
        let short = short_id(&id);
        assert_eq!(short.len(), 11);
        assert!(short.ends_with("..."));
        assert!(id.to_string().starts_with(&short[..8]));
    }

    #[test]
    fn missing_acceptance_renders_per_format() {
        let batches = [batch(None)];
        assert_eq!(productions_table(&batches, ExportFormat::Csv).rows[0][3], "");
        assert_eq!(productions_table(&batches, ExportFormat::Pdf).rows[0][3], "-");
        let accepted = [batch(Some(41))];
        assert_eq!(productions_table(&accepted, ExportFormat::Csv).rows[0][3], "41");
    }

    #[test]
    fn filenames_follow_report_type() {
        assert_eq!(ExportFormat::Csv.filename(ReportType::Orders), "orders_report.csv");
        assert_eq!(
            ExportFormat::Pdf.filename(ReportType::Productions),
            "productions_report.pdf"
        );
    }

    #[test]
    fn empty_error_maps_to_export_empty() {
        let err: ServiceError = ReportError::Empty.into();
        assert_eq!(err.code(), Some(shared::error::ErrorCode::ExportEmpty));
    }
}
