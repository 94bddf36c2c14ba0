//! CSV serializer

use super::{ReportError, ReportTable};

/// Encode `table` as CSV with a header row. Refuses an empty table.
pub fn to_csv(table: &ReportTable) -> Result<Vec<u8>, ReportError> {
    if table.is_empty() {
        return Err(ReportError::Empty);
    }

    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::Buffer(e.to_string()))
}
