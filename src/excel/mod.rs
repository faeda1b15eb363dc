//! Excel ingestion
//!
//! The only place that knows about sheet names and column letters. Everything
//! past this boundary works with named [`RawRow`] fields.

mod cells;
mod columns;
mod importer;

pub use cells::{cell_date, cell_number, cell_text, parse_date_text, serial_to_date};
pub use columns::{index_to_letter, letter_to_index};
pub use importer::{SheetTable, TelemetryWorkbook, WorkbookImporter};

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::types::RawRow;
use std::path::Path;

/// Read the raw rows of a workbook file
pub fn load_rows_from_path(path: &Path, config: &ReportConfig) -> ReportResult<Vec<RawRow>> {
    WorkbookImporter::new(config.sheets.clone())
        .import_path(path)?
        .raw_rows(&config.columns)
}

/// Read the raw rows of an uploaded workbook
pub fn load_rows_from_bytes(bytes: &[u8], config: &ReportConfig) -> ReportResult<Vec<RawRow>> {
    WorkbookImporter::new(config.sheets.clone())
        .import_bytes(bytes)?
        .raw_rows(&config.columns)
}
