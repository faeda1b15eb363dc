//! VLU Report - 4G site telemetry views and PDF reports
//!
//! This library reads a cell-level telemetry workbook, aggregates it per
//! location and derives the views used by the VLU 4G report.
//!
//! # Features
//!
//! - Per-location data usage and VoLTE traffic, filtered by service area
//! - Per-cell detail for a single location
//! - Low-traffic locations and zero-usage cells
//! - HTML/PDF report with the report date taken from the sheet
//! - Configurable sheet names, column mapping and thresholds
//!
//! # Example
//!
//! ```no_run
//! use vlu_report::config::ReportConfig;
//! use vlu_report::core::Aggregator;
//! use vlu_report::excel::load_rows_from_path;
//! use std::path::Path;
//!
//! let config = ReportConfig::default();
//! let rows = load_rows_from_path(Path::new("vlu.xlsx"), &config)?;
//! let summary = Aggregator::build(&rows);
//!
//! for row in Aggregator::data_usage_view(&summary, &config.default_area_code) {
//!     println!("{} {} GB", row.location, row.total_gb);
//! }
//! # Ok::<(), vlu_report::error::ReportError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use config::ReportConfig;
pub use core::Aggregator;
pub use error::{ReportError, ReportResult};
pub use types::{
    CellDetail, LocationSummary, LowTrafficView, LowUsageRow, RawRow, UsageRow, VolteRow,
    ZeroUsageCell,
};
