use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//==============================================================================
// Raw per-cell records
//==============================================================================

/// One row of the raw sheet: a single 4G cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Grouping key. `None` when the cell was blank.
    pub location: Option<String>,
    pub cell_name: String,
    /// Service-area code (SDCA)
    pub area_code: String,
    /// Zero when the usage cell was blank; see `usage_missing`
    pub total_gb: f64,
    pub volte_erlang: f64,
    pub report_date: Option<NaiveDate>,
    /// The usage cell was blank or not a number
    #[serde(default)]
    pub usage_missing: bool,
}

impl RawRow {
    pub fn new(
        location: impl Into<String>,
        cell_name: impl Into<String>,
        area_code: impl Into<String>,
        total_gb: f64,
        volte_erlang: f64,
    ) -> Self {
        Self {
            location: Some(location.into()),
            cell_name: cell_name.into(),
            area_code: area_code.into(),
            total_gb,
            volte_erlang,
            report_date: None,
            usage_missing: false,
        }
    }

    /// Same row with no usage figure reported
    pub fn without_usage(mut self) -> Self {
        self.total_gb = 0.0;
        self.usage_missing = true;
        self
    }

    /// Usage is a real numeric zero
    pub fn is_zero_usage(&self) -> bool {
        !self.usage_missing && self.total_gb == 0.0
    }

    pub fn with_report_date(mut self, date: NaiveDate) -> Self {
        self.report_date = Some(date);
        self
    }
}

//==============================================================================
// Aggregates
//==============================================================================

/// Totals for one distinct location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub location: String,
    pub total_gb: f64,
    /// Area code of the first raw row seen for this location
    pub area_code: String,
    pub volte_erlang: f64,
}

//==============================================================================
// View projections
//==============================================================================

/// Row of the data-usage view. `rank` is display order, starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    pub rank: usize,
    pub location: String,
    pub total_gb: f64,
    pub volte_erlang: f64,
}

/// Row of the VoLTE view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolteRow {
    pub rank: usize,
    pub location: String,
    pub volte_erlang: f64,
    pub total_gb: f64,
}

/// Per-cell line of the location detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDetail {
    pub location: String,
    pub cell_name: String,
    pub total_gb: f64,
    pub volte_erlang: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowUsageRow {
    pub location: String,
    pub total_gb: f64,
    pub area_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroUsageCell {
    pub location: String,
    pub cell_name: String,
    pub volte_erlang: f64,
    pub total_gb: f64,
}

/// Locations under the usage threshold, and cells that carried no data at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LowTrafficView {
    pub low_usage: Vec<LowUsageRow>,
    pub zero_usage: Vec<ZeroUsageCell>,
}
