//! Column layout of every view, shared by the terminal, HTML and PDF output

use crate::types::{CellDetail, LowUsageRow, UsageRow, VolteRow, ZeroUsageCell};

/// A view row that can be laid out as a table line
pub trait TabularRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl TabularRow for UsageRow {
    fn headers() -> &'static [&'static str] {
        &["Location", "Total_GB", "VOLTE_ERL"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            format_number(self.total_gb),
            format_number(self.volte_erlang),
        ]
    }
}

impl TabularRow for VolteRow {
    fn headers() -> &'static [&'static str] {
        &["Location", "VOLTE_ERL", "Total_GB"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            format_number(self.volte_erlang),
            format_number(self.total_gb),
        ]
    }
}

impl TabularRow for CellDetail {
    fn headers() -> &'static [&'static str] {
        &["Location", "4G Cell Name", "Total (GB)", "VOLTE Traffic"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            self.cell_name.clone(),
            format_number(self.total_gb),
            format_number(self.volte_erlang),
        ]
    }
}

impl TabularRow for LowUsageRow {
    fn headers() -> &'static [&'static str] {
        &["Location", "Total_GB", "SDCA"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            format_number(self.total_gb),
            self.area_code.clone(),
        ]
    }
}

impl TabularRow for ZeroUsageCell {
    fn headers() -> &'static [&'static str] {
        &["Location", "4G Cell Name", "VOLTE Traffic", "Total (GB)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.location.clone(),
            self.cell_name.clone(),
            format_number(self.volte_erlang),
            format_number(self.total_gb),
        ]
    }
}

/// Headers and cell text of a whole view
pub fn table_lines<T: TabularRow>(rows: &[T]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = T::headers().iter().map(|h| h.to_string()).collect();
    let lines = rows.iter().map(TabularRow::cells).collect();
    (headers, lines)
}

/// Format a number for display, removing unnecessary decimal places
pub fn format_number(n: f64) -> String {
    let rounded = (n * 1e4).round() / 1e4;
    let text = format!("{:.4}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
