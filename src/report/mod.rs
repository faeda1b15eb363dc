//! Report assembly
//!
//! Collects the four views for the configured area code, renders them through
//! the HTML template and converts the result to PDF.

mod html;
mod pdf;
mod table;

pub use html::{html_table, ReportTemplate};
pub use pdf::{renderer_for, CommandPdfRenderer, PdfRenderer, PrintPdfRenderer};
pub use table::{format_number, table_lines, TabularRow};

use crate::config::ReportConfig;
use crate::core::Aggregator;
use crate::error::ReportResult;
use crate::types::{CellDetail, LowTrafficView, RawRow, UsageRow, VolteRow};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

/// Report dates are always shown day-first
pub const DATE_FORMAT: &str = "%d-%m-%Y";

pub const PDF_MIME: &str = "application/pdf";

/// Date in the configured report cell, or `today` when it is blank or unparseable
pub fn report_date(rows: &[RawRow], row_index: usize, today: NaiveDate) -> NaiveDate {
    match rows.get(row_index).and_then(|r| r.report_date) {
        Some(date) => date,
        None => {
            warn!(
                row = row_index,
                fallback = %today.format(DATE_FORMAT),
                "no report date in sheet, using today's date"
            );
            today
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `VLU_4G_Report_<DD-MM-YYYY>.pdf`
pub fn report_file_name(date: &str) -> String {
    format!("VLU_4G_Report_{}.pdf", date)
}

/// Everything the templates and renderers need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    /// DD-MM-YYYY
    pub date: String,
    pub area_code: String,
    /// Location shown in the detail section
    pub detail_location: Option<String>,
    pub data_usage: Vec<UsageRow>,
    pub volte: Vec<VolteRow>,
    pub detail: Vec<CellDetail>,
    pub low_traffic: LowTrafficView,
}

impl ReportData {
    /// Compute every view against the configured default area code.
    ///
    /// Without an explicit `location` the detail section shows the first
    /// location in sorted order.
    pub fn assemble(
        rows: &[RawRow],
        config: &ReportConfig,
        location: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        let summary = Aggregator::build(rows);
        let area = config.default_area_code.as_str();

        let detail_location = match location {
            Some(loc) => Some(loc.to_string()),
            None => Aggregator::locations(&summary).into_iter().next(),
        };
        let detail = detail_location
            .as_deref()
            .map(|loc| Aggregator::location_detail(rows, loc))
            .unwrap_or_default();

        Self {
            date: format_date(report_date(rows, config.report_date_row, today)),
            area_code: config.default_area_code.clone(),
            detail_location,
            data_usage: Aggregator::data_usage_view(&summary, area),
            volte: Aggregator::volte_view(&summary, area),
            detail,
            low_traffic: Aggregator::new(config.low_usage_threshold)
                .low_traffic_view(&summary, rows, area),
        }
    }

    pub fn file_name(&self) -> String {
        report_file_name(&self.date)
    }
}

/// A rendered report
#[derive(Debug, Clone)]
pub struct Report {
    pub file_name: String,
    pub html: String,
    pub pdf: Vec<u8>,
}

/// Render already-assembled report data with an explicit renderer
pub fn render_report(
    data: &ReportData,
    template: &ReportTemplate,
    renderer: &dyn PdfRenderer,
) -> ReportResult<Report> {
    let html = template.render(data)?;
    let pdf = renderer.render(&html, data)?;
    let file_name = data.file_name();
    info!(file = %file_name, bytes = pdf.len(), "generated report");
    Ok(Report {
        file_name,
        html,
        pdf,
    })
}

/// Assemble and render the report with the configured template and renderer
pub fn generate_report(
    rows: &[RawRow],
    config: &ReportConfig,
    location: Option<&str>,
    today: NaiveDate,
) -> ReportResult<Report> {
    let data = ReportData::assemble(rows, config, location, today);
    let template = ReportTemplate::load(config.template.as_deref())?;
    let renderer = renderer_for(config);
    render_report(&data, &template, renderer.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows() -> Vec<RawRow> {
        vec![
            RawRow::new("Beta", "BETA_L1", "Villupuram", 20.0, 0.5),
            RawRow::new("Alpha", "ALPHA_L1", "Villupuram", 5.0, 1.0)
                .with_report_date(date(2025, 3, 15)),
            RawRow::new("Alpha", "ALPHA_L2", "Villupuram", 0.0, 2.0),
            RawRow::new("Gamma", "GAMMA_L1", "Tindivanam", 1.0, 0.1),
        ]
    }

    #[test]
    fn test_report_date_from_fixed_row() {
        assert_eq!(report_date(&rows(), 1, date(2026, 1, 1)), date(2025, 3, 15));
    }

    #[test]
    fn test_report_date_falls_back_to_today() {
        let today = date(2026, 10, 18);
        assert_eq!(report_date(&rows(), 0, today), today);
        assert_eq!(report_date(&rows(), 99, today), today);
        assert_eq!(report_date(&[], 1, today), today);
    }

    #[test]
    fn test_file_name_format() {
        assert_eq!(format_date(date(2025, 3, 5)), "05-03-2025");
        assert_eq!(report_file_name("05-03-2025"), "VLU_4G_Report_05-03-2025.pdf");
    }

    #[test]
    fn test_assemble_uses_default_area() {
        let data = ReportData::assemble(&rows(), &ReportConfig::default(), None, date(2026, 1, 1));
        assert_eq!(data.date, "15-03-2025");
        assert_eq!(data.file_name(), "VLU_4G_Report_15-03-2025.pdf");
        let usage: Vec<_> = data.data_usage.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(usage, vec!["Beta", "Alpha"]);
        let volte: Vec<_> = data.volte.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(volte, vec!["Alpha", "Beta"]);
        assert_eq!(data.low_traffic.low_usage.len(), 1);
        assert_eq!(data.low_traffic.zero_usage.len(), 1);
        assert_eq!(data.low_traffic.zero_usage[0].cell_name, "ALPHA_L2");
    }

    #[test]
    fn test_assemble_detail_defaults_to_first_sorted_location() {
        let data = ReportData::assemble(&rows(), &ReportConfig::default(), None, date(2026, 1, 1));
        assert_eq!(data.detail_location.as_deref(), Some("Alpha"));
        assert_eq!(data.detail.len(), 2);

        let data = ReportData::assemble(
            &rows(),
            &ReportConfig::default(),
            Some("gamma"),
            date(2026, 1, 1),
        );
        assert_eq!(data.detail.len(), 1);
        assert_eq!(data.detail[0].cell_name, "GAMMA_L1");
    }

    #[test]
    fn test_assemble_empty_rows() {
        let today = date(2026, 10, 18);
        let data = ReportData::assemble(&[], &ReportConfig::default(), None, today);
        assert_eq!(data.date, "18-10-2026");
        assert_eq!(data.detail_location, None);
        assert!(data.data_usage.is_empty());
        assert!(data.detail.is_empty());
    }

    #[test]
    fn test_generate_report_builtin_template() {
        let report =
            generate_report(&rows(), &ReportConfig::default(), None, date(2026, 1, 1)).unwrap();
        assert_eq!(report.file_name, "VLU_4G_Report_15-03-2025.pdf");
        assert!(report.html.contains("15-03-2025"));
        assert!(report.html.contains("<td>Beta</td>"));
        assert!(!report.html.contains("{{"));
        assert!(report.pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_generate_report_missing_template_fails() {
        let config = ReportConfig {
            template: Some("/nonexistent/report.html".into()),
            ..ReportConfig::default()
        };
        let result = generate_report(&rows(), &config, None, date(2026, 1, 1));
        assert!(matches!(result, Err(crate::error::ReportError::Render(_))));
    }
}
