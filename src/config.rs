//! Report configuration
//!
//! Every constant the report depends on lives here: the default service area,
//! the low-usage threshold, sheet names, and the column table that maps the
//! raw sheet's columns to named fields. Defaults match the VLU workbook layout;
//! any field may be overridden from a YAML file.

use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_AREA_CODE: &str = "Villupuram";
pub const DEFAULT_LOW_USAGE_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Area code every report view is computed against
    pub default_area_code: String,
    /// Locations strictly below this many GB are "low traffic"
    pub low_usage_threshold: f64,
    pub sheets: SheetNames,
    pub columns: ColumnMap,
    /// Data row (0-based, header excluded) holding the report date
    pub report_date_row: usize,
    /// Custom HTML template; the built-in one is used when unset
    pub template: Option<PathBuf>,
    pub pdf: PdfConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_area_code: DEFAULT_AREA_CODE.to_string(),
            low_usage_threshold: DEFAULT_LOW_USAGE_THRESHOLD,
            sheets: SheetNames::default(),
            columns: ColumnMap::default(),
            report_date_row: 1,
            template: None,
            pdf: PdfConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetNames {
    /// Per-cell raw table
    pub raw: String,
    /// Site list. Must be present, not read by any view.
    pub site_list: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            raw: "Sheet1".to_string(),
            site_list: "SITELIST".to_string(),
        }
    }
}

/// Raw-sheet column for each field.
///
/// A key is matched against the header row first; if no header matches and the
/// key is a column letter, it addresses that column by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMap {
    pub location: String,
    pub cell_name: String,
    pub total_gb: String,
    pub volte_erlang: String,
    pub area_code: String,
    pub report_date: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            location: "G".to_string(),
            cell_name: "I".to_string(),
            total_gb: "L".to_string(),
            volte_erlang: "Q".to_string(),
            area_code: "S".to_string(),
            report_date: "R".to_string(),
        }
    }
}

impl ColumnMap {
    /// (field name, column key) pairs in a fixed order
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("location", &self.location),
            ("cell_name", &self.cell_name),
            ("total_gb", &self.total_gb),
            ("volte_erlang", &self.volte_erlang),
            ("area_code", &self.area_code),
            ("report_date", &self.report_date),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Lay the report out directly with printpdf. Ignores the HTML template.
    Native,
    /// Pipe the rendered HTML through an external converter
    Command,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfConfig {
    /// Unset means `command` when a custom template is configured, `native` otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<RendererKind>,
    /// Program and arguments; reads HTML on stdin, writes PDF on stdout
    pub command: Vec<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            renderer: None,
            command: vec![
                "wkhtmltopdf".to_string(),
                "--quiet".to_string(),
                "-".to_string(),
                "-".to_string(),
            ],
        }
    }
}

impl ReportConfig {
    /// Parse and validate a YAML configuration file
    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded report configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> ReportResult<Self> {
        let config: ReportConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> ReportResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> ReportResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ReportResult<()> {
        validate_threshold(self.low_usage_threshold)?;

        if self.sheets.raw.trim().is_empty() || self.sheets.site_list.trim().is_empty() {
            return Err(ReportError::Config(
                "sheet names must not be empty".to_string(),
            ));
        }

        for (field, key) in self.columns.entries() {
            if key.trim().is_empty() {
                return Err(ReportError::Config(format!(
                    "column for '{}' must not be empty",
                    field
                )));
            }
        }

        if self.template.is_some() && self.pdf.renderer == Some(RendererKind::Native) {
            return Err(ReportError::Config(
                "a custom template needs pdf.renderer 'command'; the native renderer does not use HTML"
                    .to_string(),
            ));
        }

        if self.renderer_kind() == RendererKind::Command && self.pdf.command.is_empty() {
            return Err(ReportError::Config(
                "pdf.command is required when pdf.renderer is 'command'".to_string(),
            ));
        }

        Ok(())
    }

    /// Renderer in effect: the configured one, else `command` for a custom template
    pub fn renderer_kind(&self) -> RendererKind {
        match (self.pdf.renderer, &self.template) {
            (Some(kind), _) => kind,
            (None, Some(_)) => RendererKind::Command,
            (None, None) => RendererKind::Native,
        }
    }
}

/// Thresholds must be finite and non-negative
pub fn validate_threshold(threshold: f64) -> ReportResult<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ReportError::Config(format!(
            "low_usage_threshold must be a non-negative number, got {}",
            threshold
        )));
    }
    Ok(())
}
