use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Sheet '{sheet}' not found in workbook (available: {})", available.join(", "))]
    MissingSheet {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' for {field} not found in sheet '{sheet}'")]
    MissingColumn {
        column: String,
        field: String,
        sheet: String,
    },

    #[error("No rows to aggregate")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report rendering error: {0}")]
    Render(String),
}

impl ReportError {
    /// Ingestion errors abort every view; rendering errors only the report.
    pub fn is_ingestion(&self) -> bool {
        matches!(
            self,
            ReportError::Workbook(_)
                | ReportError::MissingSheet { .. }
                | ReportError::MissingColumn { .. }
        )
    }
}
