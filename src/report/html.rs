//! HTML report rendering
//!
//! Views become `<table class="dataframe">` fragments; the fragments and the
//! report date are substituted into a template with `{{ name }}` placeholders.

use crate::error::{ReportError, ReportResult};
use crate::report::table::{table_lines, TabularRow};
use crate::report::ReportData;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/report_template.html");

/// Render a view as an HTML table
pub fn html_table<T: TabularRow>(rows: &[T]) -> String {
    let (headers, lines) = table_lines(rows);
    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr>");
    for h in &headers {
        html.push_str(&format!("<th>{}</th>", escape(h)));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for line in &lines {
        html.push_str("    <tr>");
        for cell in line {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// An HTML template with `{{ placeholder }}` slots.
///
/// Recognised placeholders: `date`, `area_code`, `data_usage`, `volte_data`,
/// `detail_view`, `zero_data`, `low_usage`.
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    source: String,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReportTemplate {
    pub fn builtin() -> Self {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            ReportError::Render(format!("Failed to read template {}: {}", path.display(), e))
        })?;
        Ok(Self::from_source(source))
    }

    /// Load the configured template, or the built-in one
    pub fn load(path: Option<&Path>) -> ReportResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn render(&self, report: &ReportData) -> ReportResult<String> {
        let values = HashMap::from([
            ("date", escape(&report.date)),
            ("area_code", escape(&report.area_code)),
            ("data_usage", html_table(&report.data_usage)),
            ("volte_data", html_table(&report.volte)),
            ("detail_view", html_table(&report.detail)),
            ("zero_data", html_table(&report.low_traffic.zero_usage)),
            ("low_usage", html_table(&report.low_traffic.low_usage)),
        ]);
        self.substitute(&values)
    }

    fn substitute(&self, values: &HashMap<&str, String>) -> ReportResult<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                ReportError::Render("unterminated '{{' in report template".to_string())
            })?;
            let key = after[..end].trim();
            let value = values.get(key).ok_or_else(|| {
                ReportError::Render(format!("unknown template placeholder '{}'", key))
            })?;
            out.push_str(value);
            rest = &after[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }
}
