//! PDF rendering
//!
//! Two renderers: [`PrintPdfRenderer`] lays the report tables out directly,
//! [`CommandPdfRenderer`] hands the rendered HTML to an external converter.

use crate::config::{RendererKind, ReportConfig};
use crate::error::{ReportError, ReportResult};
use crate::report::table::{table_lines, TabularRow};
use crate::report::ReportData;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Converts a rendered report to PDF bytes
pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str, report: &ReportData) -> ReportResult<Vec<u8>>;
}

/// Build the renderer selected in the configuration
pub fn renderer_for(config: &ReportConfig) -> Box<dyn PdfRenderer> {
    match config.renderer_kind() {
        RendererKind::Native => Box::new(PrintPdfRenderer),
        RendererKind::Command => Box::new(CommandPdfRenderer::new(config.pdf.command.clone())),
    }
}

//==============================================================================
// Native layout
//==============================================================================

// A4 portrait, millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LINE_HEIGHT: f32 = 5.5;
const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 9.0;
/// Rough Helvetica glyph width at BODY_SIZE, used to clip long cells
const CHAR_WIDTH: f32 = 1.7;

/// Lays the report out as plain tables with the PDF base-14 fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPdfRenderer;

impl PdfRenderer for PrintPdfRenderer {
    fn render(&self, _html: &str, report: &ReportData) -> ReportResult<Vec<u8>> {
        let title = format!("VLU 4G Report {}", report.date);
        let (doc, page, layer) = PdfDocument::new(
            title.as_str(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(format!("PDF font error: {:?}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(format!("PDF font error: {:?}", e)))?;

        let layer = doc.get_page(page).get_layer(layer);
        let mut writer = PageWriter {
            doc: &doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        };

        writer.line("VLU 4G Report", TITLE_SIZE, true);
        writer.line(&format!("Report date: {}", report.date), BODY_SIZE, false);
        writer.gap();

        writer.section(
            &format!("Location-wise Data Usage - SDCA: {}", report.area_code),
            &report.data_usage,
        );
        writer.section(
            &format!("Location-wise VOLTE Call Report - SDCA: {}", report.area_code),
            &report.volte,
        );
        let detail_title = match &report.detail_location {
            Some(loc) => format!("Location Detail View - {}", loc),
            None => "Location Detail View".to_string(),
        };
        writer.section(&detail_title, &report.detail);
        writer.section("Zero Data Sectors", &report.low_traffic.zero_usage);

        let pages = writer.pages;
        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ReportError::Render(format!("PDF write error: {:?}", e)))?;
        debug!(pages, bytes = bytes.len(), "rendered PDF report");
        Ok(bytes)
    }
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, from the page bottom
    y: f32,
    pages: usize,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, lines: usize) {
        if self.y - lines as f32 * LINE_HEIGHT < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
            self.pages += 1;
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_room(1);
        self.text(text, size, MARGIN, bold);
        self.y -= LINE_HEIGHT * (size / BODY_SIZE).max(1.0);
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT;
    }

    fn row(&mut self, cells: &[String], bold: bool) {
        self.ensure_room(1);
        let width = (PAGE_WIDTH - 2.0 * MARGIN) / cells.len().max(1) as f32;
        let max_chars = ((width - 2.0) / CHAR_WIDTH).max(1.0) as usize;
        for (i, cell) in cells.iter().enumerate() {
            let clipped = clip(cell, max_chars);
            self.text(&clipped, BODY_SIZE, MARGIN + i as f32 * width, bold);
        }
        self.y -= LINE_HEIGHT;
    }

    /// Heading plus table; the heading never ends up alone at a page bottom
    fn section<T: TabularRow>(&mut self, heading: &str, rows: &[T]) {
        let (headers, lines) = table_lines(rows);
        self.ensure_room(4);
        self.line(heading, HEADING_SIZE, true);
        self.row(&headers, true);
        if lines.is_empty() {
            self.line("(no rows)", BODY_SIZE, false);
        }
        for line in &lines {
            self.row(line, false);
        }
        self.gap();
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    clipped.push_str("..");
    clipped
}

//==============================================================================
// External converter
//==============================================================================

/// Pipes HTML through a converter that reads stdin and writes PDF to stdout
/// (e.g. `wkhtmltopdf --quiet - -`)
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    command: Vec<String>,
}

impl CommandPdfRenderer {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl PdfRenderer for CommandPdfRenderer {
    fn render(&self, html: &str, _report: &ReportData) -> ReportResult<Vec<u8>> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| ReportError::Render("no PDF converter command configured".to_string()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReportError::Render(format!("Failed to start '{}': {}", program, e)))?;

        // Converters may write output before reading all of stdin
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReportError::Render("converter stdin unavailable".to_string()))?;
        let input = html.to_string();
        let feeder = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| ReportError::Render(format!("'{}' failed: {}", program, e)))?;
        let fed = feeder
            .join()
            .map_err(|_| ReportError::Render("converter input thread panicked".to_string()))?;

        if !output.status.success() {
            return Err(ReportError::Render(format!(
                "'{}' exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        fed.map_err(|e| ReportError::Render(format!("Failed to send HTML to '{}': {}", program, e)))?;

        if output.stdout.is_empty() {
            return Err(ReportError::Render(format!("'{}' produced no output", program)));
        }
        debug!(program = %program, bytes = output.stdout.len(), "converted HTML to PDF");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LowTrafficView, UsageRow};

    fn sample_report(rows: usize) -> ReportData {
        ReportData {
            date: "15-03-2025".to_string(),
            area_code: "Villupuram".to_string(),
            detail_location: Some("Alpha".to_string()),
            data_usage: (0..rows)
                .map(|i| UsageRow {
                    rank: i + 1,
                    location: format!("Site {}", i),
                    total_gb: 100.0 - i as f64,
                    volte_erlang: 1.0,
                })
                .collect(),
            volte: Vec::new(),
            detail: Vec::new(),
            low_traffic: LowTrafficView::default(),
        }
    }

    #[test]
    fn test_native_renderer_produces_pdf() {
        let bytes = PrintPdfRenderer.render("", &sample_report(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_native_renderer_paginates_long_tables() {
        let short = PrintPdfRenderer.render("", &sample_report(3)).unwrap();
        let long = PrintPdfRenderer.render("", &sample_report(200)).unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long cell name", 8), "a very..");
    }

    #[test]
    fn test_renderer_for_config() {
        let config = ReportConfig::default();
        let bytes = renderer_for(&config).render("", &sample_report(1)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_for_custom_template_uses_command() {
        let mut config = ReportConfig {
            template: Some("report.html".into()),
            ..ReportConfig::default()
        };
        config.pdf.command = vec!["cat".to_string()];
        let bytes = renderer_for(&config)
            .render("<h1>custom</h1>", &sample_report(1))
            .unwrap();
        assert_eq!(bytes, b"<h1>custom</h1>");
    }

    #[test]
    fn test_command_renderer_empty_command() {
        let result = CommandPdfRenderer::new(Vec::new()).render("<p/>", &sample_report(0));
        assert!(matches!(result, Err(ReportError::Render(_))));
    }

    #[test]
    fn test_command_renderer_missing_program() {
        let renderer = CommandPdfRenderer::new(vec!["vlu-no-such-converter".to_string()]);
        let err = renderer.render("<p/>", &sample_report(0)).unwrap_err();
        assert!(err.to_string().contains("vlu-no-such-converter"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_passes_stdout_through() {
        let renderer = CommandPdfRenderer::new(vec!["cat".to_string()]);
        let bytes = renderer.render("%PDF-fake", &sample_report(0)).unwrap();
        assert_eq!(bytes, b"%PDF-fake");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_reports_failure() {
        let renderer = CommandPdfRenderer::new(vec!["false".to_string()]);
        assert!(renderer.render("<p/>", &sample_report(0)).is_err());
    }
}
