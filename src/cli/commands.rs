use crate::config::{validate_threshold, ReportConfig};
use crate::core::Aggregator;
use crate::error::ReportResult;
use crate::excel::load_rows_from_path;
use crate::report::{generate_report, table_lines, TabularRow};
use crate::types::RawRow;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Read the raw sheet, echoing progress in verbose mode
fn load_rows(file: &Path, config: &ReportConfig, verbose: bool) -> ReportResult<Vec<RawRow>> {
    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }

    let rows = load_rows_from_path(file, config)?;

    if verbose {
        let located = rows.iter().filter(|r| r.location.is_some()).count();
        println!(
            "   Found {} rows ({} with a location) in '{}'\n",
            rows.len(),
            located,
            config.sheets.raw
        );
    }
    Ok(rows)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> ReportResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a view as an aligned table; `ranked` adds a 1-based index column
fn print_table<T: TabularRow>(rows: &[T], ranked: bool) {
    let (mut headers, mut lines) = table_lines(rows);
    if ranked {
        headers.insert(0, "#".to_string());
        for (i, line) in lines.iter_mut().enumerate() {
            line.insert(0, (i + 1).to_string());
        }
    }

    let widths: Vec<usize> = (0..headers.len())
        .map(|c| {
            lines
                .iter()
                .map(|l| l[c].chars().count())
                .chain(std::iter::once(headers[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len();

    println!("{}", "─".repeat(total));
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<w$}", h, w = w))
        .collect();
    println!("{}", header_line.join("  ").bold());
    println!("{}", "─".repeat(total));

    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (cell, &w))| {
                let is_number = cell.parse::<f64>().is_ok();
                let padded = if is_number {
                    format!("{:>w$}", cell, w = w)
                } else {
                    format!("{:<w$}", cell, w = w)
                };
                if c == usize::from(ranked) {
                    padded.bright_blue().to_string()
                } else {
                    padded
                }
            })
            .collect();
        println!("{}", cells.join("  "));
    }
    println!("{}", "─".repeat(total));
}

/// Execute the usage command - locations by data usage
pub fn usage(
    file: PathBuf,
    config: &ReportConfig,
    area_code: Option<String>,
    json: bool,
    verbose: bool,
) -> ReportResult<()> {
    let area = area_code.unwrap_or_else(|| config.default_area_code.clone());
    let rows = load_rows(&file, config, verbose)?;
    let summary = Aggregator::build(&rows);
    let view = Aggregator::data_usage_view(&summary, &area);

    if json {
        return print_json(&view);
    }

    println!("{}", format!("📍 Data Usage - SDCA: {}", area).bold().green());
    println!("   File: {}\n", file.display());
    print_table(&view, true);
    println!("   {} locations", view.len());
    Ok(())
}

/// Execute the volte command - locations by VoLTE traffic
pub fn volte(
    file: PathBuf,
    config: &ReportConfig,
    area_code: Option<String>,
    json: bool,
    verbose: bool,
) -> ReportResult<()> {
    let area = area_code.unwrap_or_else(|| config.default_area_code.clone());
    let rows = load_rows(&file, config, verbose)?;
    let summary = Aggregator::build(&rows);
    let view = Aggregator::volte_view(&summary, &area);

    if json {
        return print_json(&view);
    }

    println!("{}", format!("📞 VOLTE Report - SDCA: {}", area).bold().green());
    println!("   File: {}\n", file.display());
    print_table(&view, true);
    println!("   {} locations", view.len());
    Ok(())
}

/// Execute the detail command - cells of one location
pub fn detail(
    file: PathBuf,
    config: &ReportConfig,
    location: String,
    json: bool,
    verbose: bool,
) -> ReportResult<()> {
    let rows = load_rows(&file, config, verbose)?;
    let view = Aggregator::location_detail(&rows, &location);

    if json {
        return print_json(&view);
    }

    println!("{}", format!("📍 Location Detail - {}", location).bold().green());
    println!("   File: {}\n", file.display());
    if view.is_empty() {
        println!("{}", format!("   No cells found for '{}'", location).yellow());
        return Ok(());
    }
    print_table(&view, false);
    println!("   {} cells", view.len());
    Ok(())
}

/// Execute the low-traffic command
pub fn low_traffic(
    file: PathBuf,
    config: &ReportConfig,
    area_code: Option<String>,
    threshold: Option<f64>,
    json: bool,
    verbose: bool,
) -> ReportResult<()> {
    let area = area_code.unwrap_or_else(|| config.default_area_code.clone());
    let threshold = threshold.unwrap_or(config.low_usage_threshold);
    validate_threshold(threshold)?;

    let rows = load_rows(&file, config, verbose)?;
    let summary = Aggregator::build(&rows);
    let view = Aggregator::new(threshold).low_traffic_view(&summary, &rows, &area);

    if json {
        return print_json(&view);
    }

    println!("{}", format!("📉 Less Traffic Sites - SDCA: {}", area).bold().green());
    println!("   File: {}\n", file.display());

    println!(
        "{}",
        format!("📉 Locations with < {} GB Usage", crate::report::format_number(threshold))
            .bold()
            .cyan()
    );
    print_table(&view.low_usage, false);
    println!();

    println!("{}", "📉 Zero Data Sectors".bold().cyan());
    print_table(&view.zero_usage, false);
    Ok(())
}

/// Execute the locations command - sorted distinct locations
pub fn locations(file: PathBuf, config: &ReportConfig, json: bool, verbose: bool) -> ReportResult<()> {
    let rows = load_rows(&file, config, verbose)?;
    let names = Aggregator::locations(&Aggregator::build(&rows));

    if json {
        return print_json(&names);
    }

    println!("{}", "📍 Locations".bold().green());
    for name in &names {
        println!("   {}", name.bright_blue());
    }
    println!("\n   {} locations", names.len());
    Ok(())
}

/// Execute the report command - write the PDF (and optionally the HTML)
pub fn report(
    file: PathBuf,
    config: &ReportConfig,
    location: Option<String>,
    output_dir: PathBuf,
    html: bool,
    verbose: bool,
) -> ReportResult<()> {
    println!("{}", "📄 VLU 4G Report - Generating PDF".bold().green());
    println!("   File: {}", file.display());
    println!("   SDCA: {}\n", config.default_area_code);

    let rows = load_rows(&file, config, verbose)?;

    if verbose {
        println!("{}", "🧮 Building views and rendering...".cyan());
    }
    let report = generate_report(&rows, config, location.as_deref(), today())?;

    fs::create_dir_all(&output_dir)?;
    let pdf_path = output_dir.join(&report.file_name);
    fs::write(&pdf_path, &report.pdf)?;

    println!("{}", "✅ Report Complete!".bold().green());
    println!("   PDF:  {} ({} bytes)", pdf_path.display(), report.pdf.len());

    if html {
        let html_path = pdf_path.with_extension("html");
        fs::write(&html_path, &report.html)?;
        println!("   HTML: {}", html_path.display());
    }
    println!();
    Ok(())
}

/// Execute the config command - print the effective configuration
pub fn show_config(config: &ReportConfig) -> ReportResult<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}
