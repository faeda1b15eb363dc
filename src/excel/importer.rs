//! Workbook importer - Excel (.xlsx) → raw per-cell rows

use crate::config::{ColumnMap, SheetNames};
use crate::error::{ReportError, ReportResult};
use crate::excel::cells::{cell_date, cell_number, cell_text};
use crate::excel::columns::{index_to_letter, letter_to_index};
use crate::types::RawRow;
use calamine::{open_workbook, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// A worksheet read into memory. Column indices are absolute, so index 0 is
/// always column A even when the used range starts further right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub name: String,
    /// First used row, as text
    pub header: Vec<String>,
    /// Rows below the header
    pub rows: Vec<Vec<Data>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Read a calamine range, padding on the left so columns line up with
    /// their sheet letters
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let Some((_, start_col)) = range.start() else {
            return Self::new(name, Vec::new(), Vec::new());
        };
        let pad = start_col as usize;

        let mut rows = range.rows().map(|row| {
            let mut cells = vec![Data::Empty; pad];
            cells.extend(row.iter().cloned());
            cells
        });

        let header = rows
            .next()
            .map(|cells| {
                cells
                    .iter()
                    .map(|c| cell_text(c).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        Self::new(name, header, rows.collect())
    }

    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Find a column by header label, falling back to a column letter
    pub fn resolve_column(&self, key: &str) -> Option<usize> {
        let wanted = key.trim();
        if let Some(idx) = self
            .header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        {
            return Some(idx);
        }

        letter_to_index(wanted).filter(|&idx| idx < self.width())
    }

    pub fn cell(&self, row: usize, col: usize) -> &Data {
        static EMPTY: Data = Data::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    fn require_column(&self, field: &str, key: &str) -> ReportResult<usize> {
        self.resolve_column(key)
            .ok_or_else(|| ReportError::MissingColumn {
                column: key.to_string(),
                field: field.to_string(),
                sheet: self.name.clone(),
            })
    }

    /// Map every data row to a [`RawRow`] through the column table.
    ///
    /// The date column is optional: without it rows simply carry no date.
    pub fn raw_rows(&self, columns: &ColumnMap) -> ReportResult<Vec<RawRow>> {
        let location = self.require_column("location", &columns.location)?;
        let cell_name = self.require_column("cell_name", &columns.cell_name)?;
        let total_gb = self.require_column("total_gb", &columns.total_gb)?;
        let volte_erlang = self.require_column("volte_erlang", &columns.volte_erlang)?;
        let area_code = self.require_column("area_code", &columns.area_code)?;
        let report_date = self.resolve_column(&columns.report_date);
        if report_date.is_none() {
            warn!(
                column = %columns.report_date,
                sheet = %self.name,
                "report date column not found, rows carry no date"
            );
        }

        debug!(
            location = %index_to_letter(location),
            cell_name = %index_to_letter(cell_name),
            total_gb = %index_to_letter(total_gb),
            volte_erlang = %index_to_letter(volte_erlang),
            area_code = %index_to_letter(area_code),
            "resolved raw sheet columns"
        );

        let rows = (0..self.rows.len())
            .map(|r| {
                let usage = cell_number(self.cell(r, total_gb));
                RawRow {
                    location: cell_text(self.cell(r, location)),
                    cell_name: cell_text(self.cell(r, cell_name)).unwrap_or_default(),
                    area_code: cell_text(self.cell(r, area_code)).unwrap_or_default(),
                    total_gb: usage.unwrap_or(0.0),
                    volte_erlang: cell_number(self.cell(r, volte_erlang)).unwrap_or(0.0),
                    report_date: report_date.and_then(|c| cell_date(self.cell(r, c))),
                    usage_missing: usage.is_none(),
                }
            })
            .collect::<Vec<_>>();

        debug!(sheet = %self.name, rows = rows.len(), "read raw rows");
        Ok(rows)
    }
}

/// The two sheets of a telemetry workbook
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryWorkbook {
    pub raw: SheetTable,
    /// Reference table, carried but not used by any view
    pub site_list: SheetTable,
}

impl TelemetryWorkbook {
    pub fn raw_rows(&self, columns: &ColumnMap) -> ReportResult<Vec<RawRow>> {
        self.raw.raw_rows(columns)
    }
}

/// Reads telemetry workbooks from disk or from uploaded bytes
pub struct WorkbookImporter {
    sheets: SheetNames,
}

impl WorkbookImporter {
    pub fn new(sheets: SheetNames) -> Self {
        Self { sheets }
    }

    /// Import a workbook file
    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> ReportResult<TelemetryWorkbook> {
        let path = path.as_ref();
        let workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            ReportError::Workbook(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.read(workbook)
    }

    /// Import an in-memory workbook (e.g. an upload)
    pub fn import_bytes(&self, bytes: &[u8]) -> ReportResult<TelemetryWorkbook> {
        let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| ReportError::Workbook(format!("Failed to open workbook: {}", e)))?;
        self.read(workbook)
    }

    fn read<RS: Read + Seek>(&self, mut workbook: Xlsx<RS>) -> ReportResult<TelemetryWorkbook> {
        let available = workbook.sheet_names();

        let raw = read_sheet(&mut workbook, &self.sheets.raw, &available)?;
        let site_list = read_sheet(&mut workbook, &self.sheets.site_list, &available)?;

        debug!(
            raw_rows = raw.rows.len(),
            site_rows = site_list.rows.len(),
            "imported workbook"
        );
        Ok(TelemetryWorkbook { raw, site_list })
    }
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    name: &str,
    available: &[String],
) -> ReportResult<SheetTable> {
    if !available.iter().any(|s| s == name) {
        return Err(ReportError::MissingSheet {
            sheet: name.to_string(),
            available: available.to_vec(),
        });
    }

    let range = workbook
        .worksheet_range(name)
        .map_err(|e| ReportError::Workbook(format!("Failed to read sheet '{}': {}", name, e)))?;
    Ok(SheetTable::from_range(name, &range))
}
