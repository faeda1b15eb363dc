//! Shared fixtures: telemetry workbooks built with rust_xlsxwriter
#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use std::path::Path;

/// Header labels of the raw sheet, columns A..S
pub const RAW_HEADERS: [&str; 19] = [
    "Circle",
    "SSA",
    "BTS Type",
    "Vendor",
    "Site ID",
    "Site Name",
    "Location",
    "eNodeB",
    "4G Cell Name",
    "Band",
    "Sector",
    "Total (GB)",
    "DL (GB)",
    "UL (GB)",
    "Users",
    "Availability",
    "VOLTE Traffic",
    "Date",
    "SDCA",
];

const COL_LOCATION: u16 = 6; // G
const COL_CELL: u16 = 8; // I
const COL_TOTAL_GB: u16 = 11; // L
const COL_VOLTE: u16 = 16; // Q
const COL_DATE: u16 = 17; // R
const COL_AREA: u16 = 18; // S

/// One raw-sheet row of a fixture workbook
#[derive(Debug, Clone)]
pub struct CellRow {
    pub location: Option<&'static str>,
    pub cell: &'static str,
    /// `None` leaves the usage cell blank
    pub total_gb: Option<f64>,
    pub volte_erlang: f64,
    pub area: &'static str,
    pub date: Option<&'static str>,
    /// Written as a real date cell (year, month, day)
    pub date_cell: Option<(u16, u8, u8)>,
}

pub fn cell(
    location: &'static str,
    cell: &'static str,
    area: &'static str,
    total_gb: f64,
    volte_erlang: f64,
) -> CellRow {
    CellRow {
        location: Some(location),
        cell,
        total_gb: Some(total_gb),
        volte_erlang,
        area,
        date: None,
        date_cell: None,
    }
}

impl CellRow {
    pub fn dated(mut self, date: &'static str) -> Self {
        self.date = Some(date);
        self
    }

    pub fn dated_cell(mut self, year: u16, month: u8, day: u8) -> Self {
        self.date_cell = Some((year, month, day));
        self
    }

    pub fn without_usage(mut self) -> Self {
        self.total_gb = None;
        self
    }
}

/// Rows of the worked Alpha/Beta example, plus a zero-usage cell and a second area.
/// The report date sits on the second data row.
pub fn sample_rows() -> Vec<CellRow> {
    vec![
        cell("Alpha", "ALPHA_L1800_1", "Villupuram", 5.0, 1.0),
        cell("Alpha", "ALPHA_L1800_2", "Villupuram", 3.0, 2.0).dated("14-03-2025"),
        cell("Beta", "BETA_L2100_1", "Villupuram", 20.0, 0.5),
        cell("Delta", "DELTA_L1800_1", "Villupuram", 0.0, 0.0),
        cell("Gamma", "GAMMA_L900_1", "Tindivanam", 2.5, 0.25),
    ]
}

/// Workbook options for the failure cases
#[derive(Debug, Clone)]
pub struct Fixture {
    pub rows: Vec<CellRow>,
    pub raw_sheet: &'static str,
    pub site_list: bool,
    /// Leave out the VoLTE column entirely
    pub drop_volte: bool,
}

impl Fixture {
    pub fn new(rows: Vec<CellRow>) -> Self {
        Self {
            rows,
            raw_sheet: "Sheet1",
            site_list: true,
            drop_volte: false,
        }
    }

    pub fn sample() -> Self {
        Self::new(sample_rows())
    }

    pub fn without_site_list(mut self) -> Self {
        self.site_list = false;
        self
    }

    pub fn without_volte(mut self) -> Self {
        self.drop_volte = true;
        self
    }

    fn workbook(&self) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("dd-mm-yyyy");

        let sheet = workbook.add_worksheet();
        sheet.set_name(self.raw_sheet)?;

        let width = if self.drop_volte {
            COL_VOLTE
        } else {
            RAW_HEADERS.len() as u16
        };
        for (col, label) in RAW_HEADERS.iter().enumerate().take(width as usize) {
            sheet.write_string(0, col as u16, *label)?;
        }

        for (i, row) in self.rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_string(r, 0, "TN")?;
            if let Some(location) = row.location {
                sheet.write_string(r, COL_LOCATION, location)?;
            }
            sheet.write_string(r, COL_CELL, row.cell)?;
            if let Some(total_gb) = row.total_gb {
                sheet.write_number(r, COL_TOTAL_GB, total_gb)?;
            }
            if !self.drop_volte {
                sheet.write_number(r, COL_VOLTE, row.volte_erlang)?;
                if let Some(date) = row.date {
                    sheet.write_string(r, COL_DATE, date)?;
                }
                if let Some((year, month, day)) = row.date_cell {
                    let date = ExcelDateTime::from_ymd(year, month, day)?;
                    sheet.write_datetime_with_format(r, COL_DATE, &date, &date_format)?;
                }
                sheet.write_string(r, COL_AREA, row.area)?;
            }
        }

        if self.site_list {
            let sites = workbook.add_worksheet();
            sites.set_name("SITELIST")?;
            sites.write_string(0, 0, "Site ID")?;
            sites.write_string(0, 1, "Location")?;
            sites.write_string(1, 0, "VPM001")?;
            sites.write_string(1, 1, "Alpha")?;
        }

        Ok(workbook)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.workbook()
            .and_then(|mut wb| wb.save_to_buffer())
            .expect("build fixture workbook")
    }

    pub fn write_to(&self, path: &Path) {
        self.workbook()
            .and_then(|mut wb| wb.save(path))
            .expect("write fixture workbook");
    }
}
