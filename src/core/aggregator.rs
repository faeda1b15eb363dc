//! Per-location aggregation and the derived views
//!
//! Every function here is a pure transformation of its arguments. The summary
//! table is rebuilt from the raw rows on each call; nothing is cached.

use crate::config::DEFAULT_LOW_USAGE_THRESHOLD;
use crate::error::{ReportError, ReportResult};
use crate::types::{
    CellDetail, LocationSummary, LowTrafficView, LowUsageRow, RawRow, UsageRow, VolteRow,
    ZeroUsageCell,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Comparison key for area codes and locations: trimmed, lower-cased
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    low_usage_threshold: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_USAGE_THRESHOLD)
    }
}

impl Aggregator {
    pub fn new(low_usage_threshold: f64) -> Self {
        Self {
            low_usage_threshold,
        }
    }

    pub fn low_usage_threshold(&self) -> f64 {
        self.low_usage_threshold
    }

    /// Group raw rows by location.
    ///
    /// Locations keep their first-appearance order and are matched exactly.
    /// Rows without a location are skipped. The area code comes from the
    /// first row of each location.
    pub fn build(rows: &[RawRow]) -> Vec<LocationSummary> {
        let mut summaries: Vec<LocationSummary> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            let Some(location) = row.location.as_deref() else {
                continue;
            };

            match index.get(location) {
                Some(&i) => {
                    let summary = &mut summaries[i];
                    summary.total_gb += row.total_gb;
                    summary.volte_erlang += row.volte_erlang;
                    if normalize_key(&summary.area_code) != normalize_key(&row.area_code) {
                        warn!(
                            location,
                            kept = %summary.area_code,
                            ignored = %row.area_code,
                            "location spans more than one area code"
                        );
                    }
                }
                None => {
                    index.insert(location, summaries.len());
                    summaries.push(LocationSummary {
                        location: location.to_string(),
                        total_gb: row.total_gb,
                        area_code: row.area_code.clone(),
                        volte_erlang: row.volte_erlang,
                    });
                }
            }
        }

        debug!(
            rows = rows.len(),
            locations = summaries.len(),
            "built location summary"
        );
        summaries
    }

    /// Like [`Aggregator::build`], but zero input rows is an error
    pub fn build_non_empty(rows: &[RawRow]) -> ReportResult<Vec<LocationSummary>> {
        if rows.is_empty() {
            return Err(ReportError::EmptyInput);
        }
        Ok(Self::build(rows))
    }

    /// Locations in `area_code`, heaviest data usage first
    pub fn data_usage_view(summary: &[LocationSummary], area_code: &str) -> Vec<UsageRow> {
        let mut matching = filter_by_area(summary, area_code);
        matching.sort_by(|a, b| b.total_gb.total_cmp(&a.total_gb));

        matching
            .into_iter()
            .enumerate()
            .map(|(i, s)| UsageRow {
                rank: i + 1,
                location: s.location.clone(),
                total_gb: s.total_gb,
                volte_erlang: s.volte_erlang,
            })
            .collect()
    }

    /// Locations in `area_code`, heaviest VoLTE traffic first
    pub fn volte_view(summary: &[LocationSummary], area_code: &str) -> Vec<VolteRow> {
        let mut matching = filter_by_area(summary, area_code);
        matching.sort_by(|a, b| b.volte_erlang.total_cmp(&a.volte_erlang));

        matching
            .into_iter()
            .enumerate()
            .map(|(i, s)| VolteRow {
                rank: i + 1,
                location: s.location.clone(),
                volte_erlang: s.volte_erlang,
                total_gb: s.total_gb,
            })
            .collect()
    }

    /// Raw cells of one location, in sheet order
    pub fn location_detail(rows: &[RawRow], location: &str) -> Vec<CellDetail> {
        let wanted = normalize_key(location);

        rows.iter()
            .filter_map(|row| {
                let loc = row.location.as_deref()?;
                (normalize_key(loc) == wanted).then(|| CellDetail {
                    location: loc.to_string(),
                    cell_name: row.cell_name.clone(),
                    total_gb: row.total_gb,
                    volte_erlang: row.volte_erlang,
                })
            })
            .collect()
    }

    /// Locations below the usage threshold, and cells with exactly zero usage.
    ///
    /// The two halves are computed independently.
    pub fn low_traffic_view(
        &self,
        summary: &[LocationSummary],
        rows: &[RawRow],
        area_code: &str,
    ) -> LowTrafficView {
        let low_usage = filter_by_area(summary, area_code)
            .into_iter()
            .filter(|s| s.total_gb < self.low_usage_threshold)
            .map(|s| LowUsageRow {
                location: s.location.clone(),
                total_gb: s.total_gb,
                area_code: s.area_code.clone(),
            })
            .collect();

        let wanted = normalize_key(area_code);
        let zero_usage = rows
            .iter()
            .filter(|row| normalize_key(&row.area_code) == wanted && row.is_zero_usage())
            .map(|row| ZeroUsageCell {
                location: row.location.clone().unwrap_or_default(),
                cell_name: row.cell_name.clone(),
                volte_erlang: row.volte_erlang,
                total_gb: row.total_gb,
            })
            .collect();

        LowTrafficView {
            low_usage,
            zero_usage,
        }
    }

    /// Distinct locations, sorted, for selection lists
    pub fn locations(summary: &[LocationSummary]) -> Vec<String> {
        let mut names: Vec<String> = summary.iter().map(|s| s.location.clone()).collect();
        names.sort();
        names
    }
}

fn filter_by_area<'a>(summary: &'a [LocationSummary], area_code: &str) -> Vec<&'a LocationSummary> {
    let wanted = normalize_key(area_code);
    summary
        .iter()
        .filter(|s| normalize_key(&s.area_code) == wanted)
        .collect()
}
