//! Aggregator view properties over realistic row sets

use pretty_assertions::assert_eq;
use vlu_report::core::Aggregator;
use vlu_report::types::RawRow;
use vlu_report::ReportError;

fn rows() -> Vec<RawRow> {
    vec![
        RawRow::new("Alpha", "ALPHA_1", "Villupuram", 5.0, 1.0),
        RawRow::new("Alpha", "ALPHA_2", "Villupuram", 3.0, 2.0),
        RawRow::new("Beta", "BETA_1", "Villupuram", 20.0, 0.5),
        RawRow::new("Gamma", "GAMMA_1", "Tindivanam", 7.5, 4.0),
        RawRow::new("Delta", "DELTA_1", "VILLUPURAM ", 0.0, 0.0),
        RawRow::new("Delta", "DELTA_2", "Villupuram", 12.0, 3.5),
        RawRow::new("Epsilon", "EPS_1", "Gingee", 0.0, 0.75),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// BUILD
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_build_worked_example() {
    let rows = vec![
        RawRow::new("Alpha", "A1", "Villupuram", 5.0, 1.0),
        RawRow::new("Alpha", "A2", "Villupuram", 3.0, 2.0),
        RawRow::new("Beta", "B1", "Villupuram", 20.0, 0.5),
    ];
    let summary = Aggregator::build(&rows);

    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].location, "Alpha");
    assert_eq!(summary[0].total_gb, 8.0);
    assert_eq!(summary[0].volte_erlang, 3.0);
    assert_eq!(summary[1].location, "Beta");
    assert_eq!(summary[1].total_gb, 20.0);

    let usage = Aggregator::data_usage_view(&summary, "villupuram");
    let order: Vec<&str> = usage.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(order, vec!["Beta", "Alpha"]);

    let low = Aggregator::default().low_traffic_view(&summary, &rows, "Villupuram");
    assert_eq!(low.low_usage.len(), 1);
    assert_eq!(low.low_usage[0].location, "Alpha");
    assert!(low.zero_usage.is_empty());
}

#[test]
fn test_build_partitions_totals() {
    let rows = rows();
    let summary = Aggregator::build(&rows);

    let raw_gb: f64 = rows.iter().map(|r| r.total_gb).sum();
    let raw_erl: f64 = rows.iter().map(|r| r.volte_erlang).sum();
    let sum_gb: f64 = summary.iter().map(|s| s.total_gb).sum();
    let sum_erl: f64 = summary.iter().map(|s| s.volte_erlang).sum();

    assert!((raw_gb - sum_gb).abs() < 1e-9);
    assert!((raw_erl - sum_erl).abs() < 1e-9);
}

#[test]
fn test_build_one_summary_per_distinct_location() {
    let summary = Aggregator::build(&rows());
    let names: Vec<&str> = summary.iter().map(|s| s.location.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]);
}

#[test]
fn test_build_is_idempotent() {
    let rows = rows();
    assert_eq!(Aggregator::build(&rows), Aggregator::build(&rows));
}

#[test]
fn test_build_keeps_first_area_code() {
    let summary = Aggregator::build(&rows());
    let delta = summary.iter().find(|s| s.location == "Delta").unwrap();
    assert_eq!(delta.area_code, "VILLUPURAM ");
    assert_eq!(delta.total_gb, 12.0);
}

#[test]
fn test_build_empty_input() {
    assert!(Aggregator::build(&[]).is_empty());
    assert!(matches!(
        Aggregator::build_non_empty(&[]),
        Err(ReportError::EmptyInput)
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// SORTED VIEWS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_data_usage_view_sorted_descending_within_area() {
    let summary = Aggregator::build(&rows());
    let view = Aggregator::data_usage_view(&summary, " villupuram");

    let names: Vec<&str> = view.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(names, vec!["Beta", "Delta", "Alpha"]);
    assert!(view.windows(2).all(|w| w[0].total_gb >= w[1].total_gb));

    let ranks: Vec<usize> = view.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn test_volte_view_sorted_descending_within_area() {
    let summary = Aggregator::build(&rows());
    let view = Aggregator::volte_view(&summary, "Villupuram");

    let names: Vec<&str> = view.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(names, vec!["Delta", "Alpha", "Beta"]);
    assert!(view
        .windows(2)
        .all(|w| w[0].volte_erlang >= w[1].volte_erlang));
}

#[test]
fn test_views_unknown_area_are_empty() {
    let summary = Aggregator::build(&rows());
    assert!(Aggregator::data_usage_view(&summary, "Chennai").is_empty());
    assert!(Aggregator::volte_view(&summary, "Chennai").is_empty());
}

#[test]
fn test_equal_usage_keeps_build_order() {
    let rows = vec![
        RawRow::new("Zeta", "Z1", "Villupuram", 4.0, 1.0),
        RawRow::new("Eta", "E1", "Villupuram", 4.0, 1.0),
        RawRow::new("Theta", "T1", "Villupuram", 4.0, 1.0),
    ];
    let summary = Aggregator::build(&rows);
    let names: Vec<String> = Aggregator::data_usage_view(&summary, "Villupuram")
        .into_iter()
        .map(|r| r.location)
        .collect();
    assert_eq!(names, vec!["Zeta", "Eta", "Theta"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// DETAIL
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_location_detail_matches_normalized_name() {
    let detail = Aggregator::location_detail(&rows(), "  delta ");
    let cells: Vec<&str> = detail.iter().map(|d| d.cell_name.as_str()).collect();
    assert_eq!(cells, vec!["DELTA_1", "DELTA_2"]);
}

#[test]
fn test_location_detail_unknown_location_is_empty() {
    assert!(Aggregator::location_detail(&rows(), "Omega").is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// LOW TRAFFIC
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_low_traffic_subsets() {
    let rows = rows();
    let summary = Aggregator::build(&rows);
    let usage = Aggregator::data_usage_view(&summary, "Villupuram");
    let view = Aggregator::default().low_traffic_view(&summary, &rows, "Villupuram");

    for low in &view.low_usage {
        assert!(low.total_gb < 10.0);
        assert!(usage.iter().any(|u| u.location == low.location));
    }
    let low: Vec<&str> = view.low_usage.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(low, vec!["Alpha"]);

    let zero: Vec<&str> = view.zero_usage.iter().map(|r| r.cell_name.as_str()).collect();
    assert_eq!(zero, vec!["DELTA_1"]);
}

#[test]
fn test_low_traffic_threshold_is_strict() {
    let rows = vec![RawRow::new("Kappa", "K1", "Villupuram", 10.0, 0.0)];
    let summary = Aggregator::build(&rows);

    let at_default = Aggregator::default().low_traffic_view(&summary, &rows, "Villupuram");
    assert!(at_default.low_usage.is_empty());

    let raised = Aggregator::new(10.5).low_traffic_view(&summary, &rows, "Villupuram");
    assert_eq!(raised.low_usage.len(), 1);
}

#[test]
fn test_zero_usage_is_independent_of_location_total() {
    // Delta totals 12 GB but still has one silent cell
    let rows = rows();
    let summary = Aggregator::build(&rows);
    let view = Aggregator::default().low_traffic_view(&summary, &rows, "Villupuram");

    assert!(!view.low_usage.iter().any(|r| r.location == "Delta"));
    assert!(view.zero_usage.iter().any(|r| r.location == "Delta"));
}

#[test]
fn test_locations_sorted() {
    let summary = Aggregator::build(&rows());
    assert_eq!(
        Aggregator::locations(&summary),
        vec!["Alpha", "Beta", "Delta", "Epsilon", "Gamma"]
    );
}
