//! Tests for the day-over-day product comparison.

use chrono::NaiveDate;
use freight_model::ExecutiveThresholds;
use freight_transform::{Alert, ComparisonInputs, TransformError, compare_days};
use polars::prelude::*;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn dispatches() -> DataFrame {
    df! {
        "Fecha" => &[
            "2024-03-01", "2024-03-01", "2024-03-01", "2024-03-01",
            "2024-03-02", "2024-03-02", "2024-03-02", "2024-03-02",
        ],
        "Producto" => &["SLIT", "SLIT", "slit ", "CATODO", "SLIT", "SLIT", "SLIT", "CATODO"],
        "Empresa" => &[
            Some("M&Q SPA"), Some("CARGAS DEL NORTE SPA"), Some("SMA"), Some("M&Q SPA"),
            Some("M&Q SPA"), Some("CARGAS DEL NORTE SPA"), None, Some("M&Q SPA"),
        ],
        "Toneladas" => &["100", "50", "50", "999", "150", "20", "abc", "999"],
    }
    .unwrap()
}

fn inputs<'a>(thresholds: &'a ExecutiveThresholds, today: Option<NaiveDate>) -> ComparisonInputs<'a> {
    ComparisonInputs {
        date_column: "Fecha",
        product_column: "Producto",
        tonnage_column: "Toneladas",
        company_column: "Empresa",
        today,
        thresholds,
    }
}

#[test]
fn compares_latest_day_with_previous_day() {
    let thresholds = ExecutiveThresholds::default();
    let report = compare_days(&dispatches(), &inputs(&thresholds, None)).unwrap();

    assert_eq!(report.today, date(2));
    assert_eq!(report.yesterday, date(1));
    assert_eq!(report.total_today, 170.0);
    assert_eq!(report.total_yesterday, 200.0);
    assert_eq!(report.delta, -30.0);
    assert_eq!(report.delta_pct, Some(-15.0));
    assert_eq!(report.rows_today, 3);
    assert_eq!(report.rows_yesterday, 3);

    let names: Vec<&str> = report.companies.iter().map(|c| c.company.as_str()).collect();
    assert_eq!(names, vec!["M&Q SPA", "CARGAS DEL NORTE SPA", "SMA"]);
    assert_eq!(report.companies[0].delta_pct, Some(50.0));
    assert_eq!(report.companies[1].delta_pct, Some(-60.0));
    assert_eq!(report.companies[2].today, 0.0);

    assert_eq!(report.top.len(), 2);
    assert_eq!(report.bottom[0].company, "CARGAS DEL NORTE SPA");
    assert!((report.top_share.unwrap() - 150.0 / 170.0).abs() < 1e-9);
}

#[test]
fn raises_threshold_alerts() {
    let thresholds = ExecutiveThresholds::default();
    let report = compare_days(&dispatches(), &inputs(&thresholds, None)).unwrap();

    assert_eq!(report.alerts.len(), 4);
    assert_eq!(report.alerts[0], Alert::TotalDrop { pct: -15.0 });
    assert_eq!(
        report.alerts[1],
        Alert::CompanyDrop {
            company: "CARGAS DEL NORTE SPA".to_string(),
            pct: -60.0
        }
    );
    assert_eq!(
        report.alerts[2],
        Alert::CompanyDrop {
            company: "SMA".to_string(),
            pct: -100.0
        }
    );
    assert!(matches!(&report.alerts[3], Alert::Concentration { company, .. } if company == "M&Q SPA"));
}

#[test]
fn missing_day_reports_no_data() {
    let thresholds = ExecutiveThresholds::default();
    let report = compare_days(&dispatches(), &inputs(&thresholds, Some(date(10)))).unwrap();
    assert_eq!(report.total_today, 0.0);
    assert_eq!(report.total_yesterday, 0.0);
    assert_eq!(report.delta_pct, None);
    assert!(report.companies.is_empty());
    assert_eq!(report.alerts, vec![Alert::NoDataToday { date: date(10) }]);
}

#[test]
fn unknown_product_has_no_dates() {
    let thresholds = ExecutiveThresholds {
        product_code: "COBRE".to_string(),
        ..ExecutiveThresholds::default()
    };
    let err = compare_days(&dispatches(), &inputs(&thresholds, None)).unwrap_err();
    assert!(matches!(err, TransformError::NoDates { .. }));
    insta::assert_snapshot!(err.to_string(), @"no parseable dates in column 'Fecha'");
}

#[test]
fn alerts_serialize_with_kind_tag() {
    let alert = Alert::TotalSurge { pct: 25.0 };
    let json = serde_json::to_value(&alert).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "total_surge", "pct": 25.0}));
}

#[test]
fn nan_tonnage_does_not_hide_alerts() {
    let df = df! {
        "Fecha" => &["2024-03-01", "2024-03-02", "2024-03-02"],
        "Producto" => &["SLIT", "SLIT", "SLIT"],
        "Empresa" => &["M&Q SPA", "M&Q SPA", "CARGAS DEL NORTE SPA"],
        "Toneladas" => &[200.0, 100.0, f64::NAN],
    }
    .unwrap();
    let thresholds = ExecutiveThresholds::default();
    let report = compare_days(&df, &inputs(&thresholds, None)).unwrap();

    assert_eq!(report.total_today, 100.0);
    assert_eq!(report.total_yesterday, 200.0);
    assert_eq!(report.delta_pct, Some(-50.0));
    assert_eq!(report.rows_today, 2);
    assert_eq!(report.alerts[0], Alert::TotalDrop { pct: -50.0 });
}
