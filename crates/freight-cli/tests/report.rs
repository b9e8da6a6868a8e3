//! Integration tests for the report builders.

use std::io::Write;

use chrono::NaiveDate;
use freight_cli::report::{
    CANONICAL_COMPANY_COLUMN, DashboardOptions, build_comparison, build_dashboard, build_inspect,
    build_mappings, load_table,
};
use freight_cli::settings::{SettingsSources, load_settings};
use freight_model::{ColumnMatchMode, DashboardConfig, Role};
use freight_normalization::MatchKind;
use freight_standards::default_config;
use freight_transform::Alert;
use tempfile::NamedTempFile;

const DISPATCHES: &str = "\
Fecha Entrega,Empresa de Transporte,Producto,Destino,Toneladas,Horas
01/03/2024,M & Q,SLIT,SAN ANTONIO,100,5
01/03/2024,Cargas del Norte,SLIT,VALPARAISO,50,6
01/03/2024,Fletes Sur,CATODO,SAN ANTONIO,30,4
02/03/2024,m&q spa,SLIT,SAN ANTONIO,150,5
02/03/2024,CDN SPA,SLIT,VALPARAISO,abc,7
";

fn temp_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn config() -> DashboardConfig {
    default_config().unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn inspect_reports_roles_and_dates() {
    let file = temp_csv(DISPATCHES);
    let df = load_table(file.path()).unwrap();
    let report = build_inspect(&df, &config(), 2).unwrap();

    assert_eq!(report.rows, 5);
    assert_eq!(report.preview.len(), 2);
    assert_eq!(report.date_columns, vec!["Fecha Entrega"]);
    let company = report.roles.iter().find(|r| r.role == Role::Company).unwrap();
    assert_eq!(company.column.as_deref(), Some("Empresa de Transporte"));
    assert_eq!(company.keyword.as_deref(), Some("EMPRESA DE TRANSPORTE"));
    assert!(report.hints["Horas"].is_numeric);
    assert_eq!(report.dates, vec![date(1), date(2)]);
    assert_eq!(
        report.companies,
        vec!["M&Q SPA", "CARGAS DEL NORTE SPA", "Fletes Sur"]
    );
}

#[test]
fn mappings_show_canonical_names() {
    let file = temp_csv(DISPATCHES);
    let df = load_table(file.path()).unwrap();
    let mappings = build_mappings(&df, &config()).unwrap();

    assert_eq!(mappings.len(), 5);
    assert_eq!(mappings[0].raw, "M & Q");
    assert_eq!(mappings[0].canonical, "M&Q SPA");
    assert_eq!(mappings[2].canonical, "Fletes Sur");
    assert_eq!(mappings[2].kind, None);
    assert_eq!(mappings[3].kind, Some(MatchKind::Exact));
}

#[test]
fn dashboard_defaults_to_earliest_day() {
    let file = temp_csv(DISPATCHES);
    let df = load_table(file.path()).unwrap();
    let options = DashboardOptions {
        top: 10,
        ..DashboardOptions::default()
    };
    let report = build_dashboard(&df, &config(), &options).unwrap();

    assert_eq!(report.date, Some(date(1)));
    assert_eq!(report.date_range, Some((date(1), date(2))));
    assert_eq!(report.rows_selected, 3);
    assert_eq!(report.total_tonnage, Some(180.0));
    assert_eq!(report.tonnage_by_company[0].key, "M&Q SPA");
    assert_eq!(report.tonnage_by_product[0].key, "SLIT");
    assert_eq!(report.tonnage_by_product[0].value, 150.0);
    assert!(report.missing_roles.is_empty());
    assert!(report.correlation.is_some());
    assert_eq!(report.value_counts[0].column, CANONICAL_COMPANY_COLUMN);
}

#[test]
fn dashboard_company_filter_accepts_any_spelling() {
    let file = temp_csv(DISPATCHES);
    let df = load_table(file.path()).unwrap();
    let options = DashboardOptions {
        date: Some(date(2)),
        companies: vec!["mining and quarrying spa".to_string()],
        top: 10,
        ..DashboardOptions::default()
    };
    let report = build_dashboard(&df, &config(), &options).unwrap();
    assert_eq!(report.companies, vec!["M&Q SPA"]);
    assert_eq!(report.rows_selected, 1);
    assert_eq!(report.total_tonnage, Some(150.0));
}

#[test]
fn nan_tonnage_cells_are_ignored_in_totals() {
    let file = temp_csv(
        "Fecha,Empresa,Producto,Toneladas\n\
         01/03/2024,M & Q,SLIT,100\n\
         01/03/2024,CDN SPA,SLIT,NaN\n\
         01/03/2024,Cargas del Norte,SLIT,150\n",
    );
    let df = load_table(file.path()).unwrap();
    let report = build_dashboard(&df, &config(), &DashboardOptions::default()).unwrap();
    assert_eq!(report.total_tonnage, Some(250.0));
    assert_eq!(report.tonnage_by_company[0].key, "CARGAS DEL NORTE SPA");
    assert_eq!(report.tonnage_by_company[0].value, 150.0);
    assert_eq!(report.tonnage_by_company[1].value, 100.0);

    let comparison = build_comparison(&df, &config(), None, None).unwrap();
    assert_eq!(comparison.total_today, 250.0);
}

#[test]
fn dashboard_without_roles_counts_first_text_columns() {
    let file = temp_csv(
        "Cliente,Zona,Turno,Planta,A,B,C,D,E,F\n\
         Norte,Z1,Dia,P1,1,2,3,5,1,9\n\
         Sur,Z2,Noche,P2,2,4,1,6,0,8\n\
         Norte,Z1,Dia,P1,3,7,2,9,4,1\n",
    );
    let df = load_table(file.path()).unwrap();
    let options = DashboardOptions {
        top: 10,
        ..DashboardOptions::default()
    };
    let report = build_dashboard(&df, &config(), &options).unwrap();

    let counted: Vec<&str> = report.value_counts.iter().map(|c| c.column.as_str()).collect();
    assert_eq!(counted, vec!["Cliente", "Zona", "Turno"]);
    assert_eq!(report.value_counts[0].counts[0].value, "Norte");
    assert_eq!(report.value_counts[0].counts[0].count, 2);
    assert_eq!(report.statistics.len(), 6);
    assert_eq!(
        report.correlation.unwrap().columns,
        vec!["A", "B", "C", "D", "E"]
    );
}

#[test]
fn required_roles_stop_the_dashboard() {
    let file = temp_csv("Producto,Toneladas\nSLIT,10\n");
    let df = load_table(file.path()).unwrap();
    let options = DashboardOptions {
        require: vec![Role::Date, Role::Tonnage, Role::Company],
        ..DashboardOptions::default()
    };
    let err = build_dashboard(&df, &config(), &options).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing required column roles: DATE, COMPANY");
}

#[test]
fn missing_roles_degrade_without_require() {
    let file = temp_csv("Producto,Toneladas\nSLIT,10\nSLIT,5\n");
    let df = load_table(file.path()).unwrap();
    let report = build_dashboard(&df, &config(), &DashboardOptions::default()).unwrap();
    assert_eq!(report.date, None);
    assert_eq!(report.rows_selected, 2);
    assert_eq!(report.total_tonnage, Some(15.0));
    assert_eq!(
        report.missing_roles,
        vec![Role::Date, Role::Company, Role::Destination, Role::Duration]
    );
}

#[test]
fn comparison_uses_canonical_companies() {
    let file = temp_csv(DISPATCHES);
    let df = load_table(file.path()).unwrap();
    let report = build_comparison(&df, &config(), None, None).unwrap();

    assert_eq!(report.product, "SLIT");
    assert_eq!(report.today, date(2));
    assert_eq!(report.total_today, 150.0);
    assert_eq!(report.total_yesterday, 150.0);
    assert_eq!(report.delta_pct, Some(0.0));
    let names: Vec<&str> = report.companies.iter().map(|c| c.company.as_str()).collect();
    assert_eq!(names, vec!["M&Q SPA", "CARGAS DEL NORTE SPA"]);
    assert!(report.alerts.contains(&Alert::CompanyDrop {
        company: "CARGAS DEL NORTE SPA".to_string(),
        pct: -100.0
    }));
}

#[test]
fn comparison_needs_product_column() {
    let file = temp_csv("Fecha,Empresa,Toneladas\n2024-03-01,ACME,1\n");
    let df = load_table(file.path()).unwrap();
    let err = build_comparison(&df, &config(), None, None).unwrap_err();
    assert_eq!(err.to_string(), "missing required column roles: PRODUCT");
}

#[test]
fn unreadable_file_asks_for_a_valid_export() {
    let err = load_table(std::path::Path::new("/nonexistent/despachos.csv")).unwrap_err();
    insta::assert_snapshot!(
        format!("{err:#}"),
        @"could not load /nonexistent/despachos.csv; make sure it is a valid CSV export of the dispatch sheet and try again: file not found: /nonexistent/despachos.csv"
    );
}

#[test]
fn settings_apply_alias_sheet_and_overrides() {
    let aliases = temp_csv("canonical,variant\nACME,ACME LTDA\n");
    let config = load_settings(&SettingsSources {
        aliases: Some(aliases.path()),
        column_match: Some(ColumnMatchMode::Exact),
        ..SettingsSources::default()
    })
    .unwrap();
    assert_eq!(config.companies.len(), 1);
    assert_eq!(config.matching.columns, ColumnMatchMode::Exact);
}
