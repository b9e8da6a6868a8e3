use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use freight_cli::report::{DashboardReport, InspectReport, RoleRow};
use freight_common::format_numeric;
use freight_normalization::{CompanyMapping, MatchKind};
use freight_transform::{
    Alert, ColumnSummary, CompanyDelta, CorrelationMatrix, DailyComparison, GroupValue,
};

pub fn print_inspect(report: &InspectReport) {
    println!("Rows: {}  Columns: {}", report.rows, report.columns.len());

    let mut preview = Table::new();
    preview.set_header(report.columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());
    apply_table_style(&mut preview);
    for row in &report.preview {
        preview.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    println!("{preview}");

    println!("{}", roles_table(&report.roles));

    let mut hints = Table::new();
    hints.set_header(vec![
        header_cell("Column"),
        header_cell("Numeric"),
        header_cell("Unique"),
        header_cell("Blank"),
    ]);
    apply_table_style(&mut hints);
    align_column(&mut hints, 2, CellAlignment::Right);
    align_column(&mut hints, 3, CellAlignment::Right);
    for (name, hint) in &report.hints {
        hints.add_row(vec![
            Cell::new(name),
            if hint.is_numeric {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
            Cell::new(percent(hint.unique_ratio)),
            Cell::new(percent(hint.null_ratio)),
        ]);
    }
    println!("{hints}");

    if report.date_columns.is_empty() {
        println!("Date columns: none");
    } else {
        println!("Date columns: {}", report.date_columns.join(", "));
    }
    if !report.dates.is_empty() {
        let dates: Vec<String> = report.dates.iter().map(ToString::to_string).collect();
        println!("Dates: {}", dates.join(", "));
    }
    if !report.companies.is_empty() {
        println!("Companies: {}", report.companies.join(", "));
    }
}

pub fn print_mappings(mappings: &[CompanyMapping]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Canonical"),
        header_cell("Match"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for mapping in mappings {
        table.add_row(vec![
            Cell::new(&mapping.raw),
            Cell::new(&mapping.canonical).add_attribute(Attribute::Bold),
            match_cell(mapping.kind),
            Cell::new(mapping.rows),
        ]);
    }
    println!("{table}");
}

pub fn print_dashboard(report: &DashboardReport) {
    match (report.date, report.date_range) {
        (Some(date), Some((first, last))) => {
            println!("Date: {date} (data from {first} to {last})");
        }
        (Some(date), None) => println!("Date: {date} (no dates in file)"),
        _ => println!("Date: all rows"),
    }
    if !report.companies.is_empty() {
        println!("Companies: {}", report.companies.join(", "));
    }
    println!("Rows: {} of {}", report.rows_selected, report.rows_total);
    if let Some(total) = report.total_tonnage {
        println!("Total tonnage: {}", number(total));
    }
    println!("{}", roles_table(&report.roles));

    print_groups("Tonnage by company", "Company", &report.tonnage_by_company);
    print_groups("Tonnage by product", "Product", &report.tonnage_by_product);
    print_groups("Tonnage by destination", "Destination", &report.tonnage_by_destination);
    print_groups("Mean duration by company", "Company", &report.duration_by_company);

    if !report.statistics.is_empty() {
        println!("Statistics");
        println!("{}", statistics_table(&report.statistics));
    }
    for counts in &report.value_counts {
        if counts.counts.is_empty() {
            continue;
        }
        let mut table = Table::new();
        table.set_header(vec![header_cell(&counts.column), header_cell("Rows")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for entry in &counts.counts {
            table.add_row(vec![Cell::new(&entry.value), Cell::new(entry.count)]);
        }
        println!("Most frequent: {}", counts.column);
        println!("{table}");
    }
    if let Some(matrix) = &report.correlation {
        println!("Correlation");
        println!("{}", correlation_table(matrix));
    }
}

pub fn print_comparison(report: &DailyComparison) {
    println!(
        "Product {}: {} vs {}",
        report.product, report.today, report.yesterday
    );
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell(""),
        header_cell("Today"),
        header_cell("Yesterday"),
        header_cell("Delta"),
        header_cell("Delta %"),
    ]);
    apply_summary_table_style(&mut totals);
    for index in 1..5 {
        align_column(&mut totals, index, CellAlignment::Right);
    }
    totals.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(number(report.total_today)).add_attribute(Attribute::Bold),
        Cell::new(number(report.total_yesterday)),
        delta_cell(report.delta),
        pct_cell(report.delta_pct),
    ]);
    for company in &report.companies {
        totals.add_row(company_row(company));
    }
    println!("{totals}");

    if let Some(share) = report.top_share {
        println!("Top company share: {}", percent(share));
    }
    print_ranking("Top", &report.top);
    print_ranking("Bottom", &report.bottom);

    if report.alerts.is_empty() {
        return;
    }
    let mut alerts = Table::new();
    alerts.set_header(vec![header_cell("Alert"), header_cell("Detail")]);
    apply_table_style(&mut alerts);
    for alert in &report.alerts {
        let (label, detail) = alert_text(alert);
        alerts.add_row(vec![Cell::new(label).fg(Color::Yellow), Cell::new(detail)]);
    }
    println!("{alerts}");
}

fn roles_table(roles: &[RoleRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Keyword"),
    ]);
    apply_table_style(&mut table);
    for row in roles {
        let column = match &row.column {
            Some(column) => Cell::new(column),
            None => Cell::new("missing").fg(Color::Red),
        };
        let keyword = match (&row.column, &row.keyword) {
            (_, Some(keyword)) => Cell::new(keyword),
            (Some(_), None) => dim_cell("(date type)"),
            (None, None) => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(row.role.as_str()), column, keyword]);
    }
    table
}

fn print_groups(title: &str, key_label: &str, groups: &[GroupValue]) {
    if groups.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(key_label),
        header_cell("Value"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.key),
            Cell::new(number(group.value)),
            Cell::new(group.rows),
        ]);
    }
    println!("{title}");
    println!("{table}");
}

fn print_ranking(title: &str, companies: &[CompanyDelta]) {
    if companies.is_empty() {
        return;
    }
    let names: Vec<String> = companies
        .iter()
        .map(|c| format!("{} ({})", c.company, number(c.today)))
        .collect();
    println!("{title}: {}", names.join(", "));
}

fn statistics_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.column),
            Cell::new(summary.count),
            optional_cell(summary.mean),
            optional_cell(summary.std),
            optional_cell(summary.min),
            optional_cell(summary.q25),
            optional_cell(summary.median),
            optional_cell(summary.q75),
            optional_cell(summary.max),
        ]);
    }
    table
}

fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(matrix.columns.iter().map(|c| header_cell(c)));
    table.set_header(header);
    apply_table_style(&mut table);
    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut cells = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|value| match value {
            Some(v) => Cell::new(format!("{v:.2}")),
            None => dim_cell("-"),
        }));
        table.add_row(cells);
    }
    table
}

fn company_row(company: &CompanyDelta) -> Vec<Cell> {
    vec![
        Cell::new(&company.company),
        Cell::new(number(company.today)),
        Cell::new(number(company.yesterday)),
        delta_cell(company.delta),
        pct_cell(company.delta_pct),
    ]
}

fn alert_text(alert: &Alert) -> (&'static str, String) {
    match alert {
        Alert::NoDataToday { date } => ("NO DATA", format!("no rows on {date}")),
        Alert::TotalDrop { pct } => ("DROP", format!("total {}", signed_percent(*pct))),
        Alert::TotalSurge { pct } => ("SURGE", format!("total {}", signed_percent(*pct))),
        Alert::CompanyDrop { company, pct } => {
            ("COMPANY DROP", format!("{company} {}", signed_percent(*pct)))
        }
        Alert::Concentration { company, share } => (
            "CONCENTRATION",
            format!("{company} holds {} of today's tonnage", percent(*share)),
        ),
    }
}

fn match_cell(kind: Option<MatchKind>) -> Cell {
    match kind {
        Some(MatchKind::Exact) => Cell::new("exact").fg(Color::Green),
        Some(MatchKind::Substring) => Cell::new("substring").fg(Color::Yellow),
        None => dim_cell("unmatched"),
    }
}

fn number(value: f64) -> String {
    format_numeric((value * 100.0).round() / 100.0)
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn signed_percent(pct: f64) -> String {
    format!("{pct:+.1}%")
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) => Cell::new(number(v)),
        None => dim_cell("-"),
    }
}

fn delta_cell(delta: f64) -> Cell {
    let text = if delta > 0.0 {
        format!("+{}", number(delta))
    } else {
        number(delta)
    };
    if delta < 0.0 {
        Cell::new(text).fg(Color::Red)
    } else if delta > 0.0 {
        Cell::new(text).fg(Color::Green)
    } else {
        dim_cell(text)
    }
}

fn pct_cell(pct: Option<f64>) -> Cell {
    match pct {
        Some(pct) if pct < 0.0 => Cell::new(signed_percent(pct)).fg(Color::Red),
        Some(pct) => Cell::new(signed_percent(pct)),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
