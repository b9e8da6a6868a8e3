//! Day-over-day tonnage comparison for one product.
//!
//! Only the arithmetic lives here: totals, deltas, rankings and alert
//! conditions. Turning the result into prose is left to the caller.

use std::collections::HashMap;

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;

use freight_common::{any_to_date, any_to_f64, any_to_string, any_to_string_non_empty, column_key};
use freight_model::ExecutiveThresholds;

use crate::error::{Result, TransformError, column};

/// Columns and parameters for [`compare_days`].
#[derive(Debug, Clone, Copy)]
pub struct ComparisonInputs<'a> {
    pub date_column: &'a str,
    pub product_column: &'a str,
    pub tonnage_column: &'a str,
    /// Ideally the normalized company column.
    pub company_column: &'a str,
    /// Day to report; defaults to the latest date for the product.
    pub today: Option<NaiveDate>,
    pub thresholds: &'a ExecutiveThresholds,
}

/// One company's tonnage on both days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDelta {
    pub company: String,
    pub today: f64,
    pub yesterday: f64,
    pub delta: f64,
    /// `None` when the company moved nothing yesterday.
    pub delta_pct: Option<f64>,
}

/// Threshold-driven findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// No rows for the product on the reported day.
    NoDataToday { date: NaiveDate },
    /// Total fell by at least the drop threshold.
    TotalDrop { pct: f64 },
    /// Total grew by at least the surge threshold.
    TotalSurge { pct: f64 },
    /// A company fell by at least the drop threshold.
    CompanyDrop { company: String, pct: f64 },
    /// One company holds at least the concentration share of today's total.
    Concentration { company: String, share: f64 },
}

/// Result of [`compare_days`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyComparison {
    pub product: String,
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    pub rows_today: usize,
    pub rows_yesterday: usize,
    pub total_today: f64,
    pub total_yesterday: f64,
    pub delta: f64,
    /// `None` when yesterday's total is zero.
    pub delta_pct: Option<f64>,
    /// Every company seen on either day, by today's tonnage (largest first).
    pub companies: Vec<CompanyDelta>,
    /// Largest movers today.
    pub top: Vec<CompanyDelta>,
    /// Smallest non-zero movers today, smallest first.
    pub bottom: Vec<CompanyDelta>,
    /// Share (0.0-1.0) of today's total held by the largest company.
    pub top_share: Option<f64>,
    pub alerts: Vec<Alert>,
}

/// Percentage change from `before` to `after`; `None` when `before` is zero.
pub fn pct_change(after: f64, before: f64) -> Option<f64> {
    (before != 0.0).then(|| (after - before) / before * 100.0)
}

#[derive(Default)]
struct DayTotals {
    today: f64,
    yesterday: f64,
}

struct ProductRow {
    date: NaiveDate,
    company: Option<String>,
    tonnage: f64,
}

fn product_rows(df: &DataFrame, inputs: &ComparisonInputs<'_>) -> Result<Vec<ProductRow>> {
    let dates = column(df, inputs.date_column)?;
    let products = column(df, inputs.product_column)?;
    let tonnage = column(df, inputs.tonnage_column)?;
    let companies = column(df, inputs.company_column)?;
    let product_key = column_key(&inputs.thresholds.product_code);

    let mut rows = Vec::new();
    for idx in 0..df.height() {
        let product = products.get(idx).map(any_to_string).unwrap_or_default();
        if column_key(&product) != product_key {
            continue;
        }
        let Some(date) = dates.get(idx).ok().and_then(any_to_date) else {
            continue;
        };
        rows.push(ProductRow {
            date,
            company: companies.get(idx).ok().and_then(any_to_string_non_empty),
            tonnage: tonnage.get(idx).ok().and_then(any_to_f64).unwrap_or(0.0),
        });
    }
    Ok(rows)
}

/// Compares the product's tonnage on `today` against the previous day.
pub fn compare_days(df: &DataFrame, inputs: &ComparisonInputs<'_>) -> Result<DailyComparison> {
    let thresholds = inputs.thresholds;
    let rows = product_rows(df, inputs)?;

    let today = match inputs.today {
        Some(today) => today,
        None => rows
            .iter()
            .map(|row| row.date)
            .max()
            .ok_or_else(|| TransformError::NoDates {
                column: inputs.date_column.to_string(),
            })?,
    };
    let yesterday = today.pred_opt().unwrap_or(today);

    let mut totals = DayTotals::default();
    let (mut rows_today, mut rows_yesterday) = (0usize, 0usize);
    let mut per_company: Vec<(String, DayTotals)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let is_today = row.date == today;
        if !is_today && row.date != yesterday {
            continue;
        }
        if is_today {
            totals.today += row.tonnage;
            rows_today += 1;
        } else {
            totals.yesterday += row.tonnage;
            rows_yesterday += 1;
        }
        let Some(company) = row.company else {
            continue;
        };
        let slot = match index.get(&company) {
            Some(&slot) => slot,
            None => {
                index.insert(company.clone(), per_company.len());
                per_company.push((company, DayTotals::default()));
                per_company.len() - 1
            }
        };
        let entry = &mut per_company[slot].1;
        if is_today {
            entry.today += row.tonnage;
        } else {
            entry.yesterday += row.tonnage;
        }
    }

    let mut companies: Vec<CompanyDelta> = per_company
        .into_iter()
        .map(|(company, day)| CompanyDelta {
            company,
            today: day.today,
            yesterday: day.yesterday,
            delta: day.today - day.yesterday,
            delta_pct: pct_change(day.today, day.yesterday),
        })
        .collect();
    companies.sort_by(|a, b| {
        b.today
            .total_cmp(&a.today)
            .then_with(|| a.company.cmp(&b.company))
    });

    let active: Vec<&CompanyDelta> = companies.iter().filter(|c| c.today > 0.0).collect();
    let top: Vec<CompanyDelta> = active
        .iter()
        .take(thresholds.top_n)
        .map(|c| (*c).clone())
        .collect();
    let bottom: Vec<CompanyDelta> = active
        .iter()
        .rev()
        .take(thresholds.top_n)
        .map(|c| (*c).clone())
        .collect();
    let top_share = match active.first() {
        Some(first) if totals.today > 0.0 => Some(first.today / totals.today),
        _ => None,
    };

    let delta_pct = pct_change(totals.today, totals.yesterday);
    let alerts = collect_alerts(
        thresholds,
        today,
        rows_today,
        delta_pct,
        &companies,
        active.first().map(|c| c.company.as_str()),
        top_share,
    );

    tracing::info!(
        product = %thresholds.product_code,
        %today,
        rows_today,
        rows_yesterday,
        alerts = alerts.len(),
        "compared product tonnage"
    );

    Ok(DailyComparison {
        product: thresholds.product_code.clone(),
        today,
        yesterday,
        rows_today,
        rows_yesterday,
        total_today: totals.today,
        total_yesterday: totals.yesterday,
        delta: totals.today - totals.yesterday,
        delta_pct,
        companies,
        top,
        bottom,
        top_share,
        alerts,
    })
}

fn collect_alerts(
    thresholds: &ExecutiveThresholds,
    today: NaiveDate,
    rows_today: usize,
    delta_pct: Option<f64>,
    companies: &[CompanyDelta],
    top_company: Option<&str>,
    top_share: Option<f64>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if rows_today == 0 {
        alerts.push(Alert::NoDataToday { date: today });
    }
    match delta_pct {
        Some(pct) if pct <= -thresholds.drop_alert_pct => alerts.push(Alert::TotalDrop { pct }),
        Some(pct) if pct >= thresholds.surge_alert_pct => alerts.push(Alert::TotalSurge { pct }),
        _ => {}
    }
    for company in companies {
        if let Some(pct) = company.delta_pct
            && pct <= -thresholds.drop_alert_pct
        {
            alerts.push(Alert::CompanyDrop {
                company: company.company.clone(),
                pct,
            });
        }
    }
    if let (Some(company), Some(share)) = (top_company, top_share)
        && share >= thresholds.concentration_alert_share
    {
        alerts.push(Alert::Concentration {
            company: company.to_string(),
            share,
        });
    }
    alerts
}
