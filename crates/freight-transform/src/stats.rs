//! Descriptive statistics and correlation.
//!
//! Quantiles use linear interpolation between closest ranks and the
//! standard deviation is the sample one (n - 1), matching what spreadsheet
//! users get from pandas `describe()`.

use polars::prelude::*;
use serde::Serialize;

use crate::error::{Result, column};
use crate::numeric::numeric_values;

/// Summary of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-null numeric cells.
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Pairwise Pearson correlations. `values[i][j]` pairs `columns[i]` with
/// `columns[j]`; `None` where undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Quantile of sorted values with linear interpolation.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

fn summarize(name: &str, values: Vec<Option<f64>>) -> ColumnSummary {
    let mut present: Vec<f64> = values.into_iter().flatten().collect();
    present.sort_by(f64::total_cmp);
    let count = present.len();
    let mean = (count > 0).then(|| present.iter().sum::<f64>() / count as f64);
    let std = match mean {
        Some(mean) if count > 1 => {
            let ss: f64 = present.iter().map(|v| (v - mean).powi(2)).sum();
            Some((ss / (count - 1) as f64).sqrt())
        }
        _ => None,
    };
    ColumnSummary {
        column: name.to_string(),
        count,
        mean,
        std,
        min: present.first().copied(),
        q25: quantile(&present, 0.25),
        median: quantile(&present, 0.5),
        q75: quantile(&present, 0.75),
        max: present.last().copied(),
    }
}

/// Summaries for `columns`, in the given order.
pub fn describe(df: &DataFrame, columns: &[String]) -> Result<Vec<ColumnSummary>> {
    columns
        .iter()
        .map(|name| Ok(summarize(name, numeric_values(column(df, name)?))))
        .collect()
}

fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pearson correlation of every pair in `columns`, over rows where both
/// values are numeric.
pub fn correlation_matrix(df: &DataFrame, columns: &[String]) -> Result<CorrelationMatrix> {
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| Ok(numeric_values(column(df, name)?)))
        .collect::<Result<_>>()?;
    let values = series
        .iter()
        .map(|x| series.iter().map(|y| pearson(x, y)).collect())
        .collect();
    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_describe_matches_pandas() {
        let df = df! { "Toneladas" => &[Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)] }.unwrap();
        let summary = &describe(&df, &["Toneladas".to_string()]).unwrap()[0];
        assert_eq!(summary.count, 4);
        assert!(close(summary.mean, 2.5));
        assert!(close(summary.std, 1.290_994_448_735_805_6));
        assert!(close(summary.q25, 1.75));
        assert!(close(summary.median, 2.5));
        assert!(close(summary.q75, 3.25));
        assert_eq!(summary.min, Some(1.0));
        assert_eq!(summary.max, Some(4.0));
    }

    #[test]
    fn test_describe_empty_and_single() {
        let df = df! { "A" => &["x", "y"], "B" => &["7", "z"] }.unwrap();
        let summaries = describe(&df, &["A".to_string(), "B".to_string()]).unwrap();
        assert_eq!(summaries[0].count, 0);
        assert_eq!(summaries[0].mean, None);
        assert_eq!(summaries[1].median, Some(7.0));
        assert_eq!(summaries[1].std, None);
    }

    #[test]
    fn test_correlation() {
        let df = df! {
            "Toneladas" => &[10.0, 20.0, 30.0, 40.0],
            "Horas" => &[1.0, 2.0, 3.0, 4.0],
            "Espera" => &[4.0, 3.0, 2.0, 1.0],
            "Fijo" => &[5.0, 5.0, 5.0, 5.0],
        }
        .unwrap();
        let columns: Vec<String> = ["Toneladas", "Horas", "Espera", "Fijo"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let matrix = correlation_matrix(&df, &columns).unwrap();
        assert!(close(matrix.get("Toneladas", "Horas"), 1.0));
        assert!(close(matrix.get("Toneladas", "Espera"), -1.0));
        assert!(close(matrix.get("Horas", "Horas"), 1.0));
        assert_eq!(matrix.get("Fijo", "Horas"), None);
    }

    #[test]
    fn test_correlation_unknown_column() {
        let df = df! { "A" => &[1.0] }.unwrap();
        assert!(correlation_matrix(&df, &["B".to_string()]).is_err());
    }
}
