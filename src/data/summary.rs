use super::MarkerTable;
use serde::Serialize;

/// Descriptive statistics of one marker column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSummary {
    pub marker: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarize the first `n_markers` columns of a table.
///
/// Quantiles use linear interpolation between closest ranks. Columns of an
/// empty table summarize to NaN.
pub fn describe(table: &MarkerTable, n_markers: usize) -> Vec<MarkerSummary> {
    table
        .markers()
        .iter()
        .take(n_markers)
        .enumerate()
        .map(|(idx, marker)| {
            let mut values = table.values().column(idx).to_vec();
            values.sort_by(|a, b| a.total_cmp(b));
            summarize_sorted(marker, &values)
        })
        .collect()
}

fn summarize_sorted(marker: &str, sorted: &[f64]) -> MarkerSummary {
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        (sorted.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    MarkerSummary {
        marker: marker.to_string(),
        count,
        mean,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile_sorted(sorted, 0.25),
        median: quantile_sorted(sorted, 0.5),
        q75: quantile_sorted(sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
