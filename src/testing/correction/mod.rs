//! Multiple testing correction for a family of per-marker p-values.
//!
//! Three views are produced from the same raw p-values and never composed:
//! a per-family alpha threshold, Bonferroni-adjusted p-values, and a
//! rank-based FDR adjustment.
//!
//! The FDR adjustment is the simplified form `p * N / rank` without the
//! running-minimum pass of the full Benjamini-Hochberg procedure, so adjusted
//! values are not monotonic in rank and may exceed 1.

use crate::error::{MarkerError, Result};
use crate::testing::MarkerStatistic;
use log::debug;
use serde::Serialize;

/// Per-family significance threshold: `alpha / n_tests`.
///
/// # Example
/// ```
/// use marker_statistics::testing::correction::alpha_threshold;
/// let threshold = alpha_threshold(0.05, 3).unwrap();
/// assert!((threshold - 0.05 / 3.0).abs() < 1e-15);
/// ```
pub fn alpha_threshold(alpha: f64, n_tests: usize) -> Result<f64> {
    if n_tests == 0 {
        return Err(MarkerError::EmptyInput {
            reason: "Empty p-value array".to_string(),
        });
    }
    Ok(alpha / n_tests as f64)
}

/// Apply Bonferroni correction to p-values
///
/// Each p-value is multiplied by the number of tests and capped at 1. Output
/// order matches input order.
///
/// # Example
/// ```
/// use marker_statistics::testing::correction::bonferroni_correction;
/// let adjusted = bonferroni_correction(&[0.01, 0.04, 0.2]).unwrap();
/// assert!((adjusted[0] - 0.03).abs() < 1e-12);
/// assert!((adjusted[2] - 0.6).abs() < 1e-12);
/// ```
pub fn bonferroni_correction(p_values: &[f64]) -> Result<Vec<f64>> {
    let n = p_values.len();
    if n == 0 {
        return Err(MarkerError::EmptyInput {
            reason: "Empty p-value array".to_string(),
        });
    }
    validate_p_values(p_values, |i| format!("index {}", i))?;

    Ok(p_values.iter().map(|&p| (p * n as f64).min(1.0)).collect())
}

/// One marker's place in the FDR ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FdrEntry {
    pub marker: String,
    /// Position of the marker in the input table
    pub column: usize,
    /// 1 for the smallest raw p-value
    pub rank: usize,
    pub p_value: f64,
    pub adjusted_p_value: f64,
}

/// Markers sorted by ascending raw p-value with their FDR-adjusted values.
///
/// Ties keep the input column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FdrRanking {
    entries: Vec<FdrEntry>,
}

impl FdrRanking {
    /// Rank markers by raw p-value and compute `p * N / rank`.
    pub fn new(markers: &[String], p_values: &[f64]) -> Result<Self> {
        if markers.len() != p_values.len() {
            return Err(MarkerError::DimensionMismatch {
                expected: format!("{} p-values", markers.len()),
                got: format!("{}", p_values.len()),
            });
        }
        let n = p_values.len();
        if n == 0 {
            return Err(MarkerError::EmptyInput {
                reason: "Empty p-value array".to_string(),
            });
        }
        validate_p_values(p_values, |i| markers[i].clone())?;

        let mut entries: Vec<FdrEntry> = markers
            .iter()
            .zip(p_values)
            .enumerate()
            .map(|(column, (marker, &p_value))| FdrEntry {
                marker: marker.clone(),
                column,
                rank: 0,
                p_value,
                adjusted_p_value: p_value,
            })
            .collect();

        // sort_by is stable, equal p-values stay in column order
        entries.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i + 1;
            entry.adjusted_p_value = entry.p_value * n as f64 / entry.rank as f64;
        }

        Ok(FdrRanking { entries })
    }

    /// Entries in rank order
    pub fn entries(&self) -> &[FdrEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adjusted values mapped back to input column order
    pub fn adjusted_in_column_order(&self) -> Vec<f64> {
        let mut adjusted = vec![f64::NAN; self.entries.len()];
        for entry in &self.entries {
            adjusted[entry.column] = entry.adjusted_p_value;
        }
        adjusted
    }
}

/// Apply the rank-based FDR adjustment to p-values
///
/// Returns adjusted values in input order. See [`FdrRanking`] for the
/// rank-ordered view.
///
/// # Example
/// ```
/// use marker_statistics::testing::correction::fdr_correction;
/// let adjusted = fdr_correction(&[0.04, 0.01, 0.2]).unwrap();
/// assert!((adjusted[0] - 0.06).abs() < 1e-12);
/// assert!((adjusted[1] - 0.03).abs() < 1e-12);
/// ```
pub fn fdr_correction(p_values: &[f64]) -> Result<Vec<f64>> {
    let markers: Vec<String> = (0..p_values.len()).map(|i| format!("index {}", i)).collect();
    Ok(FdrRanking::new(&markers, p_values)?.adjusted_in_column_order())
}

fn validate_p_values<F>(p_values: &[f64], name: F) -> Result<()>
where
    F: Fn(usize) -> String,
{
    for (i, &p) in p_values.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) {
            return Err(MarkerError::InvalidPValue {
                marker: name(i),
                value: p,
            });
        }
    }
    Ok(())
}

/// A marker's statistics annotated with every correction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectedRecord {
    pub marker: String,
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub log2_fold_change: f64,
    /// Raw p-value below the per-family alpha threshold
    pub passes_alpha_threshold: bool,
    pub bonferroni_p_value: f64,
    pub fdr_p_value: f64,
}

/// Corrected statistics for the whole marker family.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedStatistics {
    /// `alpha / N`
    pub alpha_adjusted: f64,
    /// One record per marker, input column order
    pub records: Vec<CorrectedRecord>,
    pub fdr_ranking: FdrRanking,
}

impl CorrectedStatistics {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, marker: &str) -> Option<&CorrectedRecord> {
        self.records.iter().find(|r| r.marker == marker)
    }

    /// Records sorted by ascending raw p-value, ties in column order
    pub fn records_by_p_value(&self) -> Vec<&CorrectedRecord> {
        self.fdr_ranking
            .entries()
            .iter()
            .map(|entry| &self.records[entry.column])
            .collect()
    }
}

/// Annotate per-marker statistics with all three corrections.
///
/// No marker is added or dropped; records keep the input order.
pub fn correct(statistics: &[MarkerStatistic], alpha: f64) -> Result<CorrectedStatistics> {
    let markers: Vec<String> = statistics.iter().map(|s| s.marker.clone()).collect();
    let p_values: Vec<f64> = statistics.iter().map(|s| s.p_value).collect();

    let fdr_ranking = FdrRanking::new(&markers, &p_values)?;
    let alpha_adjusted = alpha_threshold(alpha, p_values.len())?;
    let bonferroni = bonferroni_correction(&p_values)?;
    let fdr = fdr_ranking.adjusted_in_column_order();

    let records = statistics
        .iter()
        .zip(bonferroni)
        .zip(fdr)
        .map(|((stat, bonferroni_p_value), fdr_p_value)| CorrectedRecord {
            marker: stat.marker.clone(),
            statistic: stat.statistic,
            degrees_of_freedom: stat.degrees_of_freedom,
            p_value: stat.p_value,
            log2_fold_change: stat.log2_fold_change,
            passes_alpha_threshold: stat.p_value < alpha_adjusted,
            bonferroni_p_value,
            fdr_p_value,
        })
        .collect();

    debug!(
        "Corrected {} p-values, per-family alpha {:.3e}",
        p_values.len(),
        alpha_adjusted
    );

    Ok(CorrectedStatistics {
        alpha_adjusted,
        records,
        fdr_ranking,
    })
}
