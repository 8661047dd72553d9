//! Welch's unequal-variance t-test for marker tables.
//!
//! Each marker is tested independently, so the table-level entry point fans
//! the columns out over the rayon pool and collects results back in column
//! order.

use crate::data::MarkerTable;
use crate::error::{MarkerError, Result};
use crate::testing::TestResult;
use num_traits::ToPrimitive;
use rayon::prelude::*;
use single_utilities::traits::FloatOps;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Run Welch t-tests for every marker, group 0 against group 1.
///
/// # Arguments
///
/// * `group0` - Samples labelled 0 (samples × markers)
/// * `group1` - Samples labelled 1, same markers in the same order
///
/// # Returns
///
/// One `TestResult` per marker, in marker-column order.
pub fn welch_t_test_groups(group0: &MarkerTable, group1: &MarkerTable) -> Result<Vec<TestResult>> {
    if group0.markers() != group1.markers() {
        return Err(MarkerError::DimensionMismatch {
            expected: format!("{} identical marker columns", group0.n_markers()),
            got: format!("{} columns", group1.n_markers()),
        });
    }

    (0..group0.n_markers())
        .into_par_iter()
        .map(|idx| {
            let x = group0.values().column(idx).to_vec();
            let y = group1.values().column(idx).to_vec();
            welch_t_test(&group0.markers()[idx], &x, &y)
        })
        .collect()
}

/// Perform Welch's t-test comparing two samples.
///
/// # Arguments
///
/// * `marker` - Marker name, used for error reporting
/// * `x` - Group 0 values
/// * `y` - Group 1 values
///
/// # Returns
///
/// `TestResult` with the t statistic, two-sided p-value, degrees of freedom
/// and standard error. Each group needs at least two values.
pub fn welch_t_test<T>(marker: &str, x: &[T], y: &[T]) -> Result<TestResult>
where
    T: FloatOps,
{
    for (group, values) in [(0u8, x), (1u8, y)] {
        if values.len() < 2 {
            return Err(MarkerError::InsufficientSamples {
                marker: marker.to_string(),
                group,
                count: values.len(),
            });
        }
    }

    let (mean1, var1) = mean_and_variance(x);
    let (mean2, var2) = mean_and_variance(y);

    Ok(welch_t_test_from_moments(
        mean1,
        var1,
        x.len() as f64,
        mean2,
        var2,
        y.len() as f64,
    ))
}

/// Mean and sample variance (n - 1 denominator) in two passes.
fn mean_and_variance<T>(values: &[T]) -> (f64, f64)
where
    T: FloatOps,
{
    let n = values.len() as f64;
    let mut sum = 0.0;
    for val in values {
        sum += ToPrimitive::to_f64(val).unwrap_or(f64::NAN);
    }
    let mean = sum / n;

    let mut sum_sq_dev = 0.0;
    for val in values {
        let dev = ToPrimitive::to_f64(val).unwrap_or(f64::NAN) - mean;
        sum_sq_dev += dev * dev;
    }

    (mean, sum_sq_dev / (n - 1.0))
}

/// Perform a Welch t-test from precomputed group moments.
///
/// # Arguments
///
/// * `mean1`, `var1`, `n1` - Mean, sample variance and count for group 0
/// * `mean2`, `var2`, `n2` - Mean, sample variance and count for group 1
///
/// # Returns
///
/// `TestResult` containing the t-statistic, p-value, Welch–Satterthwaite
/// degrees of freedom and the standard error of the mean difference.
pub fn welch_t_test_from_moments(
    mean1: f64,
    var1: f64,
    n1: f64,
    mean2: f64,
    var2: f64,
    n2: f64,
) -> TestResult {
    if n1 < 2.0 || n2 < 2.0 {
        return TestResult::new(0.0, 1.0);
    }

    let term1 = var1 / n1;
    let term2 = var2 / n2;
    let combined_var = term1 + term2;
    let std_err = combined_var.sqrt();
    let t_stat = (mean1 - mean2) / std_err;

    // Welch-Satterthwaite equation for degrees of freedom
    let df = combined_var * combined_var / (term1 * term1 / (n1 - 1.0) + term2 * term2 / (n2 - 1.0));

    TestResult::new(t_stat, t_test_p_value(t_stat, df))
        .with_degrees_of_freedom(df)
        .with_standard_error(std_err)
}

/// Two-sided p-value of a t statistic.
///
/// Zero-variance groups produce degenerate statistics: an infinite t means the
/// groups are perfectly separated (p = 0), a NaN t means there is nothing to
/// separate (p = 1).
fn t_test_p_value(t_stat: f64, df: f64) -> f64 {
    if !t_stat.is_finite() {
        return if t_stat.is_infinite() { 0.0 } else { 1.0 };
    }

    if df <= 0.0 || !df.is_finite() {
        return 1.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        // lower tail of -|t| avoids cancellation in 1 - cdf(|t|)
        Ok(t_dist) => (2.0 * t_dist.cdf(-t_stat.abs())).min(1.0),
        Err(_) => 1.0,
    }
}
