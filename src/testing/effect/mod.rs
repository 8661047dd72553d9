use crate::data::MarkerTable;
use crate::error::{MarkerError, Result};
use num_traits::ToPrimitive;
use rayon::prelude::*;
use single_utilities::traits::FloatOps;

/// Calculate the log2 fold change of group 1 over group 0 for every marker.
pub fn log2_fold_change_groups(group0: &MarkerTable, group1: &MarkerTable) -> Result<Vec<f64>> {
    if group0.markers() != group1.markers() {
        return Err(MarkerError::DimensionMismatch {
            expected: format!("{} identical marker columns", group0.n_markers()),
            got: format!("{} columns", group1.n_markers()),
        });
    }

    (0..group0.n_markers())
        .into_par_iter()
        .map(|idx| {
            let reference = group0.values().column(idx).to_vec();
            let interest = group1.values().column(idx).to_vec();
            calculate_log2_fold_change(&group0.markers()[idx], &reference, &interest)
        })
        .collect()
}

/// Calculate log2(mean(group1) / mean(group0)) for one marker.
///
/// No pseudo-count is added. A group mean that is zero or negative makes the
/// ratio meaningless and is reported as `NonPositiveMean`.
pub fn calculate_log2_fold_change<T>(
    marker: &str,
    group0: &[T], // Reference group
    group1: &[T], // Group of interest
) -> Result<f64>
where
    T: FloatOps,
{
    if group0.is_empty() || group1.is_empty() {
        return Err(MarkerError::EmptyInput {
            reason: format!("marker '{}' has an empty group", marker),
        });
    }

    let mean0 = mean(group0);
    let mean1 = mean(group1);

    // NaN means fail this check as well
    if !(mean0 > 0.0 && mean1 > 0.0) {
        return Err(MarkerError::NonPositiveMean {
            marker: marker.to_string(),
            group0_mean: mean0,
            group1_mean: mean1,
        });
    }

    Ok((mean1 / mean0).log2())
}

fn mean<T>(values: &[T]) -> f64
where
    T: FloatOps,
{
    let sum: f64 = values
        .iter()
        .map(|v| ToPrimitive::to_f64(v).unwrap_or(f64::NAN))
        .sum();
    sum / values.len() as f64
}
