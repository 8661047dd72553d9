//! Zero-mean, unit-variance rescaling of marker columns.
//!
//! The scale is the population standard deviation (no Bessel correction), and
//! columns without spread keep a scale of 1 so they center to zero instead of
//! dividing by zero.

use super::MarkerTable;
use crate::error::{MarkerError, Result};
use log::{debug, warn};
use ndarray::{Array1, Axis, Zip};

/// Per-marker centering and scaling fitted on one table.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: Array1<f64>,
    pub scale: Array1<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations over all samples.
    pub fn fit(table: &MarkerTable) -> Result<Self> {
        if table.n_samples() == 0 {
            return Err(MarkerError::EmptyInput {
                reason: "cannot standardize a table without samples".to_string(),
            });
        }

        let values = table.values();
        let mean = values
            .mean_axis(Axis(0))
            .ok_or_else(|| MarkerError::EmptyInput {
                reason: "cannot standardize a table without samples".to_string(),
            })?;
        let mut scale = values.std_axis(Axis(0), 0.0);

        for (idx, (s, m)) in scale.iter_mut().zip(mean.iter()).enumerate() {
            if *s <= 10.0 * f64::EPSILON * m.abs().max(1.0) {
                warn!(
                    "Marker '{}' has no variance across samples, leaving it unscaled",
                    table.markers()[idx]
                );
                *s = 1.0;
            }
        }

        debug!("Fitted scaler over {} markers", scale.len());
        Ok(StandardScaler { mean, scale })
    }

    /// Apply the fitted centering and scaling to a table with the same markers.
    pub fn transform(&self, table: &MarkerTable) -> Result<MarkerTable> {
        if table.n_markers() != self.mean.len() {
            return Err(MarkerError::DimensionMismatch {
                expected: format!("{} markers", self.mean.len()),
                got: format!("{} markers", table.n_markers()),
            });
        }

        let mut standardized = table.values().to_owned();
        Zip::from(standardized.rows_mut()).par_for_each(|mut row| {
            row -= &self.mean;
            row /= &self.scale;
        });

        Ok(table.with_values(standardized))
    }
}

/// Fit a [`StandardScaler`] on `table` and return the rescaled copy.
pub fn standardize(table: &MarkerTable) -> Result<MarkerTable> {
    StandardScaler::fit(table)?.transform(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn table(values: ndarray::Array2<f64>) -> MarkerTable {
        let markers = (0..values.ncols()).map(|i| format!("m{}", i)).collect();
        MarkerTable::new(markers, values).unwrap()
    }

    #[test]
    fn test_columns_have_zero_mean_unit_variance() {
        let raw = table(array![[1.0, 10.0], [2.0, 30.0], [3.0, 20.0], [6.0, 40.0]]);
        let standardized = standardize(&raw).unwrap();

        let mean = standardized.values().mean_axis(Axis(0)).unwrap();
        let std = standardized.values().std_axis(Axis(0), 0.0);
        for j in 0..2 {
            assert_abs_diff_eq!(mean[j], 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(std[j], 1.0, epsilon = 1e-12);
        }
        assert_eq!(standardized.markers(), raw.markers());
    }

    #[test]
    fn test_population_standard_deviation() {
        // mean 2, population std sqrt(2/3)
        let raw = table(array![[1.0], [2.0], [3.0]]);
        let scaler = StandardScaler::fit(&raw).unwrap();
        assert_abs_diff_eq!(scaler.mean[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scaler.scale[0], (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_constant_column_is_centered_not_scaled() {
        let raw = table(array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]]);
        let scaler = StandardScaler::fit(&raw).unwrap();
        assert_eq!(scaler.scale[0], 1.0);

        let standardized = scaler.transform(&raw).unwrap();
        for value in standardized.values().column(0) {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let raw = table(ndarray::Array2::zeros((0, 2)));
        assert!(matches!(standardize(&raw), Err(MarkerError::EmptyInput { .. })));
    }

    #[test]
    fn test_transform_checks_marker_count() {
        let scaler = StandardScaler::fit(&table(array![[1.0, 2.0], [3.0, 4.0]])).unwrap();
        let other = table(array![[1.0], [2.0]]);
        assert!(matches!(
            scaler.transform(&other),
            Err(MarkerError::DimensionMismatch { .. })
        ));
    }
}
