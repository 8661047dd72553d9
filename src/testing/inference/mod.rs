use crate::error::{MarkerError, Result};
use crate::testing::utils::PartitionedTables;
use crate::testing::{effect, MarkerStatistic, TestResult};
use log::debug;

pub mod parametric;

/// Per-marker differential tests over group-partitioned tables.
pub trait MarkerStatTests {
    /// Welch t-test for every marker on the standardized values.
    fn t_test(&self) -> Result<Vec<TestResult>>;

    /// log2 fold change of group 1 over group 0 on the raw values.
    fn log2_fold_changes(&self) -> Result<Vec<f64>>;

    /// Combine both into one record per marker, in marker-column order.
    fn differential_expression(&self) -> Result<Vec<MarkerStatistic>>;
}

impl MarkerStatTests for PartitionedTables {
    fn t_test(&self) -> Result<Vec<TestResult>> {
        parametric::welch_t_test_groups(&self.standardized.group0, &self.standardized.group1)
    }

    fn log2_fold_changes(&self) -> Result<Vec<f64>> {
        effect::log2_fold_change_groups(&self.raw.group0, &self.raw.group1)
    }

    fn differential_expression(&self) -> Result<Vec<MarkerStatistic>> {
        let markers = self.raw.group0.markers();
        if markers != self.standardized.group0.markers() {
            return Err(MarkerError::DimensionMismatch {
                expected: "raw and standardized tables with identical markers".to_string(),
                got: format!(
                    "{} raw and {} standardized markers",
                    markers.len(),
                    self.standardized.group0.n_markers()
                ),
            });
        }

        let results = self.t_test()?;
        let fold_changes = self.log2_fold_changes()?;
        debug!("Tested {} markers", results.len());

        Ok(markers
            .iter()
            .zip(results)
            .zip(fold_changes)
            .map(|((marker, result), log2_fold_change)| MarkerStatistic {
                marker: marker.clone(),
                statistic: result.statistic,
                degrees_of_freedom: result.degrees_of_freedom.unwrap_or(f64::NAN),
                p_value: result.p_value,
                log2_fold_change,
            })
            .collect())
    }
}
