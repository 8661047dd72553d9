//! Analysis settings shared by the loader, the significance filter and the
//! visualization preparer.

use serde::{Deserialize, Serialize};

/// Family-wise error level used when nothing else is configured.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Name of the group-membership column in input tables.
pub const DEFAULT_GROUP_COLUMN: &str = "group";

/// Log2 fold-change bounds used to classify significant markers as up- or
/// down-regulated in the volcano table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldChangeThresholds {
    /// A significant marker with `log2fc < lower` is down-regulated
    pub lower: f64,
    /// A significant marker with `log2fc > upper` is up-regulated
    pub upper: f64,
}

impl Default for FoldChangeThresholds {
    fn default() -> Self {
        FoldChangeThresholds {
            lower: 0.0,
            upper: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Base error level divided by the number of markers for the per-family threshold
    pub alpha: f64,
    /// Cutoff applied to raw, Bonferroni and FDR p-values
    pub cutoff: f64,
    pub fold_change_thresholds: FoldChangeThresholds,
    /// Header of the group-membership column
    pub group_column: String,
    /// Field delimiter of the input table
    pub delimiter: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            alpha: DEFAULT_ALPHA,
            cutoff: DEFAULT_ALPHA,
            fold_change_thresholds: FoldChangeThresholds::default(),
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
            delimiter: b'\t',
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base alpha for the per-family threshold
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the significance cutoff for raw and adjusted p-values
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set the volcano fold-change bounds
    pub fn with_fold_change_thresholds(mut self, lower: f64, upper: f64) -> Self {
        self.fold_change_thresholds = FoldChangeThresholds { lower, upper };
        self
    }

    pub fn with_group_column(mut self, column: &str) -> Self {
        self.group_column = column.to_string();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_workflow() {
        let config = AnalysisConfig::default();
        assert_eq!(config.alpha, 0.05);
        assert_eq!(config.cutoff, 0.05);
        assert_eq!(config.fold_change_thresholds, FoldChangeThresholds { lower: 0.0, upper: 0.0 });
        assert_eq!(config.group_column, "group");
        assert_eq!(config.delimiter, b'\t');
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalysisConfig::new()
            .with_alpha(0.01)
            .with_cutoff(0.1)
            .with_fold_change_thresholds(-1.0, 1.0)
            .with_group_column("condition")
            .with_delimiter(b',');

        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.cutoff, 0.1);
        assert_eq!(config.fold_change_thresholds.lower, -1.0);
        assert_eq!(config.fold_change_thresholds.upper, 1.0);
        assert_eq!(config.group_column, "condition");
        assert_eq!(config.delimiter, b',');
    }
}
