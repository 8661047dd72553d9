//! The fixed two-group marker analysis, from loaded table to plot-ready
//! output.
//!
//! Stages run in order and each returns a freshly owned value: standardize,
//! partition, test, correct, filter, prepare visualization. A failing stage
//! aborts the run; the error carries the stage name as context and the
//! underlying [`MarkerError`](crate::error::MarkerError) names the marker
//! where one is involved.

use crate::config::AnalysisConfig;
use crate::data::standardize::standardize;
use crate::data::{GroupLabels, MarkerTable};
use crate::error::MarkerError;
use crate::io::read_marker_table;
use crate::testing::correction::{correct, CorrectedStatistics};
use crate::testing::inference::MarkerStatTests;
use crate::testing::significance::SignificantMarkers;
use crate::testing::utils::partition_pair;
use crate::visualization::{IntensityMap, Regulation, VolcanoTable};
use anyhow::Context;
use log::info;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub statistics: CorrectedStatistics,
    pub significant: SignificantMarkers,
    pub volcano: VolcanoTable,
    pub intensity_map: IntensityMap,
}

/// Run the full analysis on an in-memory table.
pub fn run_analysis(
    table: &MarkerTable,
    labels: &GroupLabels,
    config: &AnalysisConfig,
) -> anyhow::Result<AnalysisReport> {
    if table.n_markers() == 0 {
        return Err(MarkerError::EmptyInput {
            reason: "table has no marker columns".to_string(),
        })
        .context("validating input");
    }
    if labels.len() != table.n_samples() {
        return Err(MarkerError::DimensionMismatch {
            expected: format!("{} group labels", table.n_samples()),
            got: format!("{} labels", labels.len()),
        })
        .context("validating input");
    }
    info!(
        "Analysing {} markers over {} samples",
        table.n_markers(),
        table.n_samples()
    );

    let standardized = standardize(table).context("standardizing markers")?;
    let parts = partition_pair(table, &standardized, labels).context("partitioning samples by group")?;
    info!(
        "Group sizes: {} (group 0), {} (group 1)",
        parts.raw.group0.n_samples(),
        parts.raw.group1.n_samples()
    );

    let statistics = parts
        .differential_expression()
        .context("testing markers for differential expression")?;
    let corrected = correct(&statistics, config.alpha).context("correcting for multiple testing")?;

    let significant = SignificantMarkers::from_corrected(&corrected, config.cutoff);
    info!(
        "Significant markers: {} raw, {} below alpha/N, {} Bonferroni, {} FDR",
        significant.raw.len(),
        significant.alpha_threshold.len(),
        significant.bonferroni.len(),
        significant.fdr.len()
    );

    let volcano = VolcanoTable::new(&corrected, config.cutoff, config.fold_change_thresholds);
    info!(
        "Volcano: {} up, {} down",
        volcano.count(Regulation::Up),
        volcano.count(Regulation::Down)
    );
    let intensity_map = IntensityMap::new(&standardized, labels, &significant)
        .context("preparing intensity map")?;

    Ok(AnalysisReport {
        statistics: corrected,
        significant,
        volcano,
        intensity_map,
    })
}

/// Load a delimited table from `path` and run the full analysis on it.
pub fn run_analysis_from_path<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> anyhow::Result<AnalysisReport> {
    let (table, labels) = read_marker_table(path.as_ref(), config)
        .with_context(|| format!("loading {}", path.as_ref().display()))?;
    run_analysis(&table, &labels, config)
}
