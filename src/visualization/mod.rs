//! Plot-ready tables for the significance/effect-size scatter and the
//! intensity heatmap. Nothing here renders; callers hand these tables to a
//! plotting backend.

use crate::config::FoldChangeThresholds;
use crate::data::{GroupLabels, MarkerTable};
use crate::error::Result;
use crate::testing::correction::CorrectedStatistics;
use crate::testing::significance::SignificantMarkers;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regulation {
    Up,
    Down,
    NotSignificant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolcanoPoint {
    pub marker: String,
    pub log2_fold_change: f64,
    /// Bonferroni-adjusted p-value
    pub p_value: f64,
    /// -log10 of `p_value`, infinite for p = 0
    pub neg_log10_p: f64,
    pub regulation: Regulation,
}

/// One point per marker, in marker-column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolcanoTable {
    pub points: Vec<VolcanoPoint>,
    pub cutoff: f64,
    pub thresholds: FoldChangeThresholds,
}

impl VolcanoTable {
    pub fn new(corrected: &CorrectedStatistics, cutoff: f64, thresholds: FoldChangeThresholds) -> Self {
        let points = corrected
            .records
            .iter()
            .map(|record| {
                let p_value = record.bonferroni_p_value;
                let lfc = record.log2_fold_change;
                let regulation = if p_value < cutoff && lfc > thresholds.upper {
                    Regulation::Up
                } else if p_value < cutoff && lfc < thresholds.lower {
                    Regulation::Down
                } else {
                    Regulation::NotSignificant
                };

                VolcanoPoint {
                    marker: record.marker.clone(),
                    log2_fold_change: lfc,
                    p_value,
                    neg_log10_p: -p_value.log10(),
                    regulation,
                }
            })
            .collect();

        VolcanoTable {
            points,
            cutoff,
            thresholds,
        }
    }

    pub fn count(&self, regulation: Regulation) -> usize {
        self.points.iter().filter(|p| p.regulation == regulation).count()
    }
}

/// Standardized values of the Bonferroni-significant markers for all samples.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityMap {
    pub table: MarkerTable,
    pub labels: GroupLabels,
}

impl IntensityMap {
    pub fn new(
        standardized: &MarkerTable,
        labels: &GroupLabels,
        significant: &SignificantMarkers,
    ) -> Result<Self> {
        Ok(IntensityMap {
            table: standardized.select_markers(&significant.bonferroni)?,
            labels: labels.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.table.n_markers() == 0
    }
}
