//! Significant marker sets, one per p-value variant.

use crate::testing::correction::{CorrectedRecord, CorrectedStatistics};
use serde::Serialize;

/// Markers passing each significance criterion, in marker-column order.
///
/// The four sets are independent; a marker may belong to any combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignificantMarkers {
    /// Raw p-value below the cutoff
    pub raw: Vec<String>,
    /// Raw p-value below the per-family alpha threshold
    pub alpha_threshold: Vec<String>,
    /// Bonferroni-adjusted p-value below the cutoff
    pub bonferroni: Vec<String>,
    /// FDR-adjusted p-value below the cutoff
    pub fdr: Vec<String>,
}

impl SignificantMarkers {
    pub fn from_corrected(corrected: &CorrectedStatistics, cutoff: f64) -> Self {
        SignificantMarkers {
            raw: select(corrected, |r| r.p_value < cutoff),
            alpha_threshold: select(corrected, |r| r.p_value < corrected.alpha_adjusted),
            bonferroni: select(corrected, |r| r.bonferroni_p_value < cutoff),
            fdr: select(corrected, |r| r.fdr_p_value < cutoff),
        }
    }
}

fn select<F>(corrected: &CorrectedStatistics, predicate: F) -> Vec<String>
where
    F: Fn(&CorrectedRecord) -> bool,
{
    corrected
        .records
        .iter()
        .filter(|r| predicate(r))
        .map(|r| r.marker.clone())
        .collect()
}
