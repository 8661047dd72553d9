use crate::data::{GroupLabels, MarkerTable};
use crate::error::{MarkerError, Result};
use log::debug;

/// Rows of one table split by group label.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPartition {
    /// Samples labelled 0
    pub group0: MarkerTable,
    /// Samples labelled 1
    pub group1: MarkerTable,
}

/// Raw and standardized tables split with the same row indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedTables {
    pub raw: GroupPartition,
    pub standardized: GroupPartition,
}

/// Get row indices for each group
pub fn get_group_indices(labels: &GroupLabels, n_samples: usize) -> Result<(Vec<usize>, Vec<usize>)> {
    if labels.len() != n_samples {
        return Err(MarkerError::DimensionMismatch {
            expected: format!("{} group labels", n_samples),
            got: format!("{} labels", labels.len()),
        });
    }

    let mut group0_indices = Vec::new();
    let mut group1_indices = Vec::new();
    for (sample, &label) in labels.as_slice().iter().enumerate() {
        match label {
            0 => group0_indices.push(sample),
            1 => group1_indices.push(sample),
            value => return Err(MarkerError::InvalidLabel { sample, value }),
        }
    }

    if group0_indices.is_empty() || group1_indices.is_empty() {
        return Err(MarkerError::EmptyInput {
            reason: format!(
                "both groups need samples, got {} in group 0 and {} in group 1",
                group0_indices.len(),
                group1_indices.len()
            ),
        });
    }

    Ok((group0_indices, group1_indices))
}

/// Split a table into its label-0 and label-1 rows.
pub fn partition(table: &MarkerTable, labels: &GroupLabels) -> Result<GroupPartition> {
    let (group0_indices, group1_indices) = get_group_indices(labels, table.n_samples())?;
    Ok(GroupPartition {
        group0: table.select_samples(&group0_indices),
        group1: table.select_samples(&group1_indices),
    })
}

/// Split the raw and standardized tables from one set of row indices.
///
/// Both tables must have the same shape and marker order.
pub fn partition_pair(
    raw: &MarkerTable,
    standardized: &MarkerTable,
    labels: &GroupLabels,
) -> Result<PartitionedTables> {
    if raw.values().dim() != standardized.values().dim() || raw.markers() != standardized.markers() {
        return Err(MarkerError::DimensionMismatch {
            expected: format!("{:?} standardized table matching raw", raw.values().dim()),
            got: format!("{:?}", standardized.values().dim()),
        });
    }

    let (group0_indices, group1_indices) = get_group_indices(labels, raw.n_samples())?;
    debug!(
        "Partitioned {} samples into {} (group 0) and {} (group 1)",
        raw.n_samples(),
        group0_indices.len(),
        group1_indices.len()
    );

    Ok(PartitionedTables {
        raw: GroupPartition {
            group0: raw.select_samples(&group0_indices),
            group1: raw.select_samples(&group1_indices),
        },
        standardized: GroupPartition {
            group0: standardized.select_samples(&group0_indices),
            group1: standardized.select_samples(&group1_indices),
        },
    })
}
