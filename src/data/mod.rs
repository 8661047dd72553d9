//! In-memory marker tables and group labels.
//!
//! A [`MarkerTable`] is dense: one row per sample, one column per marker. Row
//! order is sample identity and every table derived from it (standardized,
//! partitioned, restricted to significant markers) keeps that order.

use crate::error::{MarkerError, Result};
use ndarray::{Array2, ArrayView1, Axis};
use std::collections::HashSet;

pub mod standardize;
pub mod summary;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTable {
    markers: Vec<String>,
    values: Array2<f64>,
}

impl MarkerTable {
    /// Build a table from marker names and a samples × markers matrix.
    ///
    /// Marker names must be unique and match the number of columns.
    pub fn new(markers: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if markers.len() != values.ncols() {
            return Err(MarkerError::DimensionMismatch {
                expected: format!("{} marker columns", markers.len()),
                got: format!("{} columns", values.ncols()),
            });
        }

        let mut seen = HashSet::with_capacity(markers.len());
        for marker in &markers {
            if !seen.insert(marker.as_str()) {
                return Err(MarkerError::DuplicateMarker {
                    marker: marker.clone(),
                });
            }
        }

        Ok(MarkerTable { markers, values })
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_samples(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_markers(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_index(&self, marker: &str) -> Option<usize> {
        self.markers.iter().position(|m| m == marker)
    }

    /// Values of one marker across all samples
    pub fn column(&self, marker: &str) -> Option<ArrayView1<'_, f64>> {
        self.marker_index(marker)
            .map(|idx| self.values.column(idx))
    }

    /// New table holding only the given rows, in the given order
    pub fn select_samples(&self, rows: &[usize]) -> MarkerTable {
        MarkerTable {
            markers: self.markers.clone(),
            values: self.values.select(Axis(0), rows),
        }
    }

    /// New table holding only the named markers, in the order given.
    pub fn select_markers(&self, markers: &[String]) -> Result<MarkerTable> {
        let indices = markers
            .iter()
            .map(|marker| {
                self.marker_index(marker)
                    .ok_or_else(|| MarkerError::DimensionMismatch {
                        expected: format!("marker '{}' in table", marker),
                        got: "no such column".to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MarkerTable {
            markers: markers.to_vec(),
            values: self.values.select(Axis(1), &indices),
        })
    }

    /// Same markers and sample order with new values
    pub(crate) fn with_values(&self, values: Array2<f64>) -> MarkerTable {
        MarkerTable {
            markers: self.markers.clone(),
            values,
        }
    }
}

/// Group membership per sample, aligned with the rows of a [`MarkerTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLabels(Vec<i64>);

impl GroupLabels {
    pub fn new(labels: Vec<i64>) -> Self {
        GroupLabels(labels)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<i64>> for GroupLabels {
    fn from(labels: Vec<i64>) -> Self {
        GroupLabels(labels)
    }
}
