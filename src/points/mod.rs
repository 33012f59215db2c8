//! Point set storage

pub mod distance;

use ndarray::{Array2, ArrayView1};
use crate::error::{ClusterError, Result};

/// Immutable N x D matrix of points, one point per row.
///
/// A point's row index is its only identity; nothing else in the crate
/// assigns ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    coords: Array2<f64>,
}

impl PointSet {
    /// Build a point set from an owned row-major matrix
    pub fn from_array(coords: Array2<f64>) -> Result<Self> {
        if coords.nrows() == 0 {
            return Err(ClusterError::InvalidInput("point set is empty".to_string()));
        }
        if coords.ncols() == 0 {
            return Err(ClusterError::InvalidInput(
                "points must have at least one coordinate".to_string(),
            ));
        }
        if let Some(((row, col), value)) = coords.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ClusterError::InvalidInput(format!(
                "point {} has non-finite coordinate {} at position {}",
                row, value, col
            )));
        }

        Ok(Self { coords })
    }

    /// Build a point set from a list of points, checking that every point
    /// has the dimension of the first one
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| ClusterError::InvalidInput("point set is empty".to_string()))?;
        let dimension = first.len();

        let mut flat = Vec::with_capacity(rows.len() * dimension);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dimension {
                return Err(ClusterError::InvalidInput(format!(
                    "point {} has dimension {}, expected {}",
                    i,
                    row.len(),
                    dimension
                )));
            }
            flat.extend_from_slice(row);
        }

        let coords = Array2::from_shape_vec((rows.len(), dimension), flat)
            .map_err(|e| ClusterError::InvalidInput(format!("cannot shape point matrix: {}", e)))?;

        Self::from_array(coords)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    /// Always false for a constructed point set
    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    /// Number of coordinates per point
    pub fn dimension(&self) -> usize {
        self.coords.ncols()
    }

    /// Coordinates of the point at `index`
    pub fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.coords.row(index)
    }

    /// Hand the matrix back, e.g. to rescale columns before re-validating
    pub fn into_array(self) -> Array2<f64> {
        self.coords
    }
}
