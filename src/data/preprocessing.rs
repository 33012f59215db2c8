//! Coordinate preprocessing applied before indexing

use std::ops::Range;
use ndarray::{s, Axis};
use crate::error::{ClusterError, Result};
use crate::points::PointSet;

/// Columns holding the translation part of a 6-D pose vector
pub const TRANSLATION_COLUMNS: Range<usize> = 0..3;

/// Hypersphere radius the translation block is scaled onto
pub const TRANSLATION_SPHERE_RADIUS: f64 = std::f64::consts::PI;

/// `translations_scaling` value written to sweep metadata when translations
/// were rescaled. Existing facet consumers expect this label; the scaling
/// itself uses [`TRANSLATION_SPHERE_RADIUS`].
pub const TRANSLATIONS_SCALING_LABEL: f64 = 2.0 * 3.1416;

/// Scale the block of `columns` so that the largest per-point norm over
/// those columns becomes `radius`. Other columns are untouched. A block
/// that is zero everywhere is returned unchanged.
pub fn rescale_hypersphere(points: PointSet, columns: Range<usize>, radius: f64) -> Result<PointSet> {
    if columns.is_empty() || columns.end > points.dimension() {
        return Err(ClusterError::InvalidArgument(format!(
            "cannot rescale columns {:?} of {}-dimensional points",
            columns,
            points.dimension()
        )));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(ClusterError::InvalidArgument(format!(
            "hypersphere radius must be positive, got {}",
            radius
        )));
    }

    let mut coords = points.into_array();
    let mut block = coords.slice_mut(s![.., columns]);

    let max_norm = block
        .axis_iter(Axis(0))
        .map(|row| row.dot(&row).sqrt())
        .fold(0.0f64, f64::max);

    if max_norm > 0.0 {
        let scale = radius / max_norm;
        log::debug!("Rescaling by {} (largest norm {})", scale, max_norm);
        block.mapv_inplace(|v| v * scale);
    }

    PointSet::from_array(coords)
}
