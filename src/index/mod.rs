//! Spatial indexes over a point set
//!
//! Both implementations answer the same two questions, radius and k-nearest,
//! and return identical results. Which one to use is a performance choice:
//! the linear scan wins for small sets, the ball tree prunes for large ones.

pub mod balltree;
pub mod brute;

pub use balltree::{BallTreeIndex, BallTreeParams};
pub use brute::BruteForceIndex;

use ndarray::ArrayView1;
use crate::error::{ClusterError, Result};
use crate::points::PointSet;

/// Point sets below this size are scanned linearly when the index kind is `Auto`
pub const AUTO_BALL_TREE_THRESHOLD: usize = 1024;

/// A point set member found by a query, with its distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the point set
    pub index: usize,

    /// Euclidean distance to the query location
    pub distance: f64,
}

/// Read-only proximity queries over a fixed point set.
///
/// Implementations are immutable once built, so concurrent queries need no
/// locking.
pub trait SpatialIndex: Send + Sync {
    /// Number of indexed points
    fn len(&self) -> usize;

    /// Coordinates per point
    fn dimension(&self) -> usize;

    /// Coordinates of an indexed point, for use as a query location
    fn point(&self, index: usize) -> ArrayView1<'_, f64>;

    /// Every point within `radius` of `query` (closed ball), ascending by index.
    /// No match is an empty vector, not an error.
    fn radius_query(&self, query: ArrayView1<'_, f64>, radius: f64) -> Result<Vec<Neighbor>>;

    /// The `k` points closest to `query`, ascending by distance then index
    fn k_nearest(&self, query: ArrayView1<'_, f64>, k: usize) -> Result<Vec<Neighbor>>;

    /// True if nothing is indexed
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which index implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IndexKind {
    /// Linear scan below `AUTO_BALL_TREE_THRESHOLD` points, ball tree above
    #[default]
    Auto,

    /// Linear scan
    BruteForce,

    /// Ball tree with default parameters
    BallTree,
}

/// Build the index selected by `kind`, taking ownership of the points
pub fn build_index(points: PointSet, kind: IndexKind) -> Result<Box<dyn SpatialIndex>> {
    let resolved = match kind {
        IndexKind::Auto if points.len() < AUTO_BALL_TREE_THRESHOLD => IndexKind::BruteForce,
        IndexKind::Auto => IndexKind::BallTree,
        other => other,
    };

    log::debug!(
        "Building {:?} index over {} points of dimension {}",
        resolved,
        points.len(),
        points.dimension()
    );

    match resolved {
        IndexKind::BallTree => Ok(Box::new(BallTreeIndex::build(points, BallTreeParams::default())?)),
        _ => Ok(Box::new(BruteForceIndex::build(points)?)),
    }
}

/// Shared argument checks for `k_nearest`
pub(crate) fn check_k(k: usize, len: usize) -> Result<()> {
    if k == 0 {
        return Err(ClusterError::InvalidArgument("k must be at least 1".to_string()));
    }
    if k > len {
        return Err(ClusterError::InvalidArgument(format!(
            "requested {} nearest neighbors but only {} points are indexed",
            k, len
        )));
    }
    Ok(())
}
