//! Linear-scan index

use ndarray::ArrayView1;
use rayon::prelude::*;
use crate::error::{check_dimension, check_radius, Result};
use crate::index::{check_k, Neighbor, SpatialIndex};
use crate::points::distance::{by_distance_then_index, euclidean};
use crate::points::PointSet;

/// Scans above this many points are split across the rayon pool
pub const PARALLEL_SCAN_THRESHOLD: usize = 10_000;

/// Index that answers every query by measuring every point.
///
/// O(N) per query. Results match `BallTreeIndex` exactly; this is the
/// better choice for small point sets where tree overhead dominates.
pub struct BruteForceIndex {
    points: PointSet,
}

impl BruteForceIndex {
    /// Take ownership of the points. Nothing is precomputed.
    pub fn build(points: PointSet) -> Result<Self> {
        Ok(Self { points })
    }

    fn distances(&self, query: ArrayView1<'_, f64>) -> Vec<(f64, usize)> {
        let n = self.points.len();
        if n < PARALLEL_SCAN_THRESHOLD {
            (0..n)
                .map(|i| (euclidean(query, self.points.point(i)), i))
                .collect()
        } else {
            (0..n)
                .into_par_iter()
                .map(|i| (euclidean(query, self.points.point(i)), i))
                .collect()
        }
    }
}

impl SpatialIndex for BruteForceIndex {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn dimension(&self) -> usize {
        self.points.dimension()
    }

    fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.points.point(index)
    }

    fn radius_query(&self, query: ArrayView1<'_, f64>, radius: f64) -> Result<Vec<Neighbor>> {
        check_radius(radius)?;
        check_dimension("query", query.len(), self.points.dimension())?;

        let within = |i: usize| {
            let distance = euclidean(query, self.points.point(i));
            (distance <= radius).then_some(Neighbor { index: i, distance })
        };

        let n = self.points.len();
        let neighbors = if n < PARALLEL_SCAN_THRESHOLD {
            (0..n).filter_map(within).collect()
        } else {
            // Order-preserving collect keeps the result ascending by index
            (0..n).into_par_iter().filter_map(within).collect()
        };

        Ok(neighbors)
    }

    fn k_nearest(&self, query: ArrayView1<'_, f64>, k: usize) -> Result<Vec<Neighbor>> {
        check_k(k, self.points.len())?;
        check_dimension("query", query.len(), self.points.dimension())?;

        let mut all = self.distances(query);
        if k < all.len() {
            all.select_nth_unstable_by(k - 1, |a, b| by_distance_then_index(*a, *b));
            all.truncate(k);
        }
        all.sort_unstable_by(|a, b| by_distance_then_index(*a, *b));

        Ok(all
            .into_iter()
            .map(|(distance, index)| Neighbor { index, distance })
            .collect())
    }
}
