//! Seeded cluster extraction

pub mod batch;
pub mod expansion;
pub mod metrics;

pub use expansion::{cluster_with_seed, ExpansionMode, ExpansionParams, SeededExpansion};

use ndarray::ArrayView1;
use crate::error::Result;
use crate::index::{build_index, IndexKind, SpatialIndex};
use crate::points::PointSet;

/// The single cluster grown from a seed
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Member indices into the point set, ascending, no duplicates
    pub members: Vec<usize>,

    /// Whether the seed's own neighborhood reached `min_neighbors`.
    /// When false the members are exactly the seed's neighborhood.
    pub seed_is_core: bool,

    /// Members whose neighborhood reached `min_neighbors`
    pub core_points: usize,

    /// Radius queries issued for members (the seed's query not included)
    pub expansions: usize,
}

impl Cluster {
    /// Number of members
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// True when nothing was reachable from the seed
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members that were reached but did not propagate expansion
    pub fn boundary_points(&self) -> usize {
        if self.seed_is_core {
            self.members.len() - self.core_points
        } else {
            0
        }
    }
}

/// A point set indexed once and clustered from any number of seeds
pub struct Clusterer {
    index: Box<dyn SpatialIndex>,
}

impl Clusterer {
    /// Index `points` with the automatically chosen index
    pub fn new(points: PointSet) -> Result<Self> {
        Self::with_index(points, IndexKind::Auto)
    }

    /// Index `points` with a specific index implementation
    pub fn with_index(points: PointSet, kind: IndexKind) -> Result<Self> {
        Ok(Self {
            index: build_index(points, kind)?,
        })
    }

    /// The underlying index
    pub fn index(&self) -> &dyn SpatialIndex {
        self.index.as_ref()
    }

    /// Members of the cluster grown from `seed`, ascending
    pub fn cluster(&self, seed: ArrayView1<'_, f64>, min_neighbors: usize, radius: f64) -> Result<Vec<usize>> {
        cluster_with_seed(self.index.as_ref(), seed, min_neighbors, radius)
    }

    /// Full cluster record for `seed` under `params`
    pub fn run(&self, seed: ArrayView1<'_, f64>, params: &ExpansionParams) -> Result<Cluster> {
        SeededExpansion::new(self.index.as_ref(), params.clone())?.run(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn clusterer(kind: IndexKind) -> Clusterer {
        let rows = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0].iter().map(|&x| vec![x]).collect::<Vec<_>>();
        Clusterer::with_index(PointSet::from_rows(&rows).unwrap(), kind).unwrap()
    }

    #[test]
    fn every_index_kind_gives_the_same_cluster() {
        for kind in [IndexKind::Auto, IndexKind::BruteForce, IndexKind::BallTree] {
            let c = clusterer(kind);
            assert_eq!(c.cluster(array![0.0].view(), 2, 1.5).unwrap(), vec![0, 1, 2]);
            assert_eq!(c.cluster(array![11.2].view(), 2, 1.5).unwrap(), vec![3, 4, 5]);
            assert!(c.cluster(array![20.0].view(), 2, 1.5).unwrap().is_empty());
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let c = clusterer(IndexKind::BallTree);
        let params = ExpansionParams::new(2, 1.5);
        let first = c.run(array![1.0].view(), &params).unwrap();
        let second = c.run(array![1.0].view(), &params).unwrap();
        assert_eq!(first, second);
        assert!(first.seed_is_core);
        assert_eq!(first.boundary_points(), first.size() - first.core_points);
    }

    #[test]
    fn whole_set_when_radius_covers_everything() {
        let c = clusterer(IndexKind::BruteForce);
        assert_eq!(c.cluster(array![6.0].view(), 6, 100.0).unwrap(), vec![0, 1, 2, 3, 4, 5]);
    }
}
