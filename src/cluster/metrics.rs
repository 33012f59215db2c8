//! Cluster statistics

use statrs::statistics::Statistics;
use crate::cluster::Cluster;
use crate::index::SpatialIndex;
use crate::points::distance::{centroid, euclidean};

/// Shape of a cluster in coordinate space
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub size: usize,

    /// Mean of the member coordinates; empty for an empty cluster
    pub centroid: Vec<f64>,

    /// Mean distance from members to the centroid
    pub mean_distance: f64,

    /// Largest distance from a member to the centroid
    pub max_distance: f64,

    /// Sample standard deviation of member-to-centroid distances
    pub std_distance: f64,
}

/// Summarize the members of `cluster` using the coordinates held by `index`
pub fn summarize<I: SpatialIndex + ?Sized>(index: &I, cluster: &Cluster) -> ClusterSummary {
    if cluster.is_empty() {
        return ClusterSummary {
            size: 0,
            centroid: Vec::new(),
            mean_distance: 0.0,
            max_distance: 0.0,
            std_distance: 0.0,
        };
    }

    let center = ndarray::Array1::from(centroid(
        cluster.members.iter().map(|&i| index.point(i)),
        index.dimension(),
    ));

    let distances: Vec<f64> = cluster
        .members
        .iter()
        .map(|&i| euclidean(center.view(), index.point(i)))
        .collect();

    let std_distance = if distances.len() > 1 {
        distances.iter().std_dev()
    } else {
        0.0
    };

    ClusterSummary {
        size: cluster.size(),
        mean_distance: distances.iter().mean(),
        max_distance: distances.iter().copied().fold(0.0, f64::max),
        std_distance,
        centroid: center.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::BruteForceIndex;
    use crate::points::PointSet;

    fn square() -> BruteForceIndex {
        let rows = vec![vec![0.0, 0.0], vec![2.0, 0.0], vec![0.0, 2.0], vec![2.0, 2.0], vec![9.0, 9.0]];
        BruteForceIndex::build(PointSet::from_rows(&rows).unwrap()).unwrap()
    }

    fn cluster(members: Vec<usize>) -> Cluster {
        Cluster {
            members,
            seed_is_core: true,
            core_points: 0,
            expansions: 0,
        }
    }

    #[test]
    fn square_corners_are_equidistant() {
        let summary = summarize(&square(), &cluster(vec![0, 1, 2, 3]));
        assert_eq!(summary.size, 4);
        assert_eq!(summary.centroid, vec![1.0, 1.0]);
        assert!((summary.mean_distance - 2f64.sqrt()).abs() < 1e-12);
        assert!((summary.max_distance - 2f64.sqrt()).abs() < 1e-12);
        assert!(summary.std_distance.abs() < 1e-12);
    }

    #[test]
    fn single_member_has_no_spread() {
        let summary = summarize(&square(), &cluster(vec![4]));
        assert_eq!(summary.centroid, vec![9.0, 9.0]);
        assert_eq!(summary.max_distance, 0.0);
        assert_eq!(summary.std_distance, 0.0);
    }

    #[test]
    fn empty_cluster_summary() {
        let summary = summarize(&square(), &cluster(vec![]));
        assert_eq!(summary.size, 0);
        assert!(summary.centroid.is_empty());
    }
}
