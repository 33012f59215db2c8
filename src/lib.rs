//! Seeded density clustering over a point cloud
//!
//! Extracts the one density-connected cluster that contains, or lies closest
//! to, a caller supplied seed location. Points that are not density-reachable
//! from the seed are discarded as outliers.

pub mod config;
pub mod data;
pub mod error;
pub mod index;
pub mod points;
pub mod cluster;
pub mod storage;

pub use cluster::{cluster_with_seed, Cluster, Clusterer, ExpansionMode, ExpansionParams};
pub use error::ClusterError;
pub use index::{IndexKind, Neighbor, SpatialIndex};
pub use points::PointSet;
