//! Ball tree index
//!
//! Space partitioning with nested hyperspheres. Each node stores a center and
//! the largest distance from that center to any point below it, so a whole
//! subtree can be skipped once the query ball cannot reach its sphere.
//!
//! Nodes live in a flat arena and reference their points as a contiguous
//! range of a single permutation vector; nothing is boxed.
//!
//! # References
//!
//! - Omohundro (1989): "Five balltree construction algorithms"

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use ndarray::{Array1, ArrayView1};
use crate::error::{check_dimension, check_radius, ClusterError, Result};
use crate::index::{check_k, Neighbor, SpatialIndex};
use crate::points::distance::{by_distance_then_index, centroid, euclidean};
use crate::points::PointSet;

/// Absolute slack added to pruning bounds so rounding in the triangle
/// inequality never drops a point sitting exactly on the query radius
const PRUNE_TOLERANCE: f64 = 1e-9;

/// Ball tree parameters
#[derive(Clone, Debug)]
pub struct BallTreeParams {
    /// Maximum number of points in a leaf
    pub max_leaf_size: usize,

    /// Maximum depth; deeper nodes become leaves regardless of size
    pub max_depth: usize,
}

impl Default for BallTreeParams {
    fn default() -> Self {
        Self {
            max_leaf_size: 16,
            max_depth: 40,
        }
    }
}

#[derive(Debug)]
enum NodeKind {
    /// Points `order[start..end]`
    Leaf { start: usize, end: usize },
    Internal { left: usize, right: usize },
}

#[derive(Debug)]
struct BallNode {
    center: Array1<f64>,
    radius: f64,
    kind: NodeKind,
}

impl BallNode {
    /// Lower bound on the distance from `query` to any point in this ball
    fn min_distance(&self, query: ArrayView1<'_, f64>) -> f64 {
        (euclidean(query, self.center.view()) - self.radius).max(0.0)
    }
}

/// Max-heap entry for the k-nearest search; the worst kept candidate is on top
struct Candidate(f64, usize);

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        by_distance_then_index((self.0, self.1), (other.0, other.1))
    }
}

/// Ball tree over a point set. Immutable after `build`.
pub struct BallTreeIndex {
    points: PointSet,
    order: Vec<usize>,
    nodes: Vec<BallNode>,
    root: usize,
}

impl BallTreeIndex {
    /// Partition the points into a ball tree
    pub fn build(points: PointSet, params: BallTreeParams) -> Result<Self> {
        if params.max_leaf_size == 0 {
            return Err(ClusterError::InvalidArgument(
                "ball tree leaf size must be at least 1".to_string(),
            ));
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(2 * points.len() / params.max_leaf_size + 1);
        let root = build_node(&points, &params, &mut order, 0, 0, &mut nodes);

        log::debug!(
            "Built ball tree with {} nodes over {} points",
            nodes.len(),
            points.len()
        );

        Ok(Self {
            points,
            order,
            nodes,
            root,
        })
    }

    /// Number of arena nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Build the subtree over `order[..]`, whose first element sits at `offset`
/// in the full permutation. Returns the arena index of the new node.
fn build_node(
    points: &PointSet,
    params: &BallTreeParams,
    order: &mut [usize],
    offset: usize,
    depth: usize,
    nodes: &mut Vec<BallNode>,
) -> usize {
    let center = Array1::from(centroid(order.iter().map(|&i| points.point(i)), points.dimension()));
    let radius = order
        .iter()
        .map(|&i| euclidean(center.view(), points.point(i)))
        .fold(0.0f64, f64::max);

    if order.len() <= params.max_leaf_size || depth >= params.max_depth {
        nodes.push(BallNode {
            center,
            radius,
            kind: NodeKind::Leaf {
                start: offset,
                end: offset + order.len(),
            },
        });
        return nodes.len() - 1;
    }

    let split = partition(points, order, center.view());
    let (left_order, right_order) = order.split_at_mut(split);
    let left = build_node(points, params, left_order, offset, depth + 1, nodes);
    let right = build_node(points, params, right_order, offset + split, depth + 1, nodes);

    nodes.push(BallNode {
        center,
        radius,
        kind: NodeKind::Internal { left, right },
    });
    nodes.len() - 1
}

/// Reorder `order` so points closer to pivot `a` come first, where `a` is the
/// point farthest from the centroid and `b` the point farthest from `a`.
/// Returns the split position; both halves are non-empty.
fn partition(points: &PointSet, order: &mut [usize], center: ArrayView1<'_, f64>) -> usize {
    let a = farthest_from(points, center, order);
    let b = farthest_from(points, points.point(a), order);

    let (mut near_a, mut near_b): (Vec<usize>, Vec<usize>) = order.iter().copied().partition(|&i| {
        euclidean(points.point(i), points.point(a)) < euclidean(points.point(i), points.point(b))
    });

    if near_a.is_empty() || near_b.is_empty() {
        // Coincident points: any even split is as good as another
        return order.len() / 2;
    }

    let split = near_a.len();
    near_a.append(&mut near_b);
    order.copy_from_slice(&near_a);
    split
}

fn farthest_from(points: &PointSet, anchor: ArrayView1<'_, f64>, order: &[usize]) -> usize {
    order
        .iter()
        .copied()
        .max_by(|&x, &y| {
            euclidean(anchor, points.point(x)).total_cmp(&euclidean(anchor, points.point(y)))
        })
        .unwrap_or(0)
}

impl SpatialIndex for BallTreeIndex {
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

        let mut found = Vec::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.min_distance(query) > radius + PRUNE_TOLERANCE {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { start, end } => {
                    for &i in &self.order[start..end] {
                        let distance = euclidean(query, self.points.point(i));
                        if distance <= radius {
                            found.push(Neighbor { index: i, distance });
                        }
                    }
                }
                NodeKind::Internal { left, right } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }

        found.sort_unstable_by_key(|n| n.index);
        Ok(found)
    }

    fn k_nearest(&self, query: ArrayView1<'_, f64>, k: usize) -> Result<Vec<Neighbor>> {
        check_k(k, self.points.len())?;
        check_dimension("query", query.len(), self.points.dimension())?;

        let mut best: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if best.len() == k {
                if let Some(worst) = best.peek() {
                    // Equal bounds may still hold a lower-index tie
                    if node.min_distance(query) > worst.0 + PRUNE_TOLERANCE {
                        continue;
                    }
                }
            }

            match node.kind {
                NodeKind::Leaf { start, end } => {
                    for &i in &self.order[start..end] {
                        let candidate = Candidate(euclidean(query, self.points.point(i)), i);
                        if best.len() < k {
                            best.push(candidate);
                        } else if best.peek().map_or(false, |worst| candidate < *worst) {
                            best.pop();
                            best.push(candidate);
                        }
                    }
                }
                NodeKind::Internal { left, right } => {
                    // Push the farther child first so the nearer one is searched first
                    let left_min = self.nodes[left].min_distance(query);
                    let right_min = self.nodes[right].min_distance(query);
                    if left_min < right_min {
                        stack.push(right);
                        stack.push(left);
                    } else {
                        stack.push(left);
                        stack.push(right);
                    }
                }
            }
        }

        Ok(best
            .into_sorted_vec()
            .into_iter()
            .map(|Candidate(distance, index)| Neighbor { index, distance })
            .collect())
    }
}
