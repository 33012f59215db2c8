//! Seeded density expansion
//!
//! Grows the one cluster that is density-reachable from a seed location. The
//! seed's closed `radius` ball is queried first; if it holds fewer than
//! `min_neighbors` points those points are the whole answer. Otherwise every
//! point found is queued and expanded in turn: a point whose own ball holds
//! at least `min_neighbors` points pulls its neighbors into the cluster, any
//! other point stays as a boundary member. Points never reachable from the
//! seed are left out rather than assigned elsewhere.

use std::collections::VecDeque;
use ndarray::ArrayView1;
use rayon::prelude::*;
use crate::cluster::Cluster;
use crate::error::{check_dimension, check_radius, ClusterError, Result};
use crate::index::{Neighbor, SpatialIndex};

/// How the frontier is drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionMode {
    /// One radius query at a time, first in first out
    #[default]
    Sequential,

    /// The whole frontier is queried concurrently as a wave, then merged in
    /// frontier order on the calling thread. Same members as `Sequential`.
    Parallel,
}

/// Density criterion and execution options for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionParams {
    /// Neighbors a location needs within `radius` to be a core location
    pub min_neighbors: usize,

    /// Closed neighborhood radius
    pub radius: f64,

    /// Count a member's own position toward its neighborhood size.
    /// The seed is never a member, so this only affects expansion.
    pub count_self: bool,

    /// Frontier draining strategy
    pub mode: ExpansionMode,
}

impl Default for ExpansionParams {
    fn default() -> Self {
        Self {
            min_neighbors: 12,
            radius: 1.0,
            count_self: false,
            mode: ExpansionMode::Sequential,
        }
    }
}

impl ExpansionParams {
    /// Sequential run with the given criterion, not counting self
    pub fn new(min_neighbors: usize, radius: f64) -> Self {
        Self {
            min_neighbors,
            radius,
            ..Default::default()
        }
    }

    /// Check both density parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_neighbors == 0 {
            return Err(ClusterError::InvalidArgument(
                "min_neighbors must be at least 1".to_string(),
            ));
        }
        check_radius(self.radius)
    }
}

/// A validated expansion bound to one index. Reusable across seeds.
pub struct SeededExpansion<'a, I: SpatialIndex + ?Sized> {
    index: &'a I,
    params: ExpansionParams,
}

/// Mutable bookkeeping of a run past the seed stage
struct Frontier {
    in_cluster: Vec<bool>,
    expanded: Vec<bool>,
    queue: VecDeque<usize>,
    core_points: usize,
    expansions: usize,
}

impl Frontier {
    fn from_seed_neighborhood(len: usize, neighborhood: &[Neighbor]) -> Self {
        let mut in_cluster = vec![false; len];
        let mut queue = VecDeque::with_capacity(neighborhood.len());
        for n in neighborhood {
            in_cluster[n.index] = true;
            queue.push_back(n.index);
        }

        Self {
            in_cluster,
            expanded: vec![false; len],
            queue,
            core_points: 0,
            expansions: 0,
        }
    }

    /// Apply the neighborhood of an expanded member `p`
    fn absorb(&mut self, p: usize, neighborhood: &[Neighbor], params: &ExpansionParams) {
        self.expansions += 1;

        let count = if params.count_self {
            neighborhood.len()
        } else {
            neighborhood.iter().filter(|n| n.index != p).count()
        };
        if count < params.min_neighbors {
            return;
        }

        self.core_points += 1;
        for n in neighborhood {
            if !self.in_cluster[n.index] {
                self.in_cluster[n.index] = true;
                self.queue.push_back(n.index);
            }
        }
    }

    fn into_cluster(self) -> Cluster {
        let members = self
            .in_cluster
            .iter()
            .enumerate()
            .filter_map(|(i, &member)| member.then_some(i))
            .collect();

        Cluster {
            members,
            seed_is_core: true,
            core_points: self.core_points,
            expansions: self.expansions,
        }
    }
}

impl<'a, I: SpatialIndex + ?Sized> SeededExpansion<'a, I> {
    /// Bind `params` to `index`, rejecting invalid parameters up front
    pub fn new(index: &'a I, params: ExpansionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { index, params })
    }

    /// Parameters of this expansion
    pub fn params(&self) -> &ExpansionParams {
        &self.params
    }

    /// Grow the cluster reachable from `seed`
    pub fn run(&self, seed: ArrayView1<'_, f64>) -> Result<Cluster> {
        if self.index.is_empty() {
            return Ok(Cluster {
                members: Vec::new(),
                seed_is_core: false,
                core_points: 0,
                expansions: 0,
            });
        }
        check_dimension("seed", seed.len(), self.index.dimension())?;
        if let Some((i, value)) = seed.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ClusterError::InvalidInput(format!(
                "seed has non-finite component {} at position {}",
                value, i
            )));
        }

        let neighborhood = self.index.radius_query(seed, self.params.radius)?;
        if neighborhood.len() < self.params.min_neighbors {
            log::debug!(
                "Seed has {} neighbors within {}, below {}; not expanding",
                neighborhood.len(),
                self.params.radius,
                self.params.min_neighbors
            );
            return Ok(Cluster {
                members: neighborhood.iter().map(|n| n.index).collect(),
                seed_is_core: false,
                core_points: 0,
                expansions: 0,
            });
        }

        log::debug!(
            "Seed is core with {} neighbors; expanding {:?}",
            neighborhood.len(),
            self.params.mode
        );

        let mut frontier = Frontier::from_seed_neighborhood(self.index.len(), &neighborhood);
        match self.params.mode {
            ExpansionMode::Sequential => self.drain_sequential(&mut frontier)?,
            ExpansionMode::Parallel => self.drain_parallel(&mut frontier)?,
        }

        let cluster = frontier.into_cluster();
        log::debug!(
            "Cluster has {} members, {} core, after {} expansions",
            cluster.size(),
            cluster.core_points,
            cluster.expansions
        );
        Ok(cluster)
    }

    fn drain_sequential(&self, frontier: &mut Frontier) -> Result<()> {
        while let Some(p) = frontier.queue.pop_front() {
            if frontier.expanded[p] {
                continue;
            }
            frontier.expanded[p] = true;

            let neighborhood = self.index.radius_query(self.index.point(p), self.params.radius)?;
            frontier.absorb(p, &neighborhood, &self.params);
        }
        Ok(())
    }

    fn drain_parallel(&self, frontier: &mut Frontier) -> Result<()> {
        while !frontier.queue.is_empty() {
            let mut wave = Vec::with_capacity(frontier.queue.len());
            for p in frontier.queue.drain(..) {
                if !frontier.expanded[p] {
                    frontier.expanded[p] = true;
                    wave.push(p);
                }
            }

            let radius = self.params.radius;
            let index = self.index;
            let neighborhoods: Vec<Result<Vec<Neighbor>>> = wave
                .par_iter()
                .map(|&p| index.radius_query(index.point(p), radius))
                .collect();

            // Single writer: membership only changes here
            for (&p, neighborhood) in wave.iter().zip(neighborhoods) {
                frontier.absorb(p, &neighborhood?, &self.params);
            }
        }
        Ok(())
    }
}

/// Cluster `seed` against `index` and return the member indices, ascending
pub fn cluster_with_seed<I: SpatialIndex + ?Sized>(
    index: &I,
    seed: ArrayView1<'_, f64>,
    min_neighbors: usize,
    radius: f64,
) -> Result<Vec<usize>> {
    let expansion = SeededExpansion::new(index, ExpansionParams::new(min_neighbors, radius))?;
    Ok(expansion.run(seed)?.members)
}
