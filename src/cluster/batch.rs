//! Density sweeps: the same seed clustered at many radii

use ndarray::ArrayView1;
use rayon::prelude::*;
use crate::cluster::expansion::{ExpansionParams, SeededExpansion};
use crate::error::{ClusterError, Result};
use crate::index::SpatialIndex;

/// One sample of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSample {
    pub density: f64,

    /// `density / N`
    pub radius: f64,

    /// Members of the cluster grown at this radius, ascending
    pub members: Vec<usize>,
}

/// `samples` evenly spaced values from `begin` to `end`, both included
pub fn linspace(begin: f64, end: f64, samples: usize) -> Result<Vec<f64>> {
    match samples {
        0 => Err(ClusterError::InvalidArgument(
            "a sweep needs at least one sample".to_string(),
        )),
        1 => Ok(vec![begin]),
        _ => {
            let step = (end - begin) / (samples - 1) as f64;
            Ok((0..samples)
                .map(|i| if i + 1 == samples { end } else { begin + step * i as f64 })
                .collect())
        }
    }
}

/// Cluster `seed` once per density, with radius `density / N`.
///
/// Runs are independent and share the read-only index, so they execute on
/// the rayon pool. Results come back in `densities` order.
pub fn cluster_sweep<I: SpatialIndex + ?Sized>(
    index: &I,
    seed: ArrayView1<'_, f64>,
    base: &ExpansionParams,
    densities: &[f64],
) -> Result<Vec<SweepSample>> {
    let n = index.len().max(1) as f64;
    log::info!(
        "Sweeping {} densities over {} points (min_neighbors = {})",
        densities.len(),
        index.len(),
        base.min_neighbors
    );

    // Validate every radius before any run starts
    let expansions = densities
        .iter()
        .map(|&density| {
            let params = ExpansionParams {
                radius: density / n,
                ..base.clone()
            };
            SeededExpansion::new(index, params).map(|e| (density, e))
        })
        .collect::<Result<Vec<_>>>()?;

    expansions
        .par_iter()
        .map(|(density, expansion)| {
            let cluster = expansion.run(seed)?;
            log::debug!(
                "Density {} (radius {}): {} members",
                density,
                expansion.params().radius,
                cluster.size()
            );
            Ok(SweepSample {
                density: *density,
                radius: expansion.params().radius,
                members: cluster.members,
            })
        })
        .collect()
}
