//! Configuration for a clustering run

use crate::cluster::{ExpansionMode, ExpansionParams};
use crate::index::IndexKind;

/// Default configuration for a clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Neighbors within `radius` a location needs to be a core location
    pub min_neighbors: usize,

    /// Neighborhood radius
    pub radius: f64,

    /// Comma separated seed; blank means the origin
    pub seed: String,

    /// Index implementation
    pub index: IndexKind,

    /// Count a member's own position toward its neighborhood size
    pub count_self: bool,

    /// Query the frontier in parallel waves
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_neighbors: 12,
            radius: 1.0,
            seed: String::new(),
            index: IndexKind::Auto,
            count_self: false,
            parallel: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom density parameters
    pub fn new(min_neighbors: usize, radius: f64) -> Self {
        Self {
            min_neighbors,
            radius,
            ..Default::default()
        }
    }

    /// Engine parameters described by this configuration
    pub fn expansion_params(&self) -> ExpansionParams {
        ExpansionParams {
            min_neighbors: self.min_neighbors,
            radius: self.radius,
            count_self: self.count_self,
            mode: if self.parallel {
                ExpansionMode::Parallel
            } else {
                ExpansionMode::Sequential
            },
        }
    }
}
