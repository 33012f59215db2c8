//! Error kinds surfaced by the clustering core

use thiserror::Error;

/// Failures reported by point-set construction, index queries and the engine.
///
/// An empty cluster is a valid result and is never encoded as an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Malformed data: empty point set, ragged dimensions, seed dimension mismatch
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parameter outside its domain: non-positive `minNeighbors` or radius,
    /// `k` larger than the point set
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ClusterError>;

/// Reject a radius that is not a strictly positive finite number.
pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ClusterError::InvalidArgument(format!(
            "radius must be a positive finite number, got {}",
            radius
        )))
    }
}

/// Reject a query vector whose length differs from the indexed dimension.
pub(crate) fn check_dimension(what: &str, got: usize, expected: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(ClusterError::InvalidInput(format!(
            "{} has dimension {}, point set has dimension {}",
            what, got, expected
        )))
    }
}
