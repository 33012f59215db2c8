//! JSON point matrices and seed vectors

use std::io::Read;
use anyhow::{bail, Context, Result};
use ndarray::Array1;
use crate::points::PointSet;

/// Decode a JSON array of points, each a JSON array of coordinates.
///
/// The outer list holds points, so the matrix is already one point per row
/// and needs no transposition.
pub fn read_points<R: Read>(reader: R) -> Result<PointSet> {
    let rows: Vec<Vec<f64>> =
        serde_json::from_reader(reader).context("input is not a JSON array of numeric arrays")?;

    log::info!(
        "Decoded {} points of dimension {}",
        rows.len(),
        rows.first().map_or(0, |r| r.len())
    );

    Ok(PointSet::from_rows(&rows)?)
}

/// Parse a comma separated seed such as `0.1,-2,3e-1`.
///
/// A blank string is the origin of a `dimension`-dimensional space.
/// `NaN` and infinite components are rejected. The length of a non-blank
/// seed is not checked here; the engine rejects a mismatch with the point
/// set.
pub fn parse_seed(text: &str, dimension: usize) -> Result<Array1<f64>> {
    if text.trim().is_empty() {
        return Ok(Array1::zeros(dimension));
    }

    text.split(',')
        .enumerate()
        .map(|(i, component)| -> Result<f64> {
            let component = component.trim();
            let value = component
                .parse::<f64>()
                .with_context(|| format!("seed component {} ('{}') is not a number", i, component))?;
            if !value.is_finite() {
                bail!("seed component {} ('{}') is not finite", i, component);
            }
            Ok(value)
        })
        .collect::<Result<Vec<f64>>>()
        .map(Array1::from)
}
