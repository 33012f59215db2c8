//! Result encoding

use std::io::Write;
use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use crate::cluster::batch::SweepSample;

/// `clusterings` facet: one member list per sampled density
#[derive(Debug, Serialize)]
struct SweepFacet<'a> {
    what: &'static str,
    metadata: SweepMetadata,
    statistics: Map<String, Value>,
    data: Vec<&'a [usize]>,
    facets: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct SweepMetadata {
    /// `false` when translations were left as is
    translations_scaling: Value,
    min_neighbors: usize,
    densities: Vec<f64>,
    radii: Vec<f64>,
}

/// Write the member indices as a single-line JSON array
pub fn write_members<W: Write>(mut writer: W, members: &[usize]) -> Result<()> {
    serde_json::to_writer(&mut writer, members)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a density sweep as a `clusterings` facet document
pub fn write_sweep<W: Write>(
    mut writer: W,
    samples: &[SweepSample],
    min_neighbors: usize,
    translations_scaling: Option<f64>,
) -> Result<()> {
    log::info!("Writing {} clusterings", samples.len());

    let facet = SweepFacet {
        what: "clusterings",
        metadata: SweepMetadata {
            translations_scaling: translations_scaling.map_or(Value::Bool(false), Value::from),
            min_neighbors,
            densities: samples.iter().map(|s| s.density).collect(),
            radii: samples.iter().map(|s| s.radius).collect(),
        },
        statistics: Map::new(),
        data: samples.iter().map(|s| s.members.as_slice()).collect(),
        facets: Vec::new(),
    };

    serde_json::to_writer(&mut writer, &facet)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn members_are_a_json_array() {
        let mut out = Vec::new();
        write_members(&mut out, &[0, 1, 2]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[0,1,2]\n");
    }

    #[test]
    fn empty_cluster_is_empty_array() {
        let mut out = Vec::new();
        write_members(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn sweep_facet_layout() {
        let samples = vec![
            SweepSample { density: 3.0, radius: 0.5, members: vec![0] },
            SweepSample { density: 9.0, radius: 1.5, members: vec![0, 1, 2] },
        ];
        let mut out = Vec::new();
        write_sweep(&mut out, &samples, 2, None).unwrap();

        let doc: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["what"], "clusterings");
        assert_eq!(doc["metadata"]["translations_scaling"], false);
        assert_eq!(doc["metadata"]["min_neighbors"], 2);
        assert_eq!(doc["metadata"]["densities"], json!([3.0, 9.0]));
        assert_eq!(doc["metadata"]["radii"], json!([0.5, 1.5]));
        assert_eq!(doc["statistics"], json!({}));
        assert_eq!(doc["data"], json!([[0], [0, 1, 2]]));
        assert_eq!(doc["facets"], json!([]));
    }

    #[test]
    fn sweep_records_translation_scaling() {
        let samples = vec![SweepSample { density: 3.0, radius: 0.5, members: vec![] }];
        let mut out = Vec::new();
        write_sweep(&mut out, &samples, 12, Some(6.2832)).unwrap();

        let doc: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["metadata"]["translations_scaling"], 6.2832);
        assert_eq!(doc["data"], json!([[]]));
    }
}
