use std::io;
use std::str::FromStr;
use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;

use centered_clustering::cluster::batch::{cluster_sweep, linspace};
use centered_clustering::cluster::metrics::summarize;
use centered_clustering::config::Config;
use centered_clustering::data::json::{parse_seed, read_points};
use centered_clustering::data::preprocessing::{
    rescale_hypersphere, TRANSLATIONS_SCALING_LABEL, TRANSLATION_COLUMNS, TRANSLATION_SPHERE_RADIUS,
};
use centered_clustering::{storage, Clusterer, IndexKind};

/// Density sweep bounds given as `BEGIN,END,SAMPLES`
#[derive(Debug, Clone, Copy)]
struct SweepRange {
    begin: f64,
    end: f64,
    samples: usize,
}

impl FromStr for SweepRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [begin, end, samples] = parts.as_slice() else {
            return Err(format!("expected BEGIN,END,SAMPLES, got '{}'", s));
        };

        Ok(Self {
            begin: begin.parse().map_err(|e| format!("bad sweep begin '{}': {}", begin, e))?,
            end: end.parse().map_err(|e| format!("bad sweep end '{}': {}", end, e))?,
            samples: samples.parse().map_err(|e| format!("bad sample count '{}': {}", samples, e))?,
        })
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "centered-clustering",
    about = "Extract the density cluster grown from a seed; reads a JSON array of points on stdin"
)]
struct Cli {
    /// Number of points within radius a location needs to be a core point
    #[clap(short = 'n', long = "n", default_value = "12")]
    n: usize,

    /// Radius within which a location needs n points to be a core point
    #[clap(long, default_value = "1.0")]
    radius: f64,

    /// Initial location of the cluster, as comma separated coordinates (origin if empty)
    #[clap(long, default_value = "", allow_hyphen_values = true)]
    seed: String,

    /// Spatial index implementation
    #[clap(long, value_enum, default_value = "auto")]
    index: IndexKind,

    /// Count a point's own position toward its neighborhood size
    #[clap(long)]
    count_self: bool,

    /// Query the expansion frontier in parallel waves
    #[clap(long)]
    parallel: bool,

    /// Rescale the translation columns onto a hypersphere of radius pi
    #[clap(long)]
    scale_translations: bool,

    /// Cluster at radius = density / N for densities BEGIN..END (SAMPLES values)
    /// and print a facet document instead of a single cluster
    #[clap(long, value_name = "BEGIN,END,SAMPLES")]
    sweep: Option<SweepRange>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,

    /// Only log warnings and errors
    #[clap(long, short, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging; stdout is reserved for the result document
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::debug!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config {
        min_neighbors: args.n,
        radius: args.radius,
        seed: args.seed.clone(),
        index: args.index,
        count_self: args.count_self,
        parallel: args.parallel,
    };
    let params = config.expansion_params();
    params.validate()?;

    // 1. Load points
    let mut points = read_points(io::stdin().lock()).context("failed to read points from stdin")?;

    let translations_scaling = if args.scale_translations {
        points = rescale_hypersphere(points, TRANSLATION_COLUMNS, TRANSLATION_SPHERE_RADIUS)?;
        Some(TRANSLATIONS_SCALING_LABEL)
    } else {
        None
    };

    let seed = parse_seed(&config.seed, points.dimension())?;
    log::info!(
        "Seed [{}], n = {}, radius = {}",
        seed.iter().join(", "),
        config.min_neighbors,
        config.radius
    );

    // 2. Index
    let clusterer = Clusterer::with_index(points, config.index)?;

    // 3. Cluster and write
    let stdout = io::stdout().lock();
    match args.sweep {
        Some(sweep) => {
            let densities = linspace(sweep.begin, sweep.end, sweep.samples)?;
            let samples = cluster_sweep(clusterer.index(), seed.view(), &params, &densities)?;
            storage::write_sweep(stdout, &samples, config.min_neighbors, translations_scaling)?;
        }
        None => {
            let cluster = clusterer.run(seed.view(), &params)?;
            log::info!(
                "Cluster has {} of {} points ({} core, seed {})",
                cluster.size(),
                clusterer.index().len(),
                cluster.core_points,
                if cluster.seed_is_core { "core" } else { "not core" }
            );

            let summary = summarize(clusterer.index(), &cluster);
            log::debug!(
                "Centroid [{}], distance to centroid: mean {:.6}, max {:.6}, std {:.6}",
                summary.centroid.iter().join(", "),
                summary.mean_distance,
                summary.max_distance,
                summary.std_distance
            );

            storage::write_members(stdout, &cluster.members)?;
        }
    }

    Ok(())
}
