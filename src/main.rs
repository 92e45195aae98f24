use clap::Parser;
use mst_tour::{City, MetricKind, SolverConfig};
use rand::prelude::*;
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A path to a JSON array of cities, else reads from stdin
    file: Option<PathBuf>,

    /// Output file path (overwrites old files), else writes to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// JSON solver configuration, overridden by the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Distance between two cities
    #[arg(long, value_enum)]
    metric: Option<MetricKind>,

    /// Id of the city to start and end the tour at
    #[arg(long)]
    root: Option<u32>,

    /// Compute pairwise distances on all cores
    #[arg(long)]
    parallel: bool,

    /// Solve for this many random cities in the unit square instead of reading input
    #[arg(long, conflicts_with = "file")]
    random: Option<u32>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report {
    tour: Vec<u32>,
    length: f64,
    tree_weight: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();

    let filter = match opt.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mst_tour=info")),
        1 => EnvFilter::new("mst_tour=debug"),
        _ => EnvFilter::new("mst_tour=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &opt.config {
        Some(path) => SolverConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SolverConfig::default(),
    };
    if let Some(metric) = opt.metric {
        config.metric = metric;
    }
    if opt.root.is_some() {
        config.root = opt.root;
    }
    config.parallel |= opt.parallel;

    let cities: Vec<City> = match (opt.random, &opt.file) {
        (Some(count), _) => {
            let mut rng = match opt.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            info!("Generating {} random cities", count);
            (0..count)
                .map(|id| City::new(id, rng.gen(), rng.gen()))
                .collect()
        }
        (None, Some(path)) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        (None, None) => {
            info!("Reading from stdin");
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            serde_json::from_str(&json)?
        }
    };

    let tour = config.solve(&cities)?;
    let report = Report {
        tour: tour.ids(),
        length: tour.length(),
        tree_weight: tour.tree_weight(),
    };

    let mut out: Box<dyn Write> = match &opt.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
