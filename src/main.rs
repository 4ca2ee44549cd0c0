use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use clique_percolation::clique::CliqueEnumerator;
use clique_percolation::logger::init_logger;
use clique_percolation::{write_communities, Graph, MergePolicy, OutputFormat, Percolation, Report, RunConfig};

/// Find k-clique communities with the Clique Percolation Method.
#[derive(Debug, Parser)]
#[command(name = "cpm", version, about)]
struct Cli {
    /// Community size, cliques sharing k - 1 vertices are merged [default: 4]
    k: Option<usize>,

    /// Adjacency-list graph file [default: input.txt]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// YAML run configuration, flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    policy: Option<MergePolicy>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_yaml_file(path)?,
            None => RunConfig::default()
        };
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(config: &RunConfig) -> Result<()> {
    let start = Instant::now();
    let graph = Graph::from_adjacency_file(&config.input)?;
    info!(
        "Loaded {} (vertices: {}, edges: {}) in {:?}",
        config.input.display(), graph.v_size(), graph.e_size(), start.elapsed()
    );

    let start = Instant::now();
    let (cliques, stats) = CliqueEnumerator::new(&graph).run();
    info!("Found {} maximal cliques ({} calls) in {:?}", stats.cliques, stats.calls, start.elapsed());

    let start = Instant::now();
    let mut percolation = Percolation::new(cliques);
    let communities = percolation.merge_with(config.k, config.policy);
    info!(
        "Merged into {} communities with k = {} ({}) in {:?}",
        communities.len(), config.k, config.policy, start.elapsed()
    );

    let report = Report {
        k: config.k,
        policy: config.policy,
        clique_count: percolation.cliques().len(),
        communities: &communities
    };
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            write_communities(&mut BufWriter::new(file), &report, config.format)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_communities(&mut handle, &report, config.format)?;
            handle.flush()?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logger(&config.log_level, config.log_file.as_deref()) {
        eprintln!("Error: {:#}", err);
        return ExitCode::FAILURE;
    }
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
