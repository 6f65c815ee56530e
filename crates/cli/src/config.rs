//! Command-line and file configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use corelib::{Config, HashRing};
use serde::Deserialize;
use tracing::debug;

use crate::commands::Command;

/// Inspect a bounded-load consistent hash ring.
#[derive(Parser, Debug)]
#[command(name = "ringctl", version)]
pub struct CliConfig {
    /// Path to a JSON cluster file: `{"ring": {...}, "nodes": [...]}`.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ring member name. Can be specified multiple times.
    #[arg(long = "node", global = true)]
    pub nodes: Vec<String>,

    /// Override the partition count.
    #[arg(long, global = true)]
    pub partitions: Option<u64>,

    /// Override the number of tokens per node.
    #[arg(long, global = true)]
    pub replication_factor: Option<usize>,

    /// Override the load factor.
    #[arg(long, global = true)]
    pub load_factor: Option<f64>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// On-disk cluster description.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClusterFile {
    pub ring: Config,
    pub nodes: Vec<String>,
}

impl ClusterFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        setup_tracing(self.verbose);
        let mut ring = self.build_ring()?;
        let result = self.command.execute(&mut ring)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{result}");
        }
        Ok(())
    }

    /// Flags override file values; file nodes and `--node` flags are merged.
    pub fn resolve(&self) -> anyhow::Result<(Config, Vec<String>)> {
        let file = match &self.config {
            Some(path) => ClusterFile::load(path)?,
            None => ClusterFile::default(),
        };
        let mut config = file.ring;
        if let Some(p) = self.partitions {
            config.partition_count = p;
        }
        if let Some(r) = self.replication_factor {
            config.replication_factor = r;
        }
        if let Some(l) = self.load_factor {
            config.load_factor = l;
        }

        let mut nodes = file.nodes;
        nodes.extend(self.nodes.iter().cloned());
        if nodes.is_empty() {
            bail!("no nodes given; pass --node or a config file with \"nodes\"");
        }
        Ok((config, nodes))
    }

    pub fn build_ring(&self) -> anyhow::Result<HashRing<String>> {
        let (config, nodes) = self.resolve()?;
        debug!(?config, nodes = nodes.len(), "building ring");
        HashRing::new(nodes, config).context("building ring")
    }
}

fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
