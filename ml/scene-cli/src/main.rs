//! nuScenes-SR scene corpus tool.
//!
//! Thin command-line driver over `scene-dataset`.
//!
//! # Commands
//!
//! - `scene-corpus stats` - Print label statistics
//! - `scene-corpus query <LABEL>...` - List scenes carrying labels
//! - `scene-corpus sample` - Draw random scenes
//! - `scene-corpus split` - Split tokens into train/val/test
//! - `scene-corpus export <OUT>` - Write token -> labels JSON
//!
//! The corpus path comes from `--data`, then `SCENE_CORPUS_PATH`, then the
//! conventional default. Log verbosity follows `RUST_LOG`.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scene_types::MatchMode;
use tracing_subscriber::EnvFilter;

/// Query, sample, split and export the nuScenes-SR scene corpus
#[derive(Parser)]
#[command(name = "scene-corpus")]
#[command(about = "Access layer for the nuScenes-SR scene corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the corpus JSON document
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print label occurrence and labels-per-scene statistics
    Stats {
        /// Emit the summary as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// List scenes carrying the given labels
    Query {
        /// Labels to match (e.g. PED_CROSSING)
        #[arg(value_name = "LABEL", required = true)]
        labels: Vec<String>,

        /// Match any or all of the labels
        #[arg(long, default_value = "any")]
        mode: MatchMode,
    },

    /// Draw scenes at random without replacement
    Sample {
        /// Number of scenes to draw
        #[arg(short, long = "count")]
        n: Option<usize>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Split scene tokens into train/val/test sets
    Split {
        /// Training ratio (defaults to the configured 0.8)
        #[arg(long)]
        train: Option<f64>,

        /// Validation ratio (defaults to the configured 0.1)
        #[arg(long)]
        val: Option<f64>,

        /// Test ratio (defaults to the configured 0.1)
        #[arg(long)]
        test: Option<f64>,

        /// Seed for a reproducible split
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write train/val/test label files into
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write the labels of selected scenes to a JSON file
    Export {
        /// Output file
        #[arg(value_name = "OUT")]
        out: PathBuf,

        /// Scene tokens to export (all scenes if omitted)
        #[arg(long, num_args = 1..)]
        tokens: Option<Vec<String>>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = scene_dataset::CorpusConfig::from_env();
    if let Some(data) = cli.data {
        config = config.with_data_path(data);
    }
    config.validate()?;

    match cli.command {
        Commands::Stats { json } => commands::stats(&config, json),
        Commands::Query { labels, mode } => commands::query(&config, &labels, mode),
        Commands::Sample { n, seed } => commands::sample(&config, n, seed),
        Commands::Split {
            train,
            val,
            test,
            seed,
            out,
        } => commands::split(&config, (train, val, test), seed, out.as_deref()),
        Commands::Export { out, tokens } => commands::export(&config, &out, tokens.as_deref()),
    }
}
