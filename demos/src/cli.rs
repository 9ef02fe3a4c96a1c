// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use kdviz_controller::ClientConfig;

use crate::commands::{run_interactive, run_scatter, run_search, run_tree};
use crate::error::Result;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "kdviz",
    about = "Partition diagram, embedding scatter, and similarity search client",
    version
)]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Server and validation options.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Search server origin.
    #[arg(long, global = true, default_value = "http://localhost:8000")]
    pub server: String,

    /// Whole-request timeout in seconds.
    #[arg(long = "timeout-secs", global = true, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Largest accepted image id. Defaults to the loaded dataset's largest id.
    #[arg(long = "max-id", global = true)]
    pub max_id: Option<u32>,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the partition tree as SVG.
    Tree(OutputArgs),

    /// Write the background scatter figure as Plotly JSON.
    Scatter(OutputArgs),

    /// Search for each id in order and print the results.
    Search(SearchArgs),

    /// Read ids from standard input, one per line.
    Interactive(InteractiveArgs),
}

/// Input and output for the rendering subcommands.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Read the payload from a file instead of the server.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write output here instead of standard output.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Read the embedding table from a file instead of the server.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write the final scatter figure here.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Ids to search for, as typed.
    #[arg(required = true, allow_hyphen_values = true)]
    pub ids: Vec<String>,
}

/// Arguments for `interactive`.
#[derive(Debug, Clone, Args)]
pub struct InteractiveArgs {
    /// Read the embedding table from a file instead of the server.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Rewrite the scatter figure here after every search.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Settings resolved from [`GlobalArgs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// HTTP client settings.
    pub client: ClientConfig,
    /// Explicit id bound; `None` derives it from the dataset.
    pub max_id: Option<u32>,
}

impl From<&GlobalArgs> for ClientConfig {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            base_url: args.server.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
            ..Self::default()
        }
    }
}

impl From<GlobalArgs> for RunConfig {
    fn from(args: GlobalArgs) -> Self {
        Self {
            client: ClientConfig::from(&args),
            max_id: args.max_id,
        }
    }
}

/// Parse the process arguments and run.
pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = RunConfig::from(cli.global);
    match cli.command {
        Commands::Tree(args) => run_tree(&config, args),
        Commands::Scatter(args) => run_scatter(&config, args),
        Commands::Search(args) => run_search(&config, args),
        Commands::Interactive(args) => run_interactive(&config, args),
    }
}
