// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `kdviz` command line client.
//!
//! Subcommands:
//!
//! - `kdviz tree`: fetch (or read) the partition tree and write an SVG diagram.
//! - `kdviz scatter`: load the embedding table and write the Plotly figure.
//! - `kdviz search ID...`: search each id, print result panels, and write
//!   the final highlighted figure.
//! - `kdviz interactive`: one search per line of standard input.
//!
//! Logging goes to standard error and is filtered by `KDVIZ_LOG`
//! (`tracing_subscriber::EnvFilter` syntax, default `info`).

mod cli;
mod commands;
mod error;

pub use cli::{
    Cli, Commands, GlobalArgs, InteractiveArgs, OutputArgs, RunConfig, SearchArgs, run,
    run_from_env,
};
pub use error::{KdvizError, Result};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "KDVIZ_LOG";

/// Install the global `tracing` subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
