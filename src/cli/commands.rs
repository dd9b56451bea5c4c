//! Subcommand definitions for the quietspot CLI.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Run the HTTP API server.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Override the configured bind host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override the configured port
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// Print the current quiet-spot ranking from the data file, without a server.
#[derive(Debug, Args)]
pub struct SpotsCommand {
    /// Maximum number of spots to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration file path
    Path,

    /// Validate a configuration file
    Validate {
        /// Path to the config file (defaults to the standard location)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}
