//! CLI definitions for Keystone.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keystone CLI.
#[derive(Parser)]
#[command(name = "keystone")]
#[command(about = "Manager registry host")]
#[command(version)]
pub(crate) struct Cli {
    /// Profile path (defaults to <config dir>/keystone/profile.toml)
    #[arg(short, long, env = "KEYSTONE_PROFILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the host tick loop in foreground (default)
    Run {
        /// Stop after this many ticks (overrides the profile)
        #[arg(long)]
        ticks: Option<u64>,

        /// Tick interval in milliseconds (overrides the profile)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Validate the profile and exit
    Validate,
}
