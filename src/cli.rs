//! Courier command line interface built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (track, deliver, states,
//! demo) and the global flags (--config, --format, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;
use crate::state_machine::PackageState;

/// Courier: track packages through the delivery state machine.
#[derive(Debug, Parser)]
#[command(name = "courier", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file (defaults to ./courier.toml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for the run report.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Step a package a fixed number of times.
    Track {
        /// Package id (defaults to the configured subject).
        subject: Option<String>,

        /// State to start from, e.g. `in-transition` (defaults to acknowledged).
        #[arg(long)]
        from: Option<PackageState>,

        /// Number of steps to perform (defaults to the configured count).
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Step a package until delivery has been announced.
    Deliver {
        /// Package id (defaults to the configured subject).
        subject: Option<String>,

        /// State to start from.
        #[arg(long)]
        from: Option<PackageState>,
    },

    /// Print the transition table.
    States,

    /// Run the built-in demonstration: a fresh package stepped five times.
    Demo,
}
