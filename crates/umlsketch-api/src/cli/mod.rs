//! CLI command definitions for the `umlsketch` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod generate;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Turn use-case descriptions into PlantUML sequence diagrams.
#[derive(Parser)]
#[command(name = "umlsketch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML config file (defaults to ./umlsketch.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000", env = "PORT")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Export spans to stdout via OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// Generate a diagram from a use-case description.
    #[command(alias = "gen")]
    Generate {
        /// Natural-language use case.
        description: String,

        /// Shared access code, when the service requires one.
        #[arg(long)]
        access_code: Option<String>,
    },

    /// Print the image URL for existing PlantUML markup.
    Render {
        /// File holding the markup (reads stdin when omitted).
        file: Option<PathBuf>,
    },

    /// Recover PlantUML markup from an image URL or encoded segment.
    Decode {
        /// Image URL or bare encoded segment.
        input: String,
    },
}
