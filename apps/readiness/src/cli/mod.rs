//! # Readiness CLI Module
//!
//! This module implements the CLI interface for the readiness engine.
//!
//! ## Available Commands
//!
//! - `progress` - Assess snapshots and print readiness reports
//! - `presence` - Print only the presence signals of snapshots
//! - `metadata` - Show tab count, ceiling and steps for an entity type

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use readiness_core::ReadinessError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Readiness - entity setup progress
///
/// Reads entity snapshots (JSON) and reports how far each entity has
/// progressed through its setup wizard.
#[derive(Parser, Debug)]
#[command(name = "readiness")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress headers in text output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./readiness.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess snapshots and print readiness reports
    Progress {
        /// Snapshot file: one JSON object or an array of them
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the presence signals of snapshots
    Presence {
        /// Snapshot file: one JSON object or an array of them
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show metadata for an entity type
    Metadata {
        /// Entity type tag, e.g. "Planning Entity" or "Rollup Entity"
        #[arg(short = 't', long)]
        entity_type: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, config: &AppConfig) -> Result<(), ReadinessError> {
    let opts = OutputOptions {
        json_mode: cli.json_mode,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    match cli.command {
        Some(Commands::Progress { file }) => cmd_progress(&file, config, opts),
        Some(Commands::Presence { file }) => cmd_presence(&file, config, opts),
        Some(Commands::Metadata { entity_type }) => cmd_metadata(&entity_type, config, opts),
        None => {
            // No subcommand - show metadata for every entity type
            cmd_overview(opts)
        }
    }
}
