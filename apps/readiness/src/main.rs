//! # Readiness - Entity Setup Progress CLI
//!
//! The main binary for the readiness engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/readiness (THE BINARY)       │
//! │                                              │
//! │  ┌──────────┐  ┌──────────┐  ┌───────────┐   │
//! │  │   CLI    │  │  Config  │  │  Logging  │   │
//! │  │  (clap)  │  │  (toml)  │  │ (tracing) │   │
//! │  └────┬─────┘  └────┬─────┘  └─────┬─────┘   │
//! │       └─────────────┼──────────────┘         │
//! │                     ▼                        │
//! │             ┌────────────────┐               │
//! │             │ readiness-core │               │
//! │             │  (THE LOGIC)   │               │
//! │             └────────────────┘               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! readiness progress -f entities.json
//! readiness --json-mode presence -f entity.json
//! readiness metadata -t "Rollup Entity"
//! ```

use clap::Parser;
use readiness::{cli, config::AppConfig, logging};

fn main() {
    let cli = cli::Cli::parse();

    // Config is needed before logging exists; fall back to defaults so the
    // load error itself can be logged.
    let loaded = AppConfig::load(cli.config.as_deref()).and_then(AppConfig::with_env_overrides);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };

    logging::init(&config.logging, cli.verbose);

    if let Err(e) = loaded {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
