//! # Readiness - library surface of the CLI binary
//!
//! Exposes the CLI, configuration and logging setup so integration tests can
//! drive commands without spawning a process.

pub mod cli;
pub mod config;
pub mod logging;
