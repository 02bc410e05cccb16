//! CLI command handlers
//!
//! Each subcommand has its own module with a clap `Args` struct and an
//! `execute` function.

pub mod check;
pub mod scan;
pub mod show;

use anyhow::{Context, Result};
use std::path::Path;
use suppressor_core::SuppressorConfig;

/// Load `--config` when given, otherwise the defaults
pub(crate) fn load_config(path: Option<&Path>) -> Result<SuppressorConfig> {
    match path {
        Some(path) => SuppressorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SuppressorConfig::default()),
    }
}
