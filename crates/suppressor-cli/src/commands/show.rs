//! Show command
//!
//! Handles: suppressor show --index DIR

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use suppressor_core::ExclusionSet;

#[derive(Args)]
pub struct ShowArgs {
    /// Directory holding the index files
    #[arg(long, value_name = "DIR")]
    pub index: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: ShowFormat,

    /// Config file (JSON), for custom index file names
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ShowFormat {
    Json,
    Markdown,
}

#[derive(Serialize)]
struct StoredIndex<'a> {
    directory: String,
    class_patterns: &'a [String],
    methods: Vec<String>,
}

pub fn execute(args: &ShowArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let set = ExclusionSet::load_with_config(&args.index, &config)
        .with_context(|| format!("loading index from {}", args.index.display()))?;

    match args.format {
        ShowFormat::Json => println!("{}", render_json(&args.index, &set)?),
        ShowFormat::Markdown => print!("{}", render_markdown(&args.index, &set)),
    }
    Ok(())
}

fn render_json(dir: &Path, set: &ExclusionSet) -> Result<String> {
    let stored = StoredIndex {
        directory: dir.display().to_string(),
        class_patterns: set.class_patterns(),
        methods: set.method_keys().iter().map(ToString::to_string).collect(),
    };
    Ok(serde_json::to_string_pretty(&stored)?)
}

fn render_markdown(dir: &Path, set: &ExclusionSet) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Exclusion Index\n");
    let _ = writeln!(output, "**Directory:** `{}`\n", dir.display());

    output.push_str("## Classes\n\n");
    if set.class_patterns().is_empty() {
        output.push_str("_No class patterns_\n\n");
    } else {
        for pattern in set.class_patterns() {
            let _ = writeln!(output, "- `{pattern}`");
        }
        output.push('\n');
    }

    output.push_str("## Methods\n\n");
    if set.method_keys().is_empty() {
        output.push_str("_No method keys_\n\n");
    } else {
        for key in set.method_keys() {
            let _ = writeln!(output, "- `{key}`");
        }
        output.push('\n');
    }
    output
}
