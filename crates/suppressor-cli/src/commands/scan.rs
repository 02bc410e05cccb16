//! Scan command
//!
//! Handles: suppressor scan <MANIFEST|DIR>...

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use suppressor_core::{ClassOutputLayout, FixedOutputRoot, OutputRootResolver, RoundProcessor};
use suppressor_scanner::output::{to_json, to_markdown};
use suppressor_scanner::DeclarationSet;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args)]
pub struct ScanArgs {
    /// Declaration manifests, or directories searched for `*.json` manifests
    #[arg(value_name = "MANIFEST|DIR", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the index files to this directory
    #[arg(long, value_name = "DIR", conflicts_with = "class_output")]
    pub output_root: Option<PathBuf>,

    /// Derive the index directory from the class output directory
    #[arg(long, value_name = "DIR", required_unless_present = "output_root")]
    pub class_output: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the recognized marker value
    #[arg(long, value_name = "VALUE")]
    pub marker: Option<String>,

    /// Print a report of the round to stdout
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ReportFormat {
    Json,
    Markdown,
}

pub fn execute(args: &ScanArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(marker) = &args.marker {
        config = config.with_marker_value(marker);
    }
    let processor = RoundProcessor::new(&config)?;

    let declarations = load_manifests(&args.inputs)?;
    let resolver: Box<dyn OutputRootResolver> = match (&args.output_root, &args.class_output) {
        (Some(root), _) => Box::new(FixedOutputRoot::new(root)),
        (None, Some(class_output)) => Box::new(ClassOutputLayout::new(class_output)),
        (None, None) => bail!("one of --output-root or --class-output is required"),
    };

    let outcome = processor.process(&declarations, resolver.as_ref())?;

    match args.report {
        Some(ReportFormat::Json) => println!("{}", to_json(&outcome.index)?),
        Some(ReportFormat::Markdown) => print!("{}", to_markdown(&outcome.index)),
        None => {
            if outcome.report.is_empty() {
                println!("No suppressed declarations; nothing written.");
            } else {
                println!(
                    "Wrote {} class patterns and {} method keys to {}",
                    outcome.index.class_patterns.len(),
                    outcome.index.method_signatures.len(),
                    outcome.report.root.display()
                );
                for file in &outcome.report.files {
                    println!("  {}  {}", file.sha256, file.path.display());
                }
            }
        }
    }
    Ok(())
}

/// Merge every manifest into one round, in argument order
///
/// Directories contribute their `*.json` files in sorted path order.
fn load_manifests(inputs: &[PathBuf]) -> Result<DeclarationSet> {
    let mut round = DeclarationSet::new();
    for input in inputs {
        for manifest in manifest_paths(input)? {
            let content = fs::read_to_string(&manifest)
                .with_context(|| format!("reading manifest {}", manifest.display()))?;
            let set = DeclarationSet::from_json(&content)
                .with_context(|| format!("parsing manifest {}", manifest.display()))?;
            debug!(manifest = %manifest.display(), declarations = set.len(), "loaded manifest");
            round.merge(set);
        }
    }
    Ok(round)
}

fn manifest_paths(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        if !input.exists() {
            bail!("manifest not found: {}", input.display());
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", input.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}
