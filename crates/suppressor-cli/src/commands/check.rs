//! Check command
//!
//! Handles: suppressor check --index DIR (--class NAME | --method KEY)

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use suppressor_core::ExclusionSet;
use suppressor_scanner::MethodKey;

#[derive(Args)]
pub struct CheckArgs {
    /// Directory holding the index files
    #[arg(long, value_name = "DIR")]
    pub index: PathBuf,

    /// Class name, internal (`pkg/Outer$1`) or dotted
    #[arg(long, value_name = "NAME", conflicts_with = "method", required_unless_present = "method")]
    pub class: Option<String>,

    /// Method as "OWNER NAME DESCRIPTOR"; the descriptor may omit the return type
    #[arg(long, value_name = "KEY")]
    pub method: Option<String>,

    /// Config file (JSON), for custom index file names
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Returns whether the queried class or method is excluded
pub fn execute(args: &CheckArgs) -> Result<bool> {
    let config = super::load_config(args.config.as_deref())?;
    let set = ExclusionSet::load_with_config(&args.index, &config)
        .with_context(|| format!("loading index from {}", args.index.display()))?;

    let (label, excluded) = match (&args.class, &args.method) {
        (Some(class), _) => (class.clone(), set.is_class_excluded(class)),
        (None, Some(method)) => {
            let key = parse_method(method)?;
            (key.to_string(), set.is_method_excluded(&key))
        }
        (None, None) => bail!("one of --class or --method is required"),
    };

    if excluded {
        println!("excluded: {label}");
    } else {
        println!("not excluded: {label}");
    }
    Ok(excluded)
}

fn parse_method(input: &str) -> Result<MethodKey> {
    let fields: Vec<&str> = input.split_whitespace().collect();
    let [owner, name, descriptor] = fields.as_slice() else {
        bail!("expected \"OWNER NAME DESCRIPTOR\", got {input:?}");
    };
    // A bare parameter list stands for any return type
    let descriptor = if descriptor.ends_with(')') {
        format!("{descriptor}V")
    } else {
        (*descriptor).to_string()
    };
    MethodKey::from_call_site(owner, name, &descriptor)
        .with_context(|| format!("invalid method descriptor in {input:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_full_descriptor() {
        let key = parse_method("pkg.Owner m (IZ)Ljava/lang/String;").unwrap();
        assert_eq!(key.to_string(), "pkg/Owner m (IZ)");
    }

    #[test]
    fn test_parse_method_parameters_only() {
        let key = parse_method("pkg/Outer$Inner <init> (Lpkg/Outer;)").unwrap();
        assert_eq!(key.to_string(), "pkg/Outer$Inner <init> (Lpkg/Outer;)");
    }

    #[test]
    fn test_parse_method_rejects_bad_input() {
        assert!(parse_method("pkg/Owner m").is_err());
        assert!(parse_method("pkg/Owner m (Q)V").is_err());
    }
}
