//! Suppressor CLI - Command-line interface for modernizer suppressions
//!
//! Provides `suppressor scan`, `suppressor check`, and `suppressor show`.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::check::CheckArgs;
use commands::scan::ScanArgs;
use commands::show::ShowArgs;

#[derive(Parser)]
#[command(name = "suppressor")]
#[command(about = "Suppressor - modernizer exclusion index generator")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one suppression round over declaration manifests
    Scan(ScanArgs),
    /// Check whether a class or method is excluded by an index
    Check(CheckArgs),
    /// Print an exclusion index
    Show(ShowArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan(args) => {
            if let Err(e) = commands::scan::execute(&args) {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
        Commands::Check(args) => match commands::check::execute(&args) {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {e:#}");
                std::process::exit(2);
            }
        },
        Commands::Show(args) => {
            if let Err(e) = commands::show::execute(&args) {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}
