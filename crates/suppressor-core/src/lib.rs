//! Suppressor Core - Round driver, index persistence, and lookup
//!
//! This crate runs a suppression round against a declaration provider,
//! writes the resulting exclusion index atomically, and reads an index back
//! for evaluation.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod error;
pub mod exclusions;
pub mod layout;
pub mod round;
pub mod util;
pub mod write;

pub use suppressor_scanner;

pub use config::SuppressorConfig;
pub use error::{IndexError, IndexResult};
pub use exclusions::ExclusionSet;
pub use layout::{ClassOutputLayout, FixedOutputRoot, OutputRootResolver};
pub use round::{process_round, RoundOutcome, RoundProcessor};
pub use write::{IndexWriter, WriteReport, WrittenFile};
