//! One processing round: scan, resolve the output root, write

use crate::config::SuppressorConfig;
use crate::error::IndexResult;
use crate::layout::OutputRootResolver;
use crate::write::{IndexWriter, WriteReport};
use suppressor_scanner::{DeclarationProvider, ExclusionIndex, Scanner};
use tracing::info;

/// Result of a completed round
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub index: ExclusionIndex,
    pub report: WriteReport,
}

/// Runs rounds with a fixed marker and file naming
///
/// Holds no state between rounds.
#[derive(Debug, Clone, Default)]
pub struct RoundProcessor {
    scanner: Scanner,
    writer: IndexWriter,
}

impl RoundProcessor {
    /// # Errors
    /// Returns an error if the config is invalid
    pub fn new(config: &SuppressorConfig) -> IndexResult<Self> {
        config.validate()?;
        Ok(Self {
            scanner: config.scanner(),
            writer: IndexWriter::from_config(config)?,
        })
    }

    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    #[must_use]
    pub fn writer(&self) -> &IndexWriter {
        &self.writer
    }

    /// Process one round
    ///
    /// Any failure aborts the round; files from earlier rounds stay intact.
    ///
    /// # Errors
    /// Returns an error if a marked declaration cannot be encoded, the output
    /// root cannot be resolved, or writing fails
    pub fn process<P, R>(&self, provider: &P, resolver: &R) -> IndexResult<RoundOutcome>
    where
        P: DeclarationProvider + ?Sized,
        R: OutputRootResolver + ?Sized,
    {
        let index = self.scanner.scan(provider)?;
        let root = resolver.output_root()?;
        let report = self.writer.write(&index, &root)?;

        info!(
            root = %root.display(),
            classes = index.class_patterns.len(),
            methods = index.method_signatures.len(),
            "round complete"
        );
        Ok(RoundOutcome { index, report })
    }
}

/// Process one round with `config`
///
/// # Errors
/// See [`RoundProcessor::process`]
pub fn process_round<P, R>(
    provider: &P,
    config: &SuppressorConfig,
    resolver: &R,
) -> IndexResult<RoundOutcome>
where
    P: DeclarationProvider + ?Sized,
    R: OutputRootResolver + ?Sized,
{
    RoundProcessor::new(config)?.process(provider, resolver)
}
