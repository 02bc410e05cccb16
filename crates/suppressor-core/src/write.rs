//! Exclusion index persistence
//!
//! Each file is written to a temporary sibling and renamed over the target,
//! so readers only ever see a previous complete file or the new one.

use crate::config::SuppressorConfig;
use crate::error::{IndexError, IndexResult};
use crate::util::{compute_sha256, validate_file_name};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use suppressor_scanner::index::{CLASSES_FILE_NAME, METHODS_FILE_NAME};
use suppressor_scanner::ExclusionIndex;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// One file the writer put in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub entries: usize,
    pub sha256: String,
}

/// What a write produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub root: PathBuf,
    pub files: Vec<WrittenFile>,
}

impl WriteReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Writes an [`ExclusionIndex`] as the two line-oriented files
#[derive(Debug, Clone)]
pub struct IndexWriter {
    classes_file: String,
    methods_file: String,
}

impl Default for IndexWriter {
    fn default() -> Self {
        Self {
            classes_file: CLASSES_FILE_NAME.to_string(),
            methods_file: METHODS_FILE_NAME.to_string(),
        }
    }
}

impl IndexWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the file names from `config`
    ///
    /// # Errors
    /// Returns an error if either name is not a bare file name
    pub fn from_config(config: &SuppressorConfig) -> IndexResult<Self> {
        validate_file_name(&config.classes_file)?;
        validate_file_name(&config.methods_file)?;
        Ok(Self {
            classes_file: config.classes_file.clone(),
            methods_file: config.methods_file.clone(),
        })
    }

    #[must_use]
    pub fn classes_path(&self, root: &Path) -> PathBuf {
        root.join(&self.classes_file)
    }

    #[must_use]
    pub fn methods_path(&self, root: &Path) -> PathBuf {
        root.join(&self.methods_file)
    }

    /// Persist `index` under `root`
    ///
    /// Nothing is written for an empty index. Otherwise both files are
    /// replaced, even when one of them has no entries.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written and renamed into place
    pub fn write(&self, index: &ExclusionIndex, root: &Path) -> IndexResult<WriteReport> {
        let mut report = WriteReport {
            root: root.to_path_buf(),
            files: Vec::new(),
        };

        if index.is_empty() {
            warn!(root = %root.display(), "no suppressed declarations; index not written");
            return Ok(report);
        }

        fs::create_dir_all(root).map_err(|e| IndexError::io(root, e))?;

        // Stage both files before either replaces its target, so a failure
        // while writing leaves the previous index untouched.
        let staged = [
            StagedFile::stage(
                self.classes_path(root),
                &index.render_classes(),
                index.class_patterns.len(),
            )?,
            StagedFile::stage(
                self.methods_path(root),
                &index.render_methods(),
                index.method_signatures.len(),
            )?,
        ];
        for file in &staged {
            file.check_target()?;
        }
        for file in staged {
            report.files.push(file.persist()?);
        }
        Ok(report)
    }
}

/// A fully written temporary file waiting to be renamed over its target
struct StagedFile {
    temp: NamedTempFile,
    path: PathBuf,
    entries: usize,
    sha256: String,
}

impl StagedFile {
    fn stage(path: PathBuf, content: &str, entries: usize) -> IndexResult<Self> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| IndexError::io(dir, e))?;
        debug!(temp = %temp.path().display(), target = %path.display(), "staging index file");

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            writer
                .write_all(content.as_bytes())
                .and_then(|()| writer.flush())
                .map_err(|e| IndexError::io(&path, e))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| IndexError::io(&path, e))?;

        Ok(Self {
            temp,
            sha256: compute_sha256(content.as_bytes()),
            path,
            entries,
        })
    }

    /// A directory in the way would fail the rename
    fn check_target(&self) -> IndexResult<()> {
        if self.path.is_dir() {
            return Err(IndexError::Persist {
                path: self.path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "target is a directory",
                ),
            });
        }
        Ok(())
    }

    fn persist(self) -> IndexResult<WrittenFile> {
        // A failed persist hands the temp file back; dropping it removes it.
        self.temp.persist(&self.path).map_err(|e| IndexError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        info!(path = %self.path.display(), entries = self.entries, sha256 = %self.sha256, "wrote exclusion file");
        Ok(WrittenFile {
            path: self.path,
            entries: self.entries,
            sha256: self.sha256,
        })
    }
}
