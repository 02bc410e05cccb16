//! Suppressor configuration
//!
//! Loaded from a JSON file; every field has a default so an empty object
//! (or no file at all) yields the stock `@SuppressWarnings("modernizer")`
//! behavior with the standard file names.

use crate::error::{IndexError, IndexResult};
use crate::util::validate_file_name;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use suppressor_scanner::index::{CLASSES_FILE_NAME, METHODS_FILE_NAME};
use suppressor_scanner::scan::{DEFAULT_MARKER_ANNOTATION, DEFAULT_MARKER_VALUE};
use suppressor_scanner::{Scanner, SuppressionMarker};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SuppressorConfig {
    /// Annotation type that carries suppression requests
    pub marker_annotation: String,
    /// Value that requests exclusion
    pub marker_value: String,
    pub classes_file: String,
    pub methods_file: String,
}

impl Default for SuppressorConfig {
    fn default() -> Self {
        Self {
            marker_annotation: DEFAULT_MARKER_ANNOTATION.to_string(),
            marker_value: DEFAULT_MARKER_VALUE.to_string(),
            classes_file: CLASSES_FILE_NAME.to_string(),
            methods_file: METHODS_FILE_NAME.to_string(),
        }
    }
}

impl SuppressorConfig {
    /// Load and validate a config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// names an invalid file
    pub fn load(path: &Path) -> IndexResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| IndexError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|e| IndexError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Write the config as pretty JSON
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> IndexResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| IndexError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| IndexError::io(path, e))
    }

    /// Check the marker is usable and both file names are bare and distinct
    ///
    /// # Errors
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> IndexResult<()> {
        if self.marker_annotation.trim().is_empty() {
            return Err(IndexError::InvalidMarker(
                "markerAnnotation must not be empty".to_string(),
            ));
        }
        if self.marker_value.is_empty() {
            return Err(IndexError::InvalidMarker(
                "markerValue must not be empty".to_string(),
            ));
        }
        validate_file_name(&self.classes_file)?;
        validate_file_name(&self.methods_file)?;
        if self.classes_file == self.methods_file {
            return Err(IndexError::InvalidFileName(format!(
                "classesFile and methodsFile are both {}",
                self.classes_file
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_marker_value(mut self, value: &str) -> Self {
        self.marker_value = value.to_string();
        self
    }

    #[must_use]
    pub fn marker(&self) -> SuppressionMarker {
        SuppressionMarker::new(&self.marker_annotation, &self.marker_value)
    }

    #[must_use]
    pub fn scanner(&self) -> Scanner {
        Scanner::new().with_marker(self.marker())
    }
}
