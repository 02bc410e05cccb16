//! Path and digest helpers

use crate::error::{IndexError, IndexResult};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Validate a configured index file name
/// Names must be a single path component that is not hidden
///
/// # Errors
/// Returns an error if the name is invalid
pub fn validate_file_name(name: &str) -> IndexResult<()> {
    if name.is_empty() {
        return Err(IndexError::InvalidFileName("Empty name".to_string()));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(IndexError::InvalidFileName(format!(
            "Name contains path separator: {name}"
        )));
    }

    if name.starts_with('.') {
        return Err(IndexError::InvalidFileName(format!(
            "Name cannot start with dot: {name}"
        )));
    }

    if name.contains('\0') || name.chars().any(char::is_control) {
        return Err(IndexError::InvalidFileName(format!(
            "Name contains control character: {}",
            name.escape_debug()
        )));
    }

    Ok(())
}

/// Hex-encoded SHA-256 of `content`
#[must_use]
pub fn compute_sha256(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Read a file that may legitimately be absent
///
/// # Errors
/// Returns an error for any failure other than the file not existing
pub fn read_optional(path: &Path) -> IndexResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IndexError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name_normal() {
        assert!(validate_file_name("ignore-annotated-classes.txt").is_ok());
        assert!(validate_file_name("methods_v2.lst").is_ok());
    }

    #[test]
    fn test_validate_file_name_rejects_paths() {
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("../classes.txt").is_err());
        assert!(validate_file_name("out/classes.txt").is_err());
        assert!(validate_file_name("out\\classes.txt").is_err());
    }

    #[test]
    fn test_validate_file_name_rejects_hidden_and_control() {
        assert!(validate_file_name(".classes").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("a\nb").is_err());
    }

    #[test]
    fn test_sha256_is_stable() {
        assert_eq!(
            compute_sha256(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(compute_sha256(b"abc"), compute_sha256(b"abc"));
    }

    #[test]
    fn test_read_optional_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_optional(&dir.path().join("absent.txt")).unwrap().is_none());
    }
}
