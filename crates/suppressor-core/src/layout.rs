//! Where a round's exclusion index lands
//!
//! The round never guesses its output directory; it asks an
//! [`OutputRootResolver`] handed in by the caller.

use crate::error::{IndexError, IndexResult};
use std::path::{Path, PathBuf};

/// Resolves the directory the index files are written to
pub trait OutputRootResolver {
    /// # Errors
    /// Returns [`IndexError::OutputRootUnresolved`] when no directory applies
    fn output_root(&self) -> IndexResult<PathBuf>;
}

/// A directory chosen up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOutputRoot(PathBuf);

impl FixedOutputRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl OutputRootResolver for FixedOutputRoot {
    fn output_root(&self) -> IndexResult<PathBuf> {
        if self.0.as_os_str().is_empty() {
            return Err(IndexError::OutputRootUnresolved(
                "empty output directory".to_string(),
            ));
        }
        Ok(self.0.clone())
    }
}

/// Maps a build tool's class output directory to its modernizer directory
///
/// | class output             | index directory             |
/// |--------------------------|-----------------------------|
/// | `…/target/classes`       | `…/target/modernizer/main`  |
/// | `…/target/test-classes`  | `…/target/modernizer/test`  |
/// | anything else            | the class output itself     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOutputLayout {
    class_output: PathBuf,
}

const TARGET_DIR: &str = "target";
const MODERNIZER_DIR: &str = "modernizer";

impl ClassOutputLayout {
    pub fn new(class_output: impl Into<PathBuf>) -> Self {
        Self {
            class_output: class_output.into(),
        }
    }

    #[must_use]
    pub fn class_output(&self) -> &Path {
        &self.class_output
    }
}

impl OutputRootResolver for ClassOutputLayout {
    fn output_root(&self) -> IndexResult<PathBuf> {
        if self.class_output.as_os_str().is_empty() {
            return Err(IndexError::OutputRootUnresolved(
                "empty class output directory".to_string(),
            ));
        }

        let absolute = if self.class_output.is_absolute() {
            self.class_output.clone()
        } else {
            std::env::current_dir()
                .map_err(|e| IndexError::OutputRootUnresolved(e.to_string()))?
                .join(&self.class_output)
        };

        for (leaf, flavor) in [("classes", "main"), ("test-classes", "test")] {
            if absolute.ends_with(Path::new(TARGET_DIR).join(leaf)) {
                if let Some(target) = absolute.parent() {
                    return Ok(target.join(MODERNIZER_DIR).join(flavor));
                }
            }
        }
        Ok(absolute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_root() {
        let root = FixedOutputRoot::new("/tmp/out");
        assert_eq!(root.output_root().unwrap(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_fixed_root_rejects_empty() {
        let err = FixedOutputRoot::new("").output_root().unwrap_err();
        assert!(matches!(err, IndexError::OutputRootUnresolved(_)));
    }

    #[test]
    fn test_main_classes_layout() {
        let layout = ClassOutputLayout::new("/work/app/target/classes");
        assert_eq!(
            layout.output_root().unwrap(),
            PathBuf::from("/work/app/target/modernizer/main")
        );
    }

    #[test]
    fn test_test_classes_layout() {
        let layout = ClassOutputLayout::new("/work/app/target/test-classes");
        assert_eq!(
            layout.output_root().unwrap(),
            PathBuf::from("/work/app/target/modernizer/test")
        );
    }

    #[test]
    fn test_other_layout_is_identity() {
        let layout = ClassOutputLayout::new("/work/app/build/classes/java/main");
        assert_eq!(
            layout.output_root().unwrap(),
            PathBuf::from("/work/app/build/classes/java/main")
        );
    }

    #[test]
    fn test_layout_matches_whole_components() {
        let layout = ClassOutputLayout::new("/work/app/mytarget/classes");
        assert_eq!(
            layout.output_root().unwrap(),
            PathBuf::from("/work/app/mytarget/classes")
        );
    }

    #[test]
    fn test_relative_layout_is_made_absolute() {
        let root = ClassOutputLayout::new("target/classes").output_root().unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("target/modernizer/main"));
    }
}
