//! Reading an exclusion index back the way a modernizer check consumes it

use crate::config::SuppressorConfig;
use crate::error::{IndexError, IndexResult};
use crate::util::read_optional;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use suppressor_scanner::index::{CLASSES_FILE_NAME, METHODS_FILE_NAME};
use suppressor_scanner::MethodKey;
use tracing::debug;

/// Compiled class patterns plus the set of excluded method keys
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    class_lines: Vec<String>,
    patterns: Vec<Regex>,
    method_keys: Vec<MethodKey>,
    methods: HashSet<MethodKey>,
}

impl ExclusionSet {
    /// Load the index from `dir` using the standard file names
    ///
    /// Missing files count as empty.
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or holds a malformed line
    pub fn load(dir: &Path) -> IndexResult<Self> {
        Self::load_named(dir, CLASSES_FILE_NAME, METHODS_FILE_NAME)
    }

    pub fn load_with_config(dir: &Path, config: &SuppressorConfig) -> IndexResult<Self> {
        Self::load_named(dir, &config.classes_file, &config.methods_file)
    }

    pub fn load_named(dir: &Path, classes_file: &str, methods_file: &str) -> IndexResult<Self> {
        let mut set = Self::default();

        let classes_path = dir.join(classes_file);
        if let Some(content) = read_optional(&classes_path)? {
            for (number, line) in non_blank_lines(&content) {
                let regex = compile_full_match(line).map_err(|source| IndexError::InvalidPattern {
                    path: classes_path.clone(),
                    line: number,
                    source,
                })?;
                set.patterns.push(regex);
                set.class_lines.push(line.to_string());
            }
        }

        let methods_path = dir.join(methods_file);
        if let Some(content) = read_optional(&methods_path)? {
            for (_, line) in non_blank_lines(&content) {
                let key = MethodKey::parse(line)?;
                set.methods.insert(key.clone());
                set.method_keys.push(key);
            }
        }

        debug!(
            dir = %dir.display(),
            classes = set.patterns.len(),
            methods = set.methods.len(),
            "loaded exclusion index"
        );
        Ok(set)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.methods.is_empty()
    }

    /// Class lines in file order
    #[must_use]
    pub fn class_patterns(&self) -> &[String] {
        &self.class_lines
    }

    /// Method keys in file order, duplicates included
    #[must_use]
    pub fn method_keys(&self) -> &[MethodKey] {
        &self.method_keys
    }

    #[must_use]
    pub fn class_pattern_count(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn method_count(&self) -> usize {
        self.method_keys.len()
    }

    /// Whether any class line matches the whole of `class_name`
    ///
    /// `class_name` is an internal name (`pkg/Outer$1`); a dotted binary
    /// name is accepted too.
    #[must_use]
    pub fn is_class_excluded(&self, class_name: &str) -> bool {
        let internal = class_name.replace('.', "/");
        self.patterns.iter().any(|p| p.is_match(&internal))
    }

    #[must_use]
    pub fn is_method_excluded(&self, key: &MethodKey) -> bool {
        self.methods.contains(key)
    }
}

fn compile_full_match(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

fn non_blank_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_are_empty() {
        let temp = TempDir::new().unwrap();
        let set = ExclusionSet::load(temp.path()).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_class_excluded("pkg/Outer"));
    }

    #[test]
    fn test_patterns_are_full_match() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CLASSES_FILE_NAME), "pkg/Outer(\\$.+)?\n").unwrap();

        let set = ExclusionSet::load(temp.path()).unwrap();
        assert!(set.is_class_excluded("pkg/Outer"));
        assert!(set.is_class_excluded("pkg/Outer$1"));
        assert!(set.is_class_excluded("pkg.Outer"));
        assert!(!set.is_class_excluded("pkg/OuterX"));
        assert!(!set.is_class_excluded("x/pkg/Outer"));
    }

    #[test]
    fn test_bad_pattern_reports_line() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CLASSES_FILE_NAME), "pkg/Ok\npkg/Bad(\n").unwrap();

        match ExclusionSet::load(temp.path()).unwrap_err() {
            IndexError::InvalidPattern { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_method_keys_are_exact() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(METHODS_FILE_NAME), "pkg/Owner m (IZ)\r\n\n").unwrap();

        let set = ExclusionSet::load(temp.path()).unwrap();
        assert_eq!(set.method_count(), 1);
        let hit = MethodKey::new("pkg/Owner".into(), "m".into(), "(IZ)".into());
        let miss = MethodKey::new("pkg/Owner".into(), "m".into(), "(I)".into());
        assert!(set.is_method_excluded(&hit));
        assert!(!set.is_method_excluded(&miss));
    }

    #[test]
    fn test_malformed_method_line() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(METHODS_FILE_NAME), "pkg/Owner m void int\n").unwrap();
        assert!(matches!(
            ExclusionSet::load(temp.path()).unwrap_err(),
            IndexError::Scan(_)
        ));
    }
}
