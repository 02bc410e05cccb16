//! The exclusion index and its line format
//!
//! Both files are plain UTF-8, one entry per line:
//!
//! - class file: a regex over internal class names, e.g.
//!   `org/example/Outer\$Inner(\$.+)?`, matched against the whole name;
//! - method file: `owner name (params)`, e.g. `org/example/Outer <init> (I)`,
//!   compared for equality. The return type is never part of the key.

use crate::descriptor::{self, TypeError};
use crate::error::{ScanError, ScanResult};
use crate::signature::{ClassPattern, MethodSignature};
use serde::{Deserialize, Serialize};
use std::fmt;

/// File holding one class pattern per line
pub const CLASSES_FILE_NAME: &str = "ignore-annotated-classes.txt";

/// File holding one method key per line
pub const METHODS_FILE_NAME: &str = "ignore-annotated-methods.txt";

/// Appended to every class pattern so synthetic nested classes match too
pub const NESTED_CLASS_SUFFIX: &str = r"(\$.+)?";

/// Separates the three fields of a method key
pub const KEY_SEPARATOR: char = ' ';

/// Matching key for one method overload
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    /// Internal owner name, `pkg/Outer$Inner`
    pub owner: String,
    pub name: String,
    /// Parenthesized parameter descriptors, `(IZ)`
    pub parameters: String,
}

impl MethodKey {
    #[must_use]
    pub fn new(owner: String, name: String, parameters: String) -> Self {
        Self {
            owner,
            name,
            parameters,
        }
    }

    /// Key for a call site as a class file reader reports it
    ///
    /// `owner` may use either `.` or `/` as package separator.
    pub fn from_call_site(
        owner: &str,
        name: &str,
        method_descriptor: &str,
    ) -> Result<Self, TypeError> {
        let parsed = descriptor::parse_method_descriptor(method_descriptor)?;
        Ok(Self::new(
            owner.replace('.', "/"),
            name.to_string(),
            descriptor::parameter_descriptor(&parsed.parameters),
        ))
    }

    /// Parse one line of the method file
    pub fn parse(line: &str) -> ScanResult<Self> {
        let mut fields = line.split(KEY_SEPARATOR);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(owner), Some(name), Some(parameters), None)
                if !owner.is_empty()
                    && !name.is_empty()
                    && parameters.starts_with('(')
                    && parameters.ends_with(')') =>
            {
                Ok(Self::new(
                    owner.to_string(),
                    name.to_string(),
                    parameters.to_string(),
                ))
            }
            _ => Err(ScanError::InvalidName(format!("malformed method key: {line}"))),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.owner, self.name, self.parameters
        )
    }
}

/// Everything one round suppresses, in discovery order
///
/// Duplicates are kept; consumers treat each list as an OR-ed set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionIndex {
    pub class_patterns: Vec<ClassPattern>,
    pub method_signatures: Vec<MethodSignature>,
}

impl ExclusionIndex {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_patterns.is_empty() && self.method_signatures.is_empty()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.class_patterns.len() + self.method_signatures.len()
    }

    /// Contents of the class file, every line newline-terminated
    #[must_use]
    pub fn render_classes(&self) -> String {
        render_lines(self.class_patterns.iter())
    }

    /// Contents of the method file, every line newline-terminated
    #[must_use]
    pub fn render_methods(&self) -> String {
        render_lines(self.method_signatures.iter().map(MethodSignature::key))
    }
}

fn render_lines<I, T>(lines: I) -> String
where
    I: Iterator<Item = T>,
    T: fmt::Display,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}
