//! Suppression scanner: one pass over a round's declarations

use crate::declaration::{Declaration, DeclarationProvider};
use crate::error::{ScanError, ScanResult};
use crate::index::ExclusionIndex;
use crate::signature::SignatureBuilder;
use crate::types::Annotation;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Annotation that carries suppression requests
pub const DEFAULT_MARKER_ANNOTATION: &str = "java.lang.SuppressWarnings";

/// Annotation value that requests exclusion from the modernizer check
pub const DEFAULT_MARKER_VALUE: &str = "modernizer";

/// The annotation and value that mark a declaration as suppressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionMarker {
    pub annotation: String,
    pub value: String,
}

impl Default for SuppressionMarker {
    fn default() -> Self {
        Self {
            annotation: DEFAULT_MARKER_ANNOTATION.to_string(),
            value: DEFAULT_MARKER_VALUE.to_string(),
        }
    }
}

impl SuppressionMarker {
    #[must_use]
    pub fn new(annotation: &str, value: &str) -> Self {
        Self {
            annotation: annotation.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether `annotation` is the marker annotation carrying the marker value
    ///
    /// A simple name on either side matches the qualified name on the other.
    #[must_use]
    pub fn matches(&self, annotation: &Annotation) -> bool {
        let same_type = if annotation.name.contains('.') && self.annotation.contains('.') {
            annotation.name == self.annotation
        } else {
            annotation.simple_name() == self.simple_name()
        };
        same_type && annotation.has_value(&self.value)
    }

    #[must_use]
    pub fn is_present_on(&self, declaration: &Declaration) -> bool {
        declaration.annotations.iter().any(|a| self.matches(a))
    }

    fn simple_name(&self) -> &str {
        self.annotation
            .rsplit('.')
            .next()
            .unwrap_or(&self.annotation)
    }
}

/// Collects the exclusion index for one round
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    marker: SuppressionMarker,
}

impl Scanner {
    /// Create a scanner for `@SuppressWarnings("modernizer")`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_marker(mut self, marker: SuppressionMarker) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn marker(&self) -> &SuppressionMarker {
        &self.marker
    }

    /// Scan every declaration of the round in discovery order
    ///
    /// # Errors
    /// Fails on the first marked declaration whose signature cannot be built
    pub fn scan<P: DeclarationProvider + ?Sized>(&self, provider: &P) -> ScanResult<ExclusionIndex> {
        let builder = SignatureBuilder::new(provider);
        let mut index = ExclusionIndex::default();

        for id in provider.round_declarations() {
            let declaration = provider
                .declaration(id)
                .ok_or(ScanError::UnknownDeclaration(id))?;
            if !self.marker.is_present_on(declaration) {
                continue;
            }

            if declaration.kind.is_type() {
                let pattern = builder.class_pattern(id)?;
                debug!(%id, pattern = %pattern, "suppressed class");
                index.class_patterns.push(pattern);
            } else if declaration.kind.is_executable() {
                let signature = builder.method_signature(id)?;
                debug!(%id, key = %signature.key(), "suppressed method");
                index.method_signatures.push(signature);
            } else {
                trace!(%id, kind = ?declaration.kind, name = %declaration.name, "marker on unsuppressible declaration");
            }
        }

        debug!(
            classes = index.class_patterns.len(),
            methods = index.method_signatures.len(),
            "suppression scan complete"
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_matches_qualified_and_simple_names() {
        let marker = SuppressionMarker::default();
        assert!(marker.matches(&Annotation::new("java.lang.SuppressWarnings", ["modernizer"])));
        assert!(marker.matches(&Annotation::new("SuppressWarnings", ["modernizer"])));
        assert!(!marker.matches(&Annotation::new("com.acme.SuppressWarnings", ["modernizer"])));
    }

    #[test]
    fn test_marker_requires_value() {
        let marker = SuppressionMarker::default();
        assert!(!marker.matches(&Annotation::suppress_warnings(["unchecked"])));
        assert!(!marker.matches(&Annotation::new("Deprecated", ["modernizer"])));
        assert!(marker.matches(&Annotation::suppress_warnings(["unchecked", "modernizer"])));
    }

    #[test]
    fn test_custom_marker() {
        let marker = SuppressionMarker::new("org.acme.Legacy", "allow");
        assert!(marker.matches(&Annotation::new("org.acme.Legacy", ["allow"])));
        assert!(!marker.matches(&Annotation::suppress_warnings(["modernizer"])));
    }
}
