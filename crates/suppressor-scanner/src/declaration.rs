//! Declaration model and the provider seam the host fills in
//!
//! The host compiler walks its own element model and hands the result over
//! either by implementing [`DeclarationProvider`] directly or by emitting a
//! JSON manifest that loads into a [`DeclarationSet`].

use crate::error::{ScanError, ScanResult};
use crate::types::{Annotation, Type};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a declaration within its provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(pub usize);

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a declaration declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Method,
    Constructor,
    Field,
    Package,
    Other,
}

impl DeclarationKind {
    /// Declares a type that compiles to its own class file
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Record | Self::AnnotationType
        )
    }

    #[must_use]
    pub fn is_executable(self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }

    /// Nested declarations of this kind never capture an outer instance
    #[must_use]
    pub fn is_implicitly_static(self) -> bool {
        matches!(
            self,
            Self::Interface | Self::Enum | Self::Record | Self::AnnotationType
        )
    }

    /// Member types declared inside this kind are implicitly static
    #[must_use]
    pub fn has_static_members(self) -> bool {
        matches!(self, Self::Interface | Self::AnnotationType)
    }
}

/// A source-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    /// Simple name; constructors use `<init>`
    pub name: String,
    /// Dotted owning package, empty for the default package
    #[serde(default)]
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<DeclarationId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Type>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Type>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Declaration {
    #[must_use]
    pub fn new(kind: DeclarationKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            package: String::new(),
            enclosing: None,
            parameters: Vec::new(),
            return_type: None,
            is_static: false,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(package: &str, name: &str) -> Self {
        Self::new(DeclarationKind::Class, name).in_package(package)
    }

    #[must_use]
    pub fn method(name: &str) -> Self {
        Self::new(DeclarationKind::Method, name).returning(Type::Void)
    }

    #[must_use]
    pub fn constructor() -> Self {
        Self::new(DeclarationKind::Constructor, crate::signature::CONSTRUCTOR_NAME)
    }

    #[must_use]
    pub fn field(name: &str) -> Self {
        Self::new(DeclarationKind::Field, name)
    }

    #[must_use]
    pub fn in_package(mut self, package: &str) -> Self {
        self.package = package.to_string();
        self
    }

    #[must_use]
    pub fn enclosed_by(mut self, enclosing: DeclarationId) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<Type>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Type>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn returning(mut self, return_type: impl Into<Type>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Mark as `static`
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Read-only access to the declarations of one processing round
pub trait DeclarationProvider {
    /// Every declaration visible in the round, in discovery order
    fn round_declarations(&self) -> Vec<DeclarationId>;

    /// Resolve an id, including ids only reachable through enclosing links
    fn declaration(&self, id: DeclarationId) -> Option<&Declaration>;
}

/// Arena of declarations, loadable from a JSON manifest
///
/// Ids are positions in the arena; enclosing links must point inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    #[serde(default)]
    declarations: Vec<Declaration>,
}

impl DeclarationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration and return its id
    pub fn add(&mut self, declaration: Declaration) -> DeclarationId {
        self.declarations.push(declaration);
        DeclarationId(self.declarations.len() - 1)
    }

    #[must_use]
    pub fn get(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclarationId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclarationId(i), d))
    }

    /// Parse and validate a manifest
    pub fn from_json(json: &str) -> ScanResult<Self> {
        let set: Self = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn to_json(&self) -> ScanResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Check that every enclosing link resolves and none is a self-loop
    pub fn validate(&self) -> ScanResult<()> {
        for (id, declaration) in self.iter() {
            if let Some(enclosing) = declaration.enclosing {
                if enclosing == id {
                    return Err(ScanError::CyclicEnclosure(declaration.name.clone()));
                }
                if self.get(enclosing).is_none() {
                    return Err(ScanError::UnknownDeclaration(enclosing));
                }
            }
        }
        Ok(())
    }

    /// Append another set after this one, rebasing its enclosing links
    pub fn merge(&mut self, other: DeclarationSet) {
        let offset = self.declarations.len();
        self.declarations
            .extend(other.declarations.into_iter().map(|mut declaration| {
                declaration.enclosing = declaration
                    .enclosing
                    .map(|DeclarationId(i)| DeclarationId(i + offset));
                declaration
            }));
    }
}

impl DeclarationProvider for DeclarationSet {
    fn round_declarations(&self) -> Vec<DeclarationId> {
        (0..self.declarations.len()).map(DeclarationId).collect()
    }

    fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    #[test]
    fn test_kind_classification() {
        assert!(DeclarationKind::Class.is_type());
        assert!(DeclarationKind::Enum.is_type());
        assert!(!DeclarationKind::Method.is_type());
        assert!(DeclarationKind::Constructor.is_executable());
        assert!(!DeclarationKind::Field.is_executable());
        assert!(!DeclarationKind::Class.is_implicitly_static());
        assert!(DeclarationKind::Record.is_implicitly_static());
    }

    #[test]
    fn test_manifest_round_trip_preserves_order() {
        let mut set = DeclarationSet::new();
        let outer = set.add(Declaration::class("pkg", "Outer"));
        set.add(
            Declaration::method("m")
                .enclosed_by(outer)
                .with_parameter(Primitive::Int),
        );

        let json = set.to_json().unwrap();
        let loaded = DeclarationSet::from_json(&json).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.round_declarations(), vec![DeclarationId(0), DeclarationId(1)]);
    }

    #[test]
    fn test_manifest_rejects_dangling_enclosing() {
        let json = r#"{"declarations":[{"kind":"method","name":"m","enclosing":4}]}"#;
        let err = DeclarationSet::from_json(json).unwrap_err();
        assert!(matches!(err, ScanError::UnknownDeclaration(DeclarationId(4))));
    }

    #[test]
    fn test_manifest_rejects_self_enclosure() {
        let json = r#"{"declarations":[{"kind":"class","name":"A","enclosing":0}]}"#;
        assert!(DeclarationSet::from_json(json).is_err());
    }

    #[test]
    fn test_merge_rebases_links() {
        let mut first = DeclarationSet::new();
        first.add(Declaration::class("a", "A"));

        let mut second = DeclarationSet::new();
        let b = second.add(Declaration::class("b", "B"));
        second.add(Declaration::constructor().enclosed_by(b));

        first.merge(second);
        assert_eq!(first.len(), 3);
        assert_eq!(
            first.get(DeclarationId(2)).unwrap().enclosing,
            Some(DeclarationId(1))
        );
    }
}
