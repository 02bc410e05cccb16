//! Class patterns and method signatures for single declarations

use crate::declaration::{Declaration, DeclarationId, DeclarationKind, DeclarationProvider};
use crate::descriptor::{self, ErasedType};
use crate::error::{ScanError, ScanResult};
use crate::index::{MethodKey, NESTED_CLASS_SUFFIX};
use crate::types::BinaryName;
use std::collections::HashSet;
use std::fmt;

/// Method name the JVM gives every constructor
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Regex over internal class names matching a class and everything the
/// compiler nests inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassPattern(String);

impl ClassPattern {
    #[must_use]
    pub fn for_class(name: &BinaryName) -> Self {
        Self(format!(
            "{}{NESTED_CLASS_SUFFIX}",
            regex::escape(&name.internal_name())
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A method or constructor overload at the bytecode level
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub owner: BinaryName,
    /// Method name, or `<init>`
    pub name: String,
    /// Erased parameters, implicit outer instance included
    pub parameters: Vec<ErasedType>,
    /// Kept for reports only, never part of the key
    pub return_type: ErasedType,
}

impl MethodSignature {
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// `(IZ)`
    #[must_use]
    pub fn parameter_descriptor(&self) -> String {
        descriptor::parameter_descriptor(&self.parameters)
    }

    /// The line written to the method exclusion file
    #[must_use]
    pub fn key(&self) -> MethodKey {
        MethodKey::new(
            self.owner.internal_name(),
            self.name.clone(),
            self.parameter_descriptor(),
        )
    }

    /// `pkg.Outer.Inner#<init>(pkg.Outer, int): void`
    #[must_use]
    pub fn display(&self) -> String {
        let parameters: Vec<String> = self.parameters.iter().map(ErasedType::display).collect();
        format!(
            "{}#{}({}): {}",
            self.owner.canonical_name(),
            self.name,
            parameters.join(", "),
            self.return_type.display()
        )
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Package a declaration names itself; a package declaration is its own
fn declared_package(declaration: &Declaration) -> Option<&str> {
    if !declaration.package.is_empty() {
        Some(declaration.package.as_str())
    } else if declaration.kind == DeclarationKind::Package && !declaration.name.is_empty() {
        Some(declaration.name.as_str())
    } else {
        None
    }
}

/// Builds signatures by following enclosing links through a provider
pub struct SignatureBuilder<'a, P: ?Sized> {
    provider: &'a P,
}

impl<'a, P: DeclarationProvider + ?Sized> SignatureBuilder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Binary name of a type declaration
    ///
    /// Enclosing types are collected until the first scope that is not a
    /// type (a package, a method body). A blank package is taken from the
    /// nearest enclosing scope that declares one, so local classes inherit
    /// the package of the method they live in.
    pub fn class_name(&self, id: DeclarationId) -> ScanResult<BinaryName> {
        let declaration = self.lookup(id)?;
        let mut chain = vec![declaration];
        let mut visited = HashSet::from([id]);
        let mut package = declared_package(declaration);
        let mut in_type_chain = true;
        let mut current = declaration.enclosing;

        while let Some(parent_id) = current {
            if !in_type_chain && package.is_some() {
                break;
            }
            if !visited.insert(parent_id) {
                return Err(ScanError::CyclicEnclosure(declaration.name.clone()));
            }
            let parent = self.lookup(parent_id)?;
            in_type_chain = in_type_chain && parent.kind.is_type();
            if in_type_chain {
                chain.push(parent);
            }
            if package.is_none() {
                package = declared_package(parent);
            }
            current = parent.enclosing;
        }

        BinaryName::new(
            package.unwrap_or(""),
            chain.iter().rev().map(|d| d.name.as_str()),
        )
    }

    pub fn class_pattern(&self, id: DeclarationId) -> ScanResult<ClassPattern> {
        let declaration = self.lookup(id)?;
        if !declaration.kind.is_type() {
            return Err(ScanError::KindMismatch {
                declaration: declaration.name.clone(),
                expected: "type",
            });
        }
        self.class_name(id).map(|name| ClassPattern::for_class(&name))
    }

    pub fn method_signature(&self, id: DeclarationId) -> ScanResult<MethodSignature> {
        let declaration = self.lookup(id)?;
        if !declaration.kind.is_executable() {
            return Err(ScanError::KindMismatch {
                declaration: declaration.name.clone(),
                expected: "method or constructor",
            });
        }

        let owner_id = declaration
            .enclosing
            .ok_or_else(|| ScanError::MissingOwner(declaration.name.clone()))?;
        let owner_declaration = self.lookup(owner_id)?;
        if !owner_declaration.kind.is_type() {
            return Err(ScanError::MissingOwner(declaration.name.clone()));
        }
        let owner = self.class_name(owner_id)?;

        let is_constructor = declaration.kind == DeclarationKind::Constructor;
        let unsupported = |source| ScanError::UnsupportedType {
            declaration: format!("{}#{}", owner.canonical_name(), declaration.name),
            source,
        };

        let mut parameters = Vec::with_capacity(declaration.parameters.len() + 1);
        if is_constructor && self.is_inner_class(owner_declaration)? {
            if let Some(outer) = owner.outer() {
                parameters.push(ErasedType::Class(outer));
            }
        }
        for parameter in &declaration.parameters {
            parameters.push(descriptor::erase_parameter(parameter).map_err(unsupported)?);
        }

        let return_type = match (&declaration.return_type, is_constructor) {
            (Some(ty), false) => descriptor::erase(ty).map_err(unsupported)?,
            _ => ErasedType::Void,
        };

        Ok(MethodSignature {
            name: if is_constructor {
                CONSTRUCTOR_NAME.to_string()
            } else {
                declaration.name.clone()
            },
            owner,
            parameters,
            return_type,
        })
    }

    /// A non-static class directly inside another type whose instances it
    /// captures
    fn is_inner_class(&self, class: &Declaration) -> ScanResult<bool> {
        if class.kind != DeclarationKind::Class || class.is_static {
            return Ok(false);
        }
        let Some(enclosing_id) = class.enclosing else {
            return Ok(false);
        };
        let enclosing = self.lookup(enclosing_id)?;
        Ok(enclosing.kind.is_type() && !enclosing.kind.has_static_members())
    }

    fn lookup(&self, id: DeclarationId) -> ScanResult<&'a Declaration> {
        self.provider
            .declaration(id)
            .ok_or(ScanError::UnknownDeclaration(id))
    }
}
