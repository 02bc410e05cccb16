//! Source-level type model shared by the encoder and the builder

use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JVM primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    /// Every primitive, in descriptor-table order
    pub const ALL: [Primitive; 8] = [
        Primitive::Int,
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    /// Single-letter descriptor code
    #[must_use]
    pub fn descriptor(self) -> char {
        match self {
            Primitive::Int => 'I',
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
        }
    }

    /// Source keyword
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    #[must_use]
    pub fn from_descriptor(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.descriptor() == code)
    }
}

impl FromStr for Primitive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("Invalid primitive type: {s}"))
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A class name split into its package and its outer-to-inner class chain
///
/// Serialized as the binary name (`java.util.Map$Entry`); the slash form
/// (`java/util/Map$Entry`) is accepted on input as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BinaryName {
    package: Vec<String>,
    classes: Vec<String>,
}

impl BinaryName {
    /// Build a name from a dotted package and the class chain, outermost first
    pub fn new<I, S>(package: &str, classes: I) -> ScanResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let package: Vec<String> = if package.is_empty() {
            Vec::new()
        } else {
            package.split('.').map(str::to_string).collect()
        };
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();

        if classes.is_empty() {
            return Err(ScanError::InvalidName(format!(
                "no class name given in package '{}'",
                package.join(".")
            )));
        }
        if let Some(bad) = package.iter().chain(&classes).find(|s| !is_valid_segment(s)) {
            return Err(ScanError::InvalidName(format!(
                "bad segment '{bad}' in {}.{}",
                package.join("."),
                classes.join("$")
            )));
        }

        Ok(Self { package, classes })
    }

    /// Parse a binary (`a.b.C$D`) or internal (`a/b/C$D`) class name
    pub fn parse(name: &str) -> ScanResult<Self> {
        let dotted = name.replace('/', ".");
        let (package, classes) = match dotted.rfind('.') {
            Some(index) => (&dotted[..index], &dotted[index + 1..]),
            None => ("", dotted.as_str()),
        };
        Self::new(package, classes.split('$'))
    }

    /// `java.lang.Object`, the erasure of every type variable
    #[must_use]
    pub fn object() -> Self {
        Self {
            package: vec!["java".to_string(), "lang".to_string()],
            classes: vec!["Object".to_string()],
        }
    }

    /// A class nested directly inside this one
    pub fn nested(&self, name: &str) -> ScanResult<Self> {
        if !is_valid_segment(name) {
            return Err(ScanError::InvalidName(name.to_string()));
        }
        let mut classes = self.classes.clone();
        classes.push(name.to_string());
        Ok(Self {
            package: self.package.clone(),
            classes,
        })
    }

    /// The immediately enclosing class, if this one is nested
    #[must_use]
    pub fn outer(&self) -> Option<Self> {
        if self.classes.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            classes: self.classes[..self.classes.len() - 1].to_vec(),
        })
    }

    #[must_use]
    pub fn package(&self) -> String {
        self.package.join(".")
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.classes.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.classes.len() > 1
    }

    /// `java/util/Map$Entry`
    #[must_use]
    pub fn internal_name(&self) -> String {
        self.join('/', '$')
    }

    /// `java.util.Map$Entry`
    #[must_use]
    pub fn binary_name(&self) -> String {
        self.join('.', '$')
    }

    /// `java.util.Map.Entry`
    #[must_use]
    pub fn canonical_name(&self) -> String {
        self.join('.', '.')
    }

    fn join(&self, package_separator: char, nesting_separator: char) -> String {
        let mut out = String::new();
        for segment in &self.package {
            out.push_str(segment);
            out.push(package_separator);
        }
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                out.push(nesting_separator);
            }
            out.push_str(class);
        }
        out
    }
}

/// `$` is a legal identifier character, so declared names may carry it;
/// only [`BinaryName::parse`] treats it as a nesting separator.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.chars().any(|c| {
            matches!(c, '.' | '/' | ';' | '[' | ']' | '<' | '>' | '(' | ')') || c.is_whitespace()
        })
}

impl TryFrom<String> for BinaryName {
    type Error = ScanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BinaryName> for String {
    fn from(name: BinaryName) -> Self {
        name.binary_name()
    }
}

impl fmt::Display for BinaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.binary_name())
    }
}

/// Bound of a wildcard type argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardBound {
    Extends(Box<Type>),
    Super(Box<Type>),
}

/// A source-level type as the host compiler reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Type {
    Primitive(Primitive),
    /// An N-dimensional array is one node with `dimensions = N`
    Array {
        element: Box<Type>,
        dimensions: u32,
    },
    Reference {
        name: BinaryName,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<Type>,
    },
    TypeVariable(String),
    /// Only meaningful as a generic argument
    Wildcard(Option<WildcardBound>),
    /// Only meaningful as a return type
    Void,
}

impl Type {
    #[must_use]
    pub fn reference(name: BinaryName) -> Self {
        Type::Reference {
            name,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn generic(name: BinaryName, arguments: Vec<Type>) -> Self {
        Type::Reference { name, arguments }
    }

    #[must_use]
    pub fn type_variable(name: &str) -> Self {
        Type::TypeVariable(name.to_string())
    }

    #[must_use]
    pub fn object() -> Self {
        Type::reference(BinaryName::object())
    }

    /// Wrap `element` in `dimensions` array levels, folding nested arrays
    /// into a single node
    #[must_use]
    pub fn array(element: Type, dimensions: u32) -> Self {
        match element {
            Type::Array {
                element,
                dimensions: inner,
            } => Type::Array {
                element,
                dimensions: inner.saturating_add(dimensions),
            },
            element => Type::Array {
                element: Box::new(element),
                dimensions,
            },
        }
    }
}

impl From<Primitive> for Type {
    fn from(primitive: Primitive) -> Self {
        Type::Primitive(primitive)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{p}"),
            Type::Array {
                element,
                dimensions,
            } => {
                write!(f, "{element}")?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            Type::Reference { name, arguments } => {
                write!(f, "{}", name.canonical_name())?;
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            Type::TypeVariable(name) => f.write_str(name),
            Type::Wildcard(None) => f.write_str("?"),
            Type::Wildcard(Some(WildcardBound::Extends(bound))) => write!(f, "? extends {bound}"),
            Type::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
            Type::Void => f.write_str("void"),
        }
    }
}

/// An annotation attached to a declaration, reduced to its string values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation type name, qualified or simple
    pub name: String,
    /// String values of the annotation's `value` element
    #[serde(default)]
    pub values: Vec<String>,
}

impl Annotation {
    pub fn new<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `@SuppressWarnings({...})`
    pub fn suppress_warnings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("java.lang.SuppressWarnings", values)
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}
