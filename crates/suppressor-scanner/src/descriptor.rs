//! Type erasure and JVM descriptor encoding
//!
//! Every source-level [`Type`] is first erased into an [`ErasedType`]; both
//! the descriptor form (`[Ljava/util/List;`) and the dotted display form
//! (`java.util.List[]`) are rendered from that one value so the two can
//! never disagree on erasure or dimensions.

use crate::types::{BinaryName, Primitive, Type, WildcardBound};
use thiserror::Error;

/// Largest array rank the class file format allows
pub const MAX_ARRAY_DIMENSIONS: u32 = 255;

/// Errors raised when a type has no descriptor encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("wildcard `{0}` has no concrete upper bound")]
    UnboundedWildcard(String),

    #[error("`void` is only valid as a return type")]
    MisplacedVoid,

    #[error("array of `{0}` declares zero dimensions")]
    ZeroDimensions(String),

    #[error("array declares {0} dimensions, at most 255 are allowed")]
    TooManyDimensions(u32),

    #[error("malformed descriptor `{descriptor}`: {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },
}

/// Output convention for an encoded type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// `I`, `[I`, `Ljava/util/List;`
    Descriptor,
    /// `int`, `int[]`, `java.util.List`
    Display,
}

/// A type after generic erasure
///
/// `Array` never wraps another `Array` or `Void`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErasedType {
    Primitive(Primitive),
    Void,
    Class(BinaryName),
    Array {
        dimensions: u8,
        element: Box<ErasedType>,
    },
}

impl ErasedType {
    #[must_use]
    pub fn object() -> Self {
        ErasedType::Class(BinaryName::object())
    }

    fn array(element: ErasedType, dimensions: u32) -> Result<Self, TypeError> {
        let dimensions =
            u8::try_from(dimensions).map_err(|_| TypeError::TooManyDimensions(dimensions))?;
        Ok(ErasedType::Array {
            dimensions,
            element: Box::new(element),
        })
    }

    #[must_use]
    pub fn render(&self, presentation: Presentation) -> String {
        match presentation {
            Presentation::Descriptor => self.descriptor(),
            Presentation::Display => self.display(),
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    #[must_use]
    pub fn display(&self) -> String {
        match self {
            ErasedType::Primitive(p) => p.name().to_string(),
            ErasedType::Void => "void".to_string(),
            ErasedType::Class(name) => name.canonical_name(),
            ErasedType::Array {
                dimensions,
                element,
            } => format!("{}{}", element.display(), "[]".repeat(usize::from(*dimensions))),
        }
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            ErasedType::Primitive(p) => out.push(p.descriptor()),
            ErasedType::Void => out.push('V'),
            ErasedType::Class(name) => {
                out.push('L');
                out.push_str(&name.internal_name());
                out.push(';');
            }
            ErasedType::Array {
                dimensions,
                element,
            } => {
                for _ in 0..*dimensions {
                    out.push('[');
                }
                element.write_descriptor(out);
            }
        }
    }
}

/// Erase a source-level type
///
/// Generic arguments are dropped, type variables become `java.lang.Object`
/// whatever their bound, and nested array nodes are collapsed.
pub fn erase(ty: &Type) -> Result<ErasedType, TypeError> {
    match ty {
        Type::Primitive(p) => Ok(ErasedType::Primitive(*p)),
        Type::Void => Ok(ErasedType::Void),
        Type::Reference { name, .. } => Ok(ErasedType::Class(name.clone())),
        Type::TypeVariable(_) => Ok(ErasedType::object()),
        Type::Wildcard(Some(WildcardBound::Extends(bound))) => erase(bound),
        Type::Wildcard(_) => Err(TypeError::UnboundedWildcard(ty.to_string())),
        Type::Array {
            element,
            dimensions,
        } => {
            if *dimensions == 0 {
                return Err(TypeError::ZeroDimensions(element.to_string()));
            }
            match erase(element)? {
                ErasedType::Void => Err(TypeError::MisplacedVoid),
                ErasedType::Array {
                    dimensions: inner,
                    element,
                } => ErasedType::array(*element, u32::from(inner).saturating_add(*dimensions)),
                erased => ErasedType::array(erased, *dimensions),
            }
        }
    }
}

/// Erase a declared parameter type; `void` is rejected
pub fn erase_parameter(ty: &Type) -> Result<ErasedType, TypeError> {
    match erase(ty)? {
        ErasedType::Void => Err(TypeError::MisplacedVoid),
        erased => Ok(erased),
    }
}

/// Erase and render in one step
pub fn encode(ty: &Type, presentation: Presentation) -> Result<String, TypeError> {
    erase(ty).map(|erased| erased.render(presentation))
}

/// `(IZLjava/lang/String;)`: parameter descriptors without a return type
#[must_use]
pub fn parameter_descriptor(parameters: &[ErasedType]) -> String {
    let mut out = String::from("(");
    for parameter in parameters {
        parameter.write_descriptor(&mut out);
    }
    out.push(')');
    out
}

/// A method descriptor split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub parameters: Vec<ErasedType>,
    pub return_type: ErasedType,
}

/// Parse a single field descriptor such as `[[I`
pub fn parse_field_descriptor(descriptor: &str) -> Result<ErasedType, TypeError> {
    let mut parser = DescriptorParser::new(descriptor);
    let ty = parser.parse_type()?;
    if parser.remaining() != 0 {
        return Err(parser.error("trailing characters"));
    }
    Ok(ty)
}

/// Parse a method descriptor such as `(ILjava/lang/String;)V`
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor, TypeError> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.expect(b'(')?;
    let mut parameters = Vec::new();
    while !parser.peek(b')')? {
        parameters.push(parser.parse_type()?);
    }
    parser.expect(b')')?;
    let return_type = if parser.peek(b'V')? {
        parser.pos += 1;
        ErasedType::Void
    } else {
        parser.parse_type()?
    };
    if parser.remaining() != 0 {
        return Err(parser.error("trailing characters"));
    }
    Ok(MethodDescriptor {
        parameters,
        return_type,
    })
}

struct DescriptorParser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: &str) -> TypeError {
        TypeError::MalformedDescriptor {
            descriptor: self.source.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn peek(&self, byte: u8) -> Result<bool, TypeError> {
        match self.bytes.get(self.pos) {
            Some(b) => Ok(*b == byte),
            None => Err(self.error("unexpected end")),
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), TypeError> {
        if self.peek(byte)? {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", byte as char)))
        }
    }

    fn parse_type(&mut self) -> Result<ErasedType, TypeError> {
        let Some(&tag) = self.bytes.get(self.pos) else {
            return Err(self.error("unexpected end"));
        };
        match tag {
            b'L' => self.parse_class(),
            b'[' => self.parse_array(),
            other => match Primitive::from_descriptor(other as char) {
                Some(primitive) => {
                    self.pos += 1;
                    Ok(ErasedType::Primitive(primitive))
                }
                None => Err(self.error(&format!("unexpected tag '{}'", other as char))),
            },
        }
    }

    fn parse_class(&mut self) -> Result<ErasedType, TypeError> {
        self.expect(b'L')?;
        let source = self.source;
        let start = self.pos;
        let Some(length) = self.bytes[start..].iter().position(|b| *b == b';') else {
            return Err(self.error("unterminated class name"));
        };
        let name = &source[start..start + length];
        let name = BinaryName::parse(name).map_err(|e| self.error(&e.to_string()))?;
        self.pos = start + length + 1;
        Ok(ErasedType::Class(name))
    }

    fn parse_array(&mut self) -> Result<ErasedType, TypeError> {
        let mut dimensions: u32 = 0;
        while self.bytes.get(self.pos) == Some(&b'[') {
            dimensions += 1;
            self.pos += 1;
        }
        let element = self.parse_type()?;
        ErasedType::array(element, dimensions)
    }
}
