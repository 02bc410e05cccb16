//! Error types for the suppressor scanner

use crate::declaration::DeclarationId;
use crate::descriptor::TypeError;
use thiserror::Error;

/// Result type for scanner operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while building suppression signatures
#[derive(Error, Debug)]
pub enum ScanError {
    /// A declared type cannot be expressed as a descriptor
    #[error("Unsupported type in {declaration}: {source}")]
    UnsupportedType {
        declaration: String,
        #[source]
        source: TypeError,
    },

    /// An enclosing link points at a declaration the provider does not know
    #[error("Unknown declaration: {0}")]
    UnknownDeclaration(DeclarationId),

    /// The enclosing chain loops back on itself
    #[error("Cyclic enclosing chain at {0}")]
    CyclicEnclosure(String),

    /// A method or constructor has no enclosing type declaration
    #[error("Method {0} has no enclosing type declaration")]
    MissingOwner(String),

    /// A declaration was passed to the wrong builder operation
    #[error("Declaration {declaration} is not a {expected}")]
    KindMismatch {
        declaration: String,
        expected: &'static str,
    },

    /// A class or package name is malformed
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Failed to parse JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
