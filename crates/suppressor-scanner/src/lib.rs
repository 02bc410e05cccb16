//! Suppressor Scanner - declaration to compiled-signature synthesis
//!
//! This crate turns source-level declarations carrying a suppression marker
//! into the class patterns and method keys a bytecode-level modernizer
//! check consults. It never touches the filesystem; persisting the result
//! is left to `suppressor-core`.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::match_same_arms,
    clippy::needless_pass_by_value
)]

pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod index;
pub mod output;
pub mod scan;
pub mod signature;
pub mod types;

pub use declaration::{Declaration, DeclarationId, DeclarationKind, DeclarationProvider, DeclarationSet};
pub use descriptor::{ErasedType, Presentation, TypeError};
pub use error::{ScanError, ScanResult};
pub use index::{ExclusionIndex, MethodKey};
pub use scan::{Scanner, SuppressionMarker};
pub use signature::{ClassPattern, MethodSignature, SignatureBuilder};
pub use types::{Annotation, BinaryName, Primitive, Type, WildcardBound};
