//! Report formatters for an exclusion index

pub mod json;
pub mod markdown;

pub use json::to_json;
pub use markdown::to_markdown;
