//! JSON output formatter

use crate::error::ScanResult;
use crate::index::ExclusionIndex;
use crate::signature::ClassPattern;
use serde::Serialize;

#[derive(Serialize)]
struct IndexReport<'a> {
    class_patterns: Vec<&'a str>,
    methods: Vec<MethodReport>,
}

#[derive(Serialize)]
struct MethodReport {
    key: String,
    owner: String,
    name: String,
    parameters: String,
    return_type: String,
}

/// Convert an exclusion index to a JSON string
///
/// # Errors
/// Returns an error if serialization fails
pub fn to_json(index: &ExclusionIndex) -> ScanResult<String> {
    let report = IndexReport {
        class_patterns: index.class_patterns.iter().map(ClassPattern::as_str).collect(),
        methods: index
            .method_signatures
            .iter()
            .map(|signature| MethodReport {
                key: signature.key().to_string(),
                owner: signature.owner.internal_name(),
                name: signature.name.clone(),
                parameters: signature.parameter_descriptor(),
                return_type: signature.return_type.descriptor(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).map_err(Into::into)
}
