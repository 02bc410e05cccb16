//! Markdown output formatter

use crate::index::ExclusionIndex;

/// Convert an exclusion index to a Markdown report in source notation
#[must_use]
pub fn to_markdown(index: &ExclusionIndex) -> String {
    let mut output = String::new();

    output.push_str("# Modernizer Suppressions\n\n");
    output.push_str(&format!(
        "**Total:** {} suppressed declarations\n\n",
        index.total_count()
    ));

    output.push_str("## Classes\n\n");
    if index.class_patterns.is_empty() {
        output.push_str("_No classes suppressed_\n\n");
    } else {
        for pattern in &index.class_patterns {
            output.push_str(&format!("- `{pattern}`\n"));
        }
        output.push('\n');
    }

    output.push_str("## Methods\n\n");
    if index.method_signatures.is_empty() {
        output.push_str("_No methods suppressed_\n\n");
    } else {
        for signature in &index.method_signatures {
            output.push_str(&format!(
                "- **{}** `{}`\n",
                signature.display(),
                signature.key()
            ));
        }
        output.push('\n');
    }

    output
}
