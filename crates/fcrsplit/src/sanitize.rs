//! Helpers for turning untrusted strings into file names and log fields.

use std::path::Path;

use crate::identifier::Identifier;

pub const OUTPUT_PREFIX: &str = "FCR_";

/// Replaces every character outside word characters, `-`, `_`, `.` and space
/// with `_`. Not injective: `A/1` and `A:1` both become `A_1`.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Output stem for an identifier, without extension: `FCR_<sanitized>`.
pub fn output_stem(identifier: &Identifier) -> String {
    format!("{}{}", OUTPUT_PREFIX, sanitize_identifier(identifier.as_str()))
}

/// Returns only the filename component of a path (no directory).
///
/// Safe for span fields: reveals file name without exposing the full path.
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}
