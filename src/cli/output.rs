//! CLI output: JSON rendering and error mapping to a stable CLI surface.

use crate::error::ContentError;
use serde::Serialize;

/// Pretty-printed JSON for stdout.
pub fn render_json<T: Serialize>(value: &T) -> Result<String, ContentError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Map facade errors to a single line for stderr.
pub fn map_error(e: &ContentError) -> String {
    match e {
        ContentError::Config(_) => format!("{} (see `quill --help`)", e),
        _ => e.to_string(),
    }
}
