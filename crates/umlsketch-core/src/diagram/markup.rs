//! Markup normalization for generated diagrams.

use umlsketch_types::diagram::{END_MARKER, START_MARKER};

/// Trim surrounding whitespace and make sure the markup is wrapped in
/// `@startuml` / `@enduml`.
///
/// A missing start marker is prepended on its own line, a missing end marker
/// appended on its own line. Markup that already has both is returned trimmed
/// and otherwise unchanged.
pub fn normalize_markup(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut code = String::with_capacity(trimmed.len() + START_MARKER.len() + END_MARKER.len() + 2);

    if !trimmed.starts_with(START_MARKER) {
        code.push_str(START_MARKER);
        code.push('\n');
    }
    code.push_str(trimmed);
    if !trimmed.ends_with(END_MARKER) {
        code.push('\n');
        code.push_str(END_MARKER);
    }

    code
}
