//! Free-text cleanup for candidate fields: markup stripping and length
//! bounds.

use crate::types::TEXT_MAX;

/// Remove tag-like substrings with a greedy between-angle-brackets scan.
///
/// This is intentionally not an HTML parser: anything from `<` to the next
/// `>` is dropped, and an unterminated `<` drops the remainder. Malformed
/// markup may over- or under-strip.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

/// Pick the first non-empty candidate, strip markup, trim, and bound the
/// length. Returns `None` when every candidate is absent or empty.
pub fn clean_text(candidates: &[Option<&str>]) -> Option<String> {
    let raw = candidates
        .iter()
        .flatten()
        .find(|text| !text.trim().is_empty())?;
    let stripped = strip_tags(raw);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(truncate(trimmed, TEXT_MAX))
}

/// Derive a URL slug from a category name: lowercase, spaces to dashes.
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}
