//! Text canonicalization used when comparing a model split against its source saying.
//!
//! Normalized text is only ever compared, never persisted.

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove commas and periods, collapse whitespace, trim and lower-case.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !matches!(c, ',' | '.')).collect();
    collapse_whitespace(&stripped).to_lowercase()
}
