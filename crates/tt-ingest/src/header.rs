//! Header-row detection and column-name normalization.

use tt_common::collapse_whitespace;

/// Header texts that identify the student roll-number column.
pub const IDENTIFIER_ALIASES: [&str; 4] = ["roll no", "registration number", "reg no", "roll number"];

/// Normalizes a column name: trimmed, lower-case, single spaces.
pub fn normalize_header(raw: &str) -> String {
    collapse_whitespace(raw.trim_matches('\u{feff}')).to_lowercase()
}

/// Matching key for a header: normalized, with `_` and `.` read as spaces.
///
/// `Roll_No`, `Roll No.` and `roll no` share the key `roll no`.
pub fn header_key(raw: &str) -> String {
    let spaced: String = normalize_header(raw)
        .chars()
        .map(|ch| if ch == '_' || ch == '.' { ' ' } else { ch })
        .collect();
    collapse_whitespace(&spaced)
}

/// True when `cell` equals or contains one of `aliases`, ignoring case.
pub fn matches_alias(cell: &str, aliases: &[&str]) -> bool {
    let key = header_key(cell);
    !key.is_empty() && aliases.iter().any(|alias| key.contains(alias))
}

/// True when a cell looks like the roll-number column header.
pub fn is_identifier_header(cell: &str) -> bool {
    matches_alias(cell, &IDENTIFIER_ALIASES)
}

/// Finds the header row within the first `scan_limit` rows.
///
/// A row qualifies when any of its cells satisfies `is_marker`; the first
/// qualifying row wins.
pub fn detect_header_row<F>(rows: &[Vec<String>], scan_limit: usize, is_marker: F) -> Option<usize>
where
    F: Fn(&str) -> bool,
{
    rows.iter()
        .take(scan_limit)
        .position(|row| row.iter().any(|cell| is_marker(cell)))
}

/// Normalizes a header row, naming blank headers after their position.
pub fn normalize_headers(raw: &[String]) -> Vec<String> {
    raw.iter()
        .enumerate()
        .map(|(idx, value)| {
            let normalized = normalize_header(value);
            if normalized.is_empty() {
                format!("unnamed: {idx}")
            } else {
                normalized
            }
        })
        .collect()
}
