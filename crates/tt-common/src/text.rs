//! Cell text normalization.

/// Trims a raw cell and strips a stray byte-order mark.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// Spreadsheets store roll numbers as floats; `1023.0` must read as `1023`.
///
/// # Examples
///
/// ```
/// use tt_common::format_numeric;
///
/// assert_eq!(format_numeric(1023.0), "1023");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_padding() {
        assert_eq!(normalize_cell("\u{feff} Roll No "), "Roll No");
        assert_eq!(normalize_cell("   "), "");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(collapse_whitespace("  Roll   No\t"), "Roll No");
    }

    #[test]
    fn keeps_integers_intact() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-2.50), "-2.5");
    }
}
