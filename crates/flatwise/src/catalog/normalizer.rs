/// Canonical form used when comparing towns and flat models: trimmed, single-spaced, uppercase.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_uppercase()
}

/// Flat types additionally treat `-` and `_` as word separators so "4-room" matches "4 ROOM".
pub(crate) fn normalize_flat_type(value: &str) -> String {
    normalize_label(&value.replace(['-', '_'], " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_normalization_collapses_whitespace_and_case() {
        assert_eq!(normalize_label("  ang   mo kio "), "ANG MO KIO");
        assert_eq!(normalize_label("\u{feff}Model A"), "MODEL A");
        assert_eq!(normalize_label("Model A-Maisonette"), "MODEL A-MAISONETTE");
    }

    #[test]
    fn flat_type_normalization_uses_single_separator() {
        assert_eq!(normalize_flat_type("4-room"), "4 ROOM");
        assert_eq!(normalize_flat_type("4 ROOM"), "4 ROOM");
        assert_eq!(normalize_flat_type("multi_generation"), "MULTI GENERATION");
        assert_eq!(normalize_flat_type("MULTI-GENERATION"), "MULTI GENERATION");
        assert_eq!(normalize_flat_type("executive"), "EXECUTIVE");
    }
}
