//! Header name validation
//!
//! Decides whether the left-hand side of a `key: value` line is an HTTP
//! header name or just body text that happens to contain a colon.

/// Returns true if `name` looks like a header name.
///
/// The first character must be an ASCII letter; the rest may be letters,
/// digits, `-` or `_`. Whitespace, quotes and anything outside printable
/// ASCII are rejected.
pub fn is_valid_header_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    // The allowed set is a subset of printable ASCII, so whitespace, quotes
    // and non-ASCII fall out here.
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_names() {
        assert!(is_valid_header_name("Content-Type"));
        assert!(is_valid_header_name("X_Custom-9"));
        assert!(is_valid_header_name("A"));
    }

    #[test]
    fn test_rejects_malformed_names() {
        assert!(!is_valid_header_name(""));
        assert!(!is_valid_header_name("1abc"));
        assert!(!is_valid_header_name("a b"));
        assert!(!is_valid_header_name("a\"b"));
        assert!(!is_valid_header_name("'quoted'"));
        assert!(!is_valid_header_name("tab\there"));
        assert!(!is_valid_header_name("-leading"));
        assert!(!is_valid_header_name("caf\u{e9}"));
        assert!(!is_valid_header_name("{\"u\""));
    }
}
