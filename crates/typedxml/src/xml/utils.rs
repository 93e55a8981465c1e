//! Small helpers shared by the two converters.

/// Strips characters that are not valid in an attribute name, keeping
/// ASCII alphanumerics and underscores. May return an empty string.
pub fn sanitize_attribute_name(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Whether a string is usable as an XML element name.
///
/// Deliberately stricter than the XML spec: ASCII name characters only,
/// no leading digit, no colon (prefixes are modeled separately).
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Whether text content is entirely XML whitespace.
pub fn is_whitespace(text: &str) -> bool {
    text.bytes().all(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t'))
}
