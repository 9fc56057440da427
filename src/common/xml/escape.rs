use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::borrow::Cow;

const SPECIAL: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Built once; the pattern set never changes.
static XML_ESCAPER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(SPECIAL).expect("Failed to build XML escaper"));

/// Escape XML special characters for use in text content or attribute values.
///
/// Characters that XML 1.0 cannot represent at all (C0 controls other than
/// tab, newline and carriage return) are dropped.
///
/// # Examples
///
/// ```
/// use ooxmlgen::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hi\"</tag>"), "&lt;tag&gt;&quot;hi&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    let needs_escape = s
        .bytes()
        .any(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'') || is_forbidden(b));
    if !needs_escape {
        return Cow::Borrowed(s);
    }

    let escaped = XML_ESCAPER.replace_all(s, &ENTITIES);
    if escaped.bytes().any(is_forbidden) {
        Cow::Owned(escaped.chars().filter(|c| !is_forbidden_char(*c)).collect())
    } else {
        Cow::Owned(escaped)
    }
}

#[inline]
fn is_forbidden(b: u8) -> bool {
    b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_forbidden_char(c: char) -> bool {
    c.is_ascii() && is_forbidden(c as u8)
}
