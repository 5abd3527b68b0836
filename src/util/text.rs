use std::borrow::Cow;

/// Stand-in for characters XML 1.0 cannot carry.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Returns the first non-empty string among `candidates`, or `""`.
///
/// This is the fallback rule used throughout feed construction: an empty
/// string means "not provided", so a later candidate fills in.
///
/// # Examples
///
/// ```
/// use podfeed::util::first_non_empty;
///
/// assert_eq!(first_non_empty(&["", "zh-ch"]), "zh-ch");
/// assert_eq!(first_non_empty(&["en", "zh-ch"]), "en");
/// assert_eq!(first_non_empty(&["", ""]), "");
/// ```
pub fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

/// Whether `c` matches the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replaces every character XML 1.0 forbids (C0 controls other than tab,
/// CR and LF, plus U+FFFE and U+FFFF) with U+FFFD.
///
/// Borrows when there is nothing to replace.
///
/// # Examples
///
/// ```
/// use podfeed::util::replace_invalid_xml_chars;
///
/// assert_eq!(replace_invalid_xml_chars("a\u{1}b"), "a\u{FFFD}b");
/// assert_eq!(replace_invalid_xml_chars("tab\there"), "tab\there");
/// ```
pub fn replace_invalid_xml_chars(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if is_xml_char(c) { c } else { REPLACEMENT_CHAR })
            .collect(),
    )
}
