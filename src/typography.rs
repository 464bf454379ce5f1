//! Plain-text cleanup applied to titles and descriptions.
//!
//! Two passes, in order: HTML-entity decoding (authors paste text containing
//! `&amp;` and friends), then typographic correction — straight quotes become
//! curly, dash runs become en/em dashes, `...` becomes an ellipsis. Markdown
//! bodies don't come through here; the Markdown renderer applies the same
//! corrections via its smart-punctuation option.

use std::borrow::Cow;

/// Named entities worth handling for hand-authored metadata. Numeric
/// references are decoded separately.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("hellip", "\u{2026}"),
    ("rsquo", "\u{2019}"),
    ("lsquo", "\u{2018}"),
    ("rdquo", "\u{201d}"),
    ("ldquo", "\u{201c}"),
];

/// Decode HTML entity references in `text`.
///
/// Returns borrowed input when no `&` is present (the common case).
/// Unrecognized or unterminated references are left as-is rather than
/// erroring — this is cleanup, not validation.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_entity(tail) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode one entity reference at the start of `s` (which begins with `&`).
/// Returns the replacement text and the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(String, usize)> {
    let semi = s[1..].find(';')? + 1;
    let name = &s[1..semi];
    // Entity names are short; a long gap means a bare ampersand.
    if name.is_empty() || name.len() > 8 {
        return None;
    }

    if let Some(digits) = name.strip_prefix('#') {
        let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            digits.parse().ok()?
        };
        let c = char::from_u32(code)?;
        return Some((c.to_string(), semi + 1));
    }

    NAMED_ENTITIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, repl)| (repl.to_string(), semi + 1))
}

/// Apply typographic corrections to plain text.
///
/// Quote direction follows the preceding character: an opening quote after
/// whitespace or an opening bracket, a closing quote otherwise (which also
/// covers apostrophes).
pub fn smarten(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        match c {
            '\'' => out.push(if opens_quote(prev) { '\u{2018}' } else { '\u{2019}' }),
            '"' => out.push(if opens_quote(prev) { '\u{201c}' } else { '\u{201d}' }),
            '-' if chars.get(i + 1) == Some(&'-') => {
                if chars.get(i + 2) == Some(&'-') {
                    out.push('\u{2014}');
                    i += 3;
                    continue;
                }
                out.push('\u{2013}');
                i += 2;
                continue;
            }
            '.' if chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') => {
                out.push('\u{2026}');
                i += 3;
                continue;
            }
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

fn opens_quote(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '{' | '\u{2014}' | '\u{2013}'),
    }
}

/// The full cleanup pipeline for a metadata text field.
pub fn clean(text: &str) -> String {
    smarten(&unescape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_named_entities() {
        assert_eq!(unescape("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(unescape("a &lt; b &gt; c"), "a < b > c");
    }

    #[test]
    fn unescape_numeric_entities() {
        assert_eq!(unescape("&#65;&#x42;"), "AB");
    }

    #[test]
    fn unescape_borrows_when_clean() {
        assert!(matches!(unescape("no entities here"), Cow::Borrowed(_)));
    }

    #[test]
    fn unescape_leaves_bare_ampersand() {
        assert_eq!(unescape("fish & chips"), "fish & chips");
        assert_eq!(unescape("trailing &"), "trailing &");
    }

    #[test]
    fn unescape_ignores_unknown_entity() {
        assert_eq!(unescape("&bogus;"), "&bogus;");
    }

    #[test]
    fn smarten_quotes() {
        assert_eq!(smarten("\"hello\""), "\u{201c}hello\u{201d}");
        assert_eq!(smarten("it's"), "it\u{2019}s");
        assert_eq!(smarten("'quoted'"), "\u{2018}quoted\u{2019}");
    }

    #[test]
    fn smarten_dashes_and_ellipsis() {
        assert_eq!(smarten("a -- b"), "a \u{2013} b");
        assert_eq!(smarten("a --- b"), "a \u{2014} b");
        assert_eq!(smarten("wait..."), "wait\u{2026}");
    }

    #[test]
    fn clean_runs_both_passes() {
        assert_eq!(clean("&quot;ok&quot;"), "\u{201c}ok\u{201d}");
    }
}
