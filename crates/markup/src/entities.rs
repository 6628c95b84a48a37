//! Character references and escaping.
//!
//! Decoding contract:
//! - The five predefined XML references are decoded: `&amp;`, `&lt;`, `&gt;`,
//!   `&quot;`, `&apos;`.
//! - Numeric references decode only when well-formed and semicolon-terminated:
//!   `&#123;` (decimal) and `&#x1F4A9;` (hex), and only to valid scalar values.
//! - Anything else (unknown names, missing semicolons, overlong digit runs) is
//!   left untouched. Entity declarations are never interpreted.

use memchr::memchr;
use std::fmt;

const NAMED: [(&[u8], char); 5] = [
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    while let Some(rel) = memchr(b'&', &bytes[i..]) {
        i += rel;
        out.push_str(&s[copy_start..i]);

        if let Some((pat, ch)) = NAMED.iter().find(|(pat, _)| bytes[i..].starts_with(pat)) {
            out.push(*ch);
            i += pat.len();
            copy_start = i;
            continue;
        }

        let numeric = if bytes[i..].starts_with(b"&#x") || bytes[i..].starts_with(b"&#X") {
            Some((i + 3, MAX_HEX_DIGITS, 16))
        } else if bytes[i..].starts_with(b"&#") {
            Some((i + 2, MAX_DEC_DIGITS, 10))
        } else {
            None
        };

        if let Some((digits_start, max_digits, radix)) = numeric
            && let Some(end) = scan_numeric(bytes, digits_start, max_digits, radix)
        {
            let decoded = u32::from_str_radix(&s[digits_start..end], radix)
                .ok()
                .and_then(char::from_u32);
            match decoded {
                Some(ch) => out.push(ch),
                None => out.push_str(&s[i..=end]),
            }
            i = end + 1;
            copy_start = i;
            continue;
        }

        out.push('&');
        i += 1;
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}

// Bounded scan so adversarial digit runs stay linear.
fn scan_numeric(bytes: &[u8], start: usize, max_digits: usize, radix: u32) -> Option<usize> {
    let mut j = start;
    while j < bytes.len() {
        let b = bytes[j];
        if b == b';' {
            return (j > start).then_some(j);
        }
        if j - start == max_digits || !(b as char).is_digit(radix) {
            return None;
        }
        j += 1;
    }
    None
}

/// Escape character data for element content.
pub fn escape_text<W: fmt::Write + ?Sized>(text: &str, out: &mut W) -> fmt::Result {
    escape_with(text, out, |b| match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attribute<W: fmt::Write + ?Sized>(value: &str, out: &mut W) -> fmt::Result {
    escape_with(value, out, |b| match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'"' => Some("&quot;"),
        b'\n' => Some("&#10;"),
        b'\t' => Some("&#9;"),
        b'\r' => Some("&#13;"),
        _ => None,
    })
}

// Replacements are keyed on ASCII bytes, so every cut is a char boundary.
fn escape_with<W: fmt::Write + ?Sized>(
    s: &str,
    out: &mut W,
    replacement: impl Fn(u8) -> Option<&'static str>,
) -> fmt::Result {
    let mut copy_start = 0;
    for (i, b) in s.bytes().enumerate() {
        if let Some(rep) = replacement(b) {
            out.write_str(&s[copy_start..i])?;
            out.write_str(rep)?;
            copy_start = i + 1;
        }
    }
    out.write_str(&s[copy_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped_text(s: &str) -> String {
        let mut out = String::new();
        escape_text(s, &mut out).unwrap();
        out
    }

    fn escaped_attr(s: &str) -> String {
        let mut out = String::new();
        escape_attribute(s, &mut out).unwrap();
        out
    }

    #[test]
    fn decode_entities_preserves_utf8() {
        assert_eq!(decode_entities("120×32"), "120×32");
        assert_eq!(decode_entities("π &amp; σ"), "π & σ");
    }

    #[test]
    fn decode_entities_decodes_predefined_references() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("&apos;x&apos;"), "'x'");
    }

    #[test]
    fn decode_entities_leaves_html_only_names_alone() {
        assert_eq!(decode_entities("a&nbsp;b"), "a&nbsp;b");
        assert_eq!(decode_entities("&copy;"), "&copy;");
    }

    #[test]
    fn decode_entities_decodes_numeric_references() {
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#1114111;"), "\u{10FFFF}");
        assert_eq!(decode_entities("&#x10FFFF;"), "\u{10FFFF}");
    }

    #[test]
    fn decode_entities_passes_through_malformed_references() {
        for s in [
            "&amp",
            "loose &amp space",
            "&#xD7 ",
            "&#xZZ;",
            "&#99999999;",
            "&#xD800;",
            "&#x110000;",
            "&#-1;",
            "&#;",
            "&#x;",
            "&",
            "&&",
        ] {
            assert_eq!(decode_entities(s), s, "input {s:?}");
        }
    }

    #[test]
    fn malformed_reference_allows_following_reference() {
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
    }

    #[test]
    fn escaping_round_trips_through_decoding() {
        let raw = "a < b && c > \"d\"";
        assert_eq!(decode_entities(&escaped_text(raw)), raw);
        assert_eq!(decode_entities(&escaped_attr(raw)), raw);
        assert_eq!(escaped_attr("x\ny"), "x&#10;y");
    }
}
