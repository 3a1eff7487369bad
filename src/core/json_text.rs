// ProfileLookup - core/json_text.rs
//
// JSON text details that serde_json handles differently from a browser:
// how floating-point numbers are written, and lone UTF-16 surrogate escapes
// in string literals.

use std::io;

use serde_json::ser::{Formatter, PrettyFormatter};

// =============================================================================
// Numbers
// =============================================================================

/// Write `value` the way ECMAScript `Number::toString` does: shortest
/// round-trip digits, no trailing `.0` on integral values, and exponent form
/// only below `1e-6` or from `1e21` up.
pub fn js_number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        // Covers -0 as well.
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest round-trip digits as `d[.ddd]e<exp>`.
    let sci = format!("{:e}", value.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digit string.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{e_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{e_sign}{}", e.abs())
        }
    };
    format!("{sign}{body}")
}

/// Pretty formatter that indents like `PrettyFormatter` but writes floats
/// in browser form, so `5.0` prints as `5` and `1e21` as `1e+21`.
pub struct JsPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> JsPrettyFormatter<'a> {
    pub fn with_indent(indent: &'a [u8]) -> Self {
        Self {
            inner: PrettyFormatter::with_indent(indent),
        }
    }
}

impl Formatter for JsPrettyFormatter<'_> {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(js_number_text(value).as_bytes())
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

// =============================================================================
// Lone surrogates
// =============================================================================

fn parse_hex4(s: &str) -> Option<u16> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
        u16::from_str_radix(s, 16).ok()
    } else {
        None
    }
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Replace `\uXXXX` escapes of unpaired UTF-16 surrogates with `\ufffd`.
///
/// Browsers accept such escapes; Rust strings cannot hold them, so
/// serde_json rejects the whole document. Returns `None` when the text has
/// nothing to replace.
pub fn replace_lone_surrogates(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut replaced = false;
    let mut rest = text;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let unit = rest
            .strip_prefix("\\u")
            .and_then(|r| r.get(..4))
            .and_then(parse_hex4);

        match unit {
            Some(high) if is_high_surrogate(high) => {
                let low = rest
                    .get(6..)
                    .and_then(|r| r.strip_prefix("\\u"))
                    .and_then(|r| r.get(..4))
                    .and_then(parse_hex4);
                if low.is_some_and(is_low_surrogate) {
                    out.push_str(&rest[..12]);
                    rest = &rest[12..];
                } else {
                    out.push_str("\\ufffd");
                    rest = &rest[6..];
                    replaced = true;
                }
            }
            Some(low) if is_low_surrogate(low) => {
                out.push_str("\\ufffd");
                rest = &rest[6..];
                replaced = true;
            }
            _ => {
                // Any other escape: copy the backslash and the escaped
                // character so `\\` never starts a new escape.
                let mut chars = rest.chars();
                chars.next();
                let next_len = chars.next().map_or(0, char::len_utf8);
                out.push_str(&rest[..1 + next_len]);
                rest = &rest[1 + next_len..];
            }
        }
    }
    out.push_str(rest);

    replaced.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_drop_the_fraction() {
        assert_eq!(js_number_text(5.0), "5");
        assert_eq!(js_number_text(100.0), "100");
        assert_eq!(js_number_text(-42.0), "-42");
        assert_eq!(js_number_text(-0.0), "0");
        assert_eq!(js_number_text(1e20), "100000000000000000000");
    }

    #[test]
    fn fractions_keep_shortest_digits() {
        assert_eq!(js_number_text(0.1), "0.1");
        assert_eq!(js_number_text(2.5), "2.5");
        assert_eq!(js_number_text(123.456), "123.456");
        assert_eq!(js_number_text(0.000001), "0.000001");
    }

    #[test]
    fn exponent_form_at_the_browser_thresholds() {
        assert_eq!(js_number_text(1e21), "1e+21");
        assert_eq!(js_number_text(1.5e21), "1.5e+21");
        assert_eq!(js_number_text(1e-7), "1e-7");
        assert_eq!(js_number_text(-2.5e-7), "-2.5e-7");
    }

    #[test]
    fn formatter_writes_browser_numbers_with_four_space_indent() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"a": [1.0, 2.5], "b": 3}"#).unwrap();
        let mut buf = Vec::new();
        let formatter = JsPrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(&value, &mut ser).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\n    \"a\": [\n        1,\n        2.5\n    ],\n    \"b\": 3\n}"
        );
    }

    #[test]
    fn lone_surrogates_become_replacement_characters() {
        assert_eq!(
            replace_lone_surrogates(r#"{"a":"x\ud83d","b":"\uDC00y"}"#).as_deref(),
            Some(r#"{"a":"x\ufffd","b":"\ufffdy"}"#)
        );
    }

    #[test]
    fn paired_surrogates_and_escaped_backslashes_are_untouched() {
        assert_eq!(replace_lone_surrogates(r#"{"a":"\ud83d\ude00"}"#), None);
        assert_eq!(replace_lone_surrogates(r#"{"a":"\\ud83d"}"#), None);
        assert_eq!(replace_lone_surrogates(r#"{"a":"\u00e9 \n \u00e9"}"#), None);
    }

    #[test]
    fn high_surrogate_followed_by_non_surrogate_escape() {
        assert_eq!(
            replace_lone_surrogates(r#""\ud83dA""#).as_deref(),
            Some(r#""\ufffdA""#)
        );
    }
}
