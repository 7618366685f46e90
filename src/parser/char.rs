//! Helpers for characters.

/// Checks if the given byte is an optional whitespace (`OWS`) character.
///
/// Only space, horizontal tab, CR, and LF are treated as whitespace between
/// tokens of the header.
#[inline]
#[must_use]
pub(crate) fn is_ows(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Checks if the given byte can appear in a parameter key (`[\w-]`).
///
/// The optional trailing `*` is not included.
#[inline]
#[must_use]
pub(crate) fn is_ascii_token(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Checks if the given byte terminates an unquoted parameter value.
#[inline]
#[must_use]
pub(crate) fn is_value_delim(b: u8) -> bool {
    is_ows(b) || b == b';' || b == b','
}

/// Checks if the given character matches `gen-delim` rule of RFC 3986.
#[inline]
#[must_use]
pub(crate) fn is_ascii_gen_delim(b: u8) -> bool {
    matches!(b, b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@')
}

/// Checks if the given character matches `sub-delim` rule of RFC 3986.
#[inline]
#[must_use]
pub(crate) fn is_ascii_sub_delim(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

/// Checks if the given character matches `reserved` rule of RFC 3986.
#[inline]
#[must_use]
pub(crate) fn is_ascii_reserved(b: u8) -> bool {
    is_ascii_gen_delim(b) || is_ascii_sub_delim(b)
}

/// Checks if the given character matches `unreserved` rule of RFC 3986.
#[inline]
#[must_use]
pub(crate) fn is_ascii_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Checks if the given character is a line break.
#[inline]
#[must_use]
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Checks if the given character is noise removed before parsing.
///
/// Byte order marks and no-break spaces are zero-width noise, not whitespace.
#[inline]
#[must_use]
pub(crate) fn is_ignorable(c: char) -> bool {
    matches!(c, '\u{FEFF}' | '\u{A0}')
}

/// Returns the value of the given hexadecimal digit.
#[inline]
#[must_use]
pub(crate) fn hexdigit_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Checks if the given byte is a continue byte of UTF-8.
#[inline]
#[must_use]
pub(crate) fn is_utf8_byte_continue(byte: u8) -> bool {
    (byte & 0xc0) == 0x80
}
