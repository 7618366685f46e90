//! Percent encoding and decoding of URI references.
//!
//! URI references are stored percent-decoded and encoded again on
//! serialization. Both directions use the same character classes, so
//! decoding and then encoding a URI reference gives back the original
//! triplets:
//!
//! * Triplets which decode to a reserved character (RFC 3986 `gen-delims`
//!   and `sub-delims`), `%`, whitespace, or a control character are never
//!   decoded, and existing triplets are never encoded twice.
//! * Any other character which is neither reserved nor unreserved is
//!   encoded as UTF-8 octets on serialization.

use core::fmt::{self, Write as _};

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, UriDefect};
use crate::parser::char;
use crate::parser::str::find_byte;

/// A proxy to percent-encode a percent-decoded URI reference.
///
/// # Examples
///
/// ```
/// use link_header::percent_encode::PercentEncodedUri;
///
/// let raw = "https://example.com/\u{82d7}\u{6761}?q=a b";
/// assert_eq!(
///     PercentEncodedUri::new(raw).to_string(),
///     "https://example.com/%E8%8B%97%E6%9D%A1?q=a%20b"
/// );
///
/// // Existing triplets are kept as is.
/// assert_eq!(
///     PercentEncodedUri::new("/a%2Fb/100%").to_string(),
///     "/a%2Fb/100%25"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PercentEncodedUri<'a> {
    /// Raw string before being encoded.
    raw: &'a str,
}

impl<'a> PercentEncodedUri<'a> {
    /// Creates a new proxy.
    #[inline]
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }
}

impl fmt::Display for PercentEncodedUri<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.raw.as_bytes();
        for (i, c) in self.raw.char_indices() {
            let is_valid_char = match c {
                '%' => starts_with_triplet(&bytes[i..]),
                c if c.is_ascii() => {
                    char::is_ascii_unreserved(c as u8) || char::is_ascii_reserved(c as u8)
                }
                _ => false,
            };
            if is_valid_char {
                f.write_char(c)?;
            } else {
                write_pct_encoded_char(f, c)?;
            }
        }
        Ok(())
    }
}

/// Percent-encodes the given character and writes it.
#[inline]
fn write_pct_encoded_char<W: fmt::Write>(writer: &mut W, c: char) -> fmt::Result {
    let mut buf = [0_u8; 4];
    let buf = c.encode_utf8(&mut buf);
    buf.bytes().try_for_each(|b| write!(writer, "%{:02X}", b))
}

/// Returns true if the bytes start with a percent-encoding triplet.
#[inline]
#[must_use]
fn starts_with_triplet(bytes: &[u8]) -> bool {
    decode_triplet(bytes).is_some()
}

/// Decodes the leading percent-encoding triplet.
#[inline]
#[must_use]
fn decode_triplet(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [b'%', upper, lower, ..] => {
            Some((char::hexdigit_value(*upper)? << 4) | char::hexdigit_value(*lower)?)
        }
        _ => None,
    }
}

/// Returns true if the decoded ASCII byte must stay percent-encoded.
#[inline]
#[must_use]
fn keeps_ascii_encoded(b: u8) -> bool {
    char::is_ascii_reserved(b) || b == b'%' || b <= b' ' || b == 0x7f
}

/// Returns the length of the UTF-8 sequence starting with the given byte.
#[inline]
#[must_use]
fn utf8_seq_len(first: u8) -> Option<usize> {
    match first {
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

/// Percent-decodes a URI reference.
///
/// Returns the input as is if it contains no `%`.
///
/// # Failures
///
/// Fails with [`ErrorKind::MalformedUri`][`crate::ErrorKind::MalformedUri`]
/// if a `%` is not followed by two hexadecimal digits, or the decoded octets
/// are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use link_header::percent_encode::decode;
///
/// assert_eq!(
///     decode("https://example.com/%E8%8B%97%E6%9D%A1")?,
///     "https://example.com/\u{82d7}\u{6761}"
/// );
/// // Reserved characters and whitespace stay encoded.
/// assert_eq!(decode("/a%2Fb%20c%41")?, "/a%2Fb%20cA");
///
/// assert!(decode("/100%").is_err());
/// assert!(decode("/%FF").is_err());
/// # Ok::<_, link_header::Error>(())
/// ```
pub fn decode(s: &str) -> Result<Cow<'_, str>, Error> {
    if find_byte(s, b'%').is_none() {
        return Ok(Cow::Borrowed(s));
    }
    let malformed = || Error::malformed_uri(UriDefect::PercentEncoding);

    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        let first = decode_triplet(&bytes[i..]).ok_or_else(malformed)?;
        if first.is_ascii() {
            if keeps_ascii_encoded(first) {
                decoded.extend_from_slice(&bytes[i..(i + 3)]);
            } else {
                decoded.push(first);
            }
            i += 3;
            continue;
        }

        // Collect the rest of the multi-byte sequence.
        let len = utf8_seq_len(first).ok_or_else(malformed)?;
        let mut buf = [first, 0, 0, 0];
        for (n, dest) in buf[1..len].iter_mut().enumerate() {
            let byte = bytes
                .get((i + 3 * (n + 1))..)
                .and_then(decode_triplet)
                .ok_or_else(malformed)?;
            if !char::is_utf8_byte_continue(byte) {
                return Err(malformed());
            }
            *dest = byte;
        }
        let c = core::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(malformed)?;
        let end = i + 3 * len;
        if c.is_whitespace() || c.is_control() {
            decoded.extend_from_slice(&bytes[i..end]);
        } else {
            decoded.extend_from_slice(&buf[..len]);
        }
        i = end;
    }

    // Only whole characters are copied or decoded, so this never fails.
    String::from_utf8(decoded)
        .map(Cow::Owned)
        .map_err(|_| malformed())
}
