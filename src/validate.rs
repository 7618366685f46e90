//! Validators.
//!
//! The parser produces only valid links by construction, so these validators
//! are used for links built programmatically and for query arguments.

use alloc::string::String;

use crate::error::{Error, UriDefect};
use crate::link::Link;
use crate::parser::char;
use crate::parser::str::{find_byte, prefix_len};
use crate::percent_encode;

/// Parameters whose values are case-insensitive and stored lowercase.
pub(crate) const LOWERCASE_VALUE_PARAMS: [&str; 2] = ["rel", "type"];

/// Returns true if the value of the given parameter is stored lowercase.
#[inline]
#[must_use]
pub(crate) fn needs_lowercase_value(key: &str) -> bool {
    LOWERCASE_VALUE_PARAMS.contains(&key)
}

/// Returns true if the string is already lowercase.
#[inline]
#[must_use]
pub(crate) fn is_lowercase(s: &str) -> bool {
    s.chars().all(|c| c.to_lowercase().eq(Some(c)))
}

/// Lowercases the string, reusing the allocation if it is already lowercase.
#[inline]
#[must_use]
pub(crate) fn to_lowercase(s: String) -> String {
    if is_lowercase(&s) {
        s
    } else {
        s.to_lowercase()
    }
}

/// Returns true if the string has no line break.
///
/// # Examples
///
/// ```
/// use link_header::validate::is_single_line;
///
/// assert!(is_single_line("https://example.com"));
/// assert!(!is_single_line("https://example.com/\r\n"));
/// assert!(!is_single_line("https://example.com/\u{2028}"));
/// ```
#[inline]
#[must_use]
pub fn is_single_line(s: &str) -> bool {
    !s.chars().any(char::is_line_break)
}

/// Validates a URI reference (in percent-decoded form).
///
/// Only whitespace, line breaks and control characters are rejected:
/// scheme-specific syntax is not checked.
///
/// # Examples
///
/// ```
/// use link_header::validate;
///
/// assert!(validate::uri("https://example.com/").is_ok());
/// assert!(validate::uri("urn:isbn:0451450523").is_ok());
///
/// assert!(validate::uri("").is_err());
/// assert!(validate::uri("https://example.com/a b").is_err());
/// assert!(validate::uri("https://example.com/\t").is_err());
/// assert!(validate::uri("https://example.com/\0").is_err());
/// ```
pub fn uri(s: &str) -> Result<(), Error> {
    if s.is_empty() {
        return Err(Error::malformed_uri(UriDefect::Empty));
    }
    if !is_single_line(s) {
        return Err(Error::malformed_uri(UriDefect::MultiLine));
    }
    if s.chars().any(|c| c.is_whitespace()) {
        return Err(Error::malformed_uri(UriDefect::Whitespace));
    }
    if s.chars().any(|c| c.is_control()) {
        return Err(Error::malformed_uri(UriDefect::Control));
    }
    Ok(())
}

/// Validates a URI reference stored in a link.
///
/// In addition to [`uri`], the string should already be percent-decoded:
/// every `%` starts a triplet which [`decode`][`crate::percent_encode::decode`]
/// keeps as is.
///
/// # Examples
///
/// ```
/// use link_header::validate;
///
/// assert!(validate::decoded_uri("https://example.com/\u{82d7}?q=a%20b").is_ok());
///
/// assert!(validate::decoded_uri("https://example.com/a%41").is_err());
/// assert!(validate::decoded_uri("https://example.com/100%").is_err());
/// assert!(validate::decoded_uri("https://example.com/%FF").is_err());
/// ```
pub fn decoded_uri(s: &str) -> Result<(), Error> {
    uri(s)?;
    if find_byte(s, b'%').is_none() {
        return Ok(());
    }
    match percent_encode::decode(s) {
        Ok(decoded) if decoded == s => Ok(()),
        _ => Err(Error::malformed_uri(UriDefect::NotDecoded)),
    }
}

/// Validates a parameter key.
///
/// The key should match `[a-z0-9_-]+\*?`: it should be lowercase.
///
/// # Examples
///
/// ```
/// use link_header::validate;
///
/// assert!(validate::param_key("rel").is_ok());
/// assert!(validate::param_key("title*").is_ok());
/// assert!(validate::param_key("x-custom_1").is_ok());
///
/// assert!(validate::param_key("Rel").is_err());
/// assert!(validate::param_key("").is_err());
/// assert!(validate::param_key("*").is_err());
/// assert!(validate::param_key("a**").is_err());
/// assert!(validate::param_key("a b").is_err());
/// ```
pub fn param_key(key: &str) -> Result<(), Error> {
    let token_len = prefix_len(key, char::is_ascii_token);
    let is_valid = (token_len > 0)
        && matches!(&key[token_len..], "" | "*")
        && !key.bytes().any(|b| b.is_ascii_uppercase());
    if is_valid {
        Ok(())
    } else {
        Err(Error::invalid_param_key())
    }
}

/// Validates a parameter value for the given key.
///
/// Values should not contain control characters, which would break the
/// header into several lines. Values of `rel` and `type` should also be
/// lowercase.
///
/// # Examples
///
/// ```
/// use link_header::validate;
///
/// assert!(validate::param_value("rel", "preconnect").is_ok());
/// assert!(validate::param_value("title", "Hello").is_ok());
///
/// assert!(validate::param_value("rel", "Preconnect").is_err());
/// assert!(validate::param_value("type", "text/HTML").is_err());
/// assert!(validate::param_value("title", "a\r\nb").is_err());
/// ```
pub fn param_value(key: &str, value: &str) -> Result<(), Error> {
    if value.chars().any(|c| c.is_control()) {
        return Err(Error::invalid_param_value());
    }
    if needs_lowercase_value(key) && !is_lowercase(value) {
        return Err(Error::invalid_param_value());
    }
    Ok(())
}

/// Validates a whole link: the URI reference and every parameter.
///
/// # Examples
///
/// ```
/// use link_header::{validate, Link};
///
/// let link = Link::new("https://example.com").with_param("rel", "next");
/// assert!(validate::link(&link).is_ok());
///
/// let link = Link::new("https://example.com").with_param("REL", "next");
/// assert!(validate::link(&link).is_err());
/// ```
pub fn link(link: &Link) -> Result<(), Error> {
    decoded_uri(link.uri())?;
    link.params().iter().try_for_each(|(key, value)| {
        param_key(key)?;
        param_value(key, value)
    })
}
