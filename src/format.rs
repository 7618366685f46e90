//! Serialization into the `Link` header syntax.

use core::fmt::{self, Write as _};

use crate::link::Link;
use crate::parser::str::find_byte2;
use crate::percent_encode::PercentEncodedUri;

/// A proxy to serialize links into a `Link` header value.
///
/// Links are joined with `", "`, and parameters of a link with `"; "`.
/// Parameters with empty values are written as bare keys, and other values
/// are always quoted.
///
/// No validation is done: use [`LinkHeader`][`crate::LinkHeader`] to
/// serialize only valid links.
///
/// # Examples
///
/// ```
/// use link_header::format::Stringified;
/// use link_header::Link;
///
/// let links = [
///     Link::new("https://one.example").with_param("rel", "preconnect"),
///     Link::new("https://two.example").with_param("noopener", ""),
/// ];
/// assert_eq!(
///     Stringified::new(&links).to_string(),
///     r#"<https://one.example>; rel="preconnect", <https://two.example>; noopener"#
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stringified<'a> {
    /// Links to serialize.
    links: &'a [Link],
}

impl<'a> Stringified<'a> {
    /// Creates a new proxy.
    #[inline]
    #[must_use]
    pub fn new(links: &'a [Link]) -> Self {
        Self { links }
    }
}

impl fmt::Display for Stringified<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write_link(f, link)?;
        }
        Ok(())
    }
}

/// Writes a link.
pub(crate) fn write_link(f: &mut fmt::Formatter<'_>, link: &Link) -> fmt::Result {
    write!(f, "<{}>", PercentEncodedUri::new(link.uri()))?;
    for (key, value) in link.params() {
        if value.is_empty() {
            write!(f, "; {}", key)?;
        } else {
            write!(f, "; {}={}", key, Quoted(value))?;
        }
    }
    Ok(())
}

/// A proxy to write a quoted string.
///
/// `"` and `\` are escaped with a backslash.
#[derive(Debug, Clone, Copy)]
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        let mut rest = self.0;
        while let Some(pos) = find_byte2(rest, b'"', b'\\') {
            f.write_str(&rest[..pos])?;
            f.write_char('\\')?;
            f.write_str(&rest[pos..(pos + 1)])?;
            rest = &rest[(pos + 1)..];
        }
        f.write_str(rest)?;
        f.write_char('"')
    }
}
