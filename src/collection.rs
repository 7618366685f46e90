//! Ordered collection of links.

use core::convert::TryFrom;
use core::fmt;
use core::slice;
use core::str::FromStr;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Error;
use crate::format::Stringified;
use crate::link::Link;
use crate::parser;
use crate::validate;

/// Header name looked up in [`HeaderSource`]s.
pub const LINK: &str = "Link";

/// A type that can look up HTTP header values by name.
///
/// Only the `Link` header is looked up by this crate.
pub trait HeaderSource {
    /// Returns the value of the header, or `None` if absent.
    ///
    /// Implementations should match header names ASCII case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;
}

/// A type that has HTTP headers, such as an HTTP response.
pub trait ResponseSource {
    /// Returns the headers.
    fn headers(&self) -> &dyn HeaderSource;
}

/// Returns the value of the first pair with the given name.
fn find_header<'a, K, V, I>(pairs: I, name: &str) -> Option<&'a str>
where
    K: AsRef<str> + 'a,
    V: AsRef<str> + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    pairs
        .into_iter()
        .find(|(k, _)| k.as_ref().eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_ref())
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for [(K, V)] {
    fn header(&self, name: &str) -> Option<&str> {
        find_header(self.iter().map(|(k, v)| (k, v)), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> HeaderSource for [(K, V); N] {
    #[inline]
    fn header(&self, name: &str) -> Option<&str> {
        self[..].header(name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for Vec<(K, V)> {
    #[inline]
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for BTreeMap<K, V> {
    fn header(&self, name: &str) -> Option<&str> {
        find_header(self.iter(), name)
    }
}

/// Input accepted by [`LinkHeader::add`].
///
/// Strings, collections, and link slices convert into this with `From`.
/// Header sources are wrapped explicitly with [`Input::headers`] and
/// [`Input::response`].
#[derive(Clone, Copy)]
pub enum Input<'a> {
    /// Raw `Link` header value.
    Str(&'a str),
    /// Headers containing an optional `Link` header.
    Headers(&'a dyn HeaderSource),
    /// A response with headers containing an optional `Link` header.
    Response(&'a dyn ResponseSource),
    /// Another collection.
    Collection(&'a LinkHeader),
    /// Links built programmatically.
    Links(&'a [Link]),
}

impl<'a> Input<'a> {
    /// Creates an input from headers.
    #[inline]
    #[must_use]
    pub fn headers<H: HeaderSource>(headers: &'a H) -> Self {
        Self::Headers(headers)
    }

    /// Creates an input from a response.
    #[inline]
    #[must_use]
    pub fn response<R: ResponseSource>(response: &'a R) -> Self {
        Self::Response(response)
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Headers(h) => f.debug_tuple("Headers").field(&h.header(LINK)).finish(),
            Self::Response(r) => f
                .debug_tuple("Response")
                .field(&r.headers().header(LINK))
                .finish(),
            Self::Collection(c) => f.debug_tuple("Collection").field(c).finish(),
            Self::Links(links) => f.debug_tuple("Links").field(links).finish(),
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    #[inline]
    fn from(s: &'a String) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a LinkHeader> for Input<'a> {
    #[inline]
    fn from(c: &'a LinkHeader) -> Self {
        Self::Collection(c)
    }
}

impl<'a> From<&'a [Link]> for Input<'a> {
    #[inline]
    fn from(links: &'a [Link]) -> Self {
        Self::Links(links)
    }
}

impl<'a, const N: usize> From<&'a [Link; N]> for Input<'a> {
    #[inline]
    fn from(links: &'a [Link; N]) -> Self {
        Self::Links(links)
    }
}

impl<'a> From<&'a Vec<Link>> for Input<'a> {
    #[inline]
    fn from(links: &'a Vec<Link>) -> Self {
        Self::Links(links)
    }
}

/// An ordered collection of links, i.e. the value of the `Link` header.
///
/// Links keep the order they are added in. Duplicates are kept.
///
/// The collection never hands out mutable access to its links: methods
/// returning owned links return copies.
///
/// # Examples
///
/// ```
/// use link_header::LinkHeader;
///
/// let header = LinkHeader::parse(
///     r#"<https://one.example.com>; rel="preconnect", <https://two.example.com>; rel="preconnect", <https://three.example.com>; rel="preconnect""#,
/// )?;
///
/// let preconnect = header.get_by_rel("preconnect")?;
/// let uris: Vec<_> = preconnect.iter().map(|link| link.uri()).collect();
/// assert_eq!(
///     uris,
///     ["https://one.example.com", "https://two.example.com", "https://three.example.com"]
/// );
/// assert!(!header.has_parameter("rel", "connect")?);
/// # Ok::<_, link_header::Error>(())
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LinkHeader {
    /// Links.
    links: Vec<Link>,
}

impl LinkHeader {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_header::{Input, LinkHeader};
    ///
    /// let header = LinkHeader::parse("<https://example.com>; rel=preconnect")?;
    /// assert_eq!(header.len(), 1);
    ///
    /// let headers = vec![("content-type", "text/html"), ("link", "<https://example.com>")];
    /// let header = LinkHeader::parse(Input::headers(&headers))?;
    /// assert_eq!(header.len(), 1);
    /// # Ok::<_, link_header::Error>(())
    /// ```
    pub fn parse<'a, T: Into<Input<'a>>>(input: T) -> Result<Self, Error> {
        let mut header = Self::new();
        header.add(input)?;
        Ok(header)
    }

    /// Creates a collection from the inputs, in order.
    pub fn parse_all<'a, I, T>(inputs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Input<'a>>,
    {
        let mut header = Self::new();
        header.add_all(inputs)?;
        Ok(header)
    }

    /// Builds a collection from the inputs and serializes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_header::{Link, LinkHeader};
    ///
    /// let links = [Link::new("https://one.example.com").with_param("rel", "preconnect")];
    /// assert_eq!(
    ///     LinkHeader::stringify([&links])?,
    ///     r#"<https://one.example.com>; rel="preconnect""#
    /// );
    /// # Ok::<_, link_header::Error>(())
    /// ```
    pub fn stringify<'a, I, T>(inputs: I) -> Result<String, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Input<'a>>,
    {
        use alloc::string::ToString;

        Self::parse_all(inputs).map(|header| header.to_string())
    }

    /// Adds links from the input.
    ///
    /// The input is added as a whole or not at all: if it fails to parse or
    /// validate, the collection is left unchanged.
    ///
    /// Strings and headers are parsed as `Link` header values. An absent
    /// `Link` header is treated as an empty value. Links given directly are
    /// validated, and fail if a parameter key or a `rel`/`type` value is not
    /// lowercase.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_header::{Link, LinkHeader};
    ///
    /// let mut header = LinkHeader::new();
    /// header
    ///     .add("<https://one.example>; rel=next")?
    ///     .add(&[Link::new("https://two.example").with_param("rel", "prev")])?;
    /// assert_eq!(
    ///     header.to_string(),
    ///     r#"<https://one.example>; rel="next", <https://two.example>; rel="prev""#
    /// );
    ///
    /// assert!(header.add("<https://three.example>; rel=next, oops").is_err());
    /// assert_eq!(header.len(), 2);
    /// # Ok::<_, link_header::Error>(())
    /// ```
    pub fn add<'a, T: Into<Input<'a>>>(&mut self, input: T) -> Result<&mut Self, Error> {
        let links = match input.into() {
            Input::Str(s) => parse_links(s)?,
            Input::Headers(headers) => parse_links(headers.header(LINK).unwrap_or(""))?,
            Input::Response(response) => {
                parse_links(response.headers().header(LINK).unwrap_or(""))?
            }
            Input::Collection(other) => other.links.clone(),
            Input::Links(links) => {
                links.iter().try_for_each(validate::link)?;
                links.to_vec()
            }
        };
        self.links.extend(links);
        Ok(self)
    }

    /// Adds links from the inputs, in order.
    ///
    /// Stops at the first input that fails. Inputs before it stay added.
    pub fn add_all<'a, I, T>(&mut self, inputs: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Input<'a>>,
    {
        for input in inputs {
            self.add(input)?;
        }
        Ok(self)
    }

    /// Returns a copy of all links.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> Vec<Link> {
        self.links.clone()
    }

    /// Returns an iterator of the links.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Link> {
        self.links.iter()
    }

    /// Returns the number of links.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if there are no links.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns copies of the links having the given parameter value.
    ///
    /// Values are compared case-sensitively, except for `rel` (see
    /// [`get_by_rel`][`Self::get_by_rel`]).
    ///
    /// # Failures
    ///
    /// Fails if the key is not lowercase.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_header::LinkHeader;
    ///
    /// let header = LinkHeader::parse(
    ///     r#"<https://a.example>; title="A", <https://b.example>; title="a""#,
    /// )?;
    /// let found = header.get_by_parameter("title", "A")?;
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].uri(), "https://a.example");
    ///
    /// assert!(header.get_by_parameter("Title", "A").is_err());
    /// # Ok::<_, link_header::Error>(())
    /// ```
    pub fn get_by_parameter(&self, key: &str, value: &str) -> Result<Vec<Link>, Error> {
        if !validate::is_lowercase(key) {
            return Err(Error::invalid_param_key());
        }
        if key == "rel" {
            return self.get_by_rel(value);
        }
        Ok(self.filter(|link| link.param(key) == Some(value)))
    }

    /// Returns copies of the links having the given `rel` value.
    ///
    /// The `rel` value of each link is compared case-insensitively.
    ///
    /// # Failures
    ///
    /// Fails if the value is not lowercase.
    pub fn get_by_rel(&self, value: &str) -> Result<Vec<Link>, Error> {
        if !validate::is_lowercase(value) {
            return Err(Error::invalid_param_value());
        }
        Ok(self.filter(|link| match link.rel() {
            Some(rel) if validate::is_lowercase(rel) => rel == value,
            Some(rel) => rel.to_lowercase() == value,
            None => false,
        }))
    }

    /// Returns true if any link has the given parameter value.
    ///
    /// # Failures
    ///
    /// Fails in the same cases as [`get_by_parameter`][`Self::get_by_parameter`].
    pub fn has_parameter(&self, key: &str, value: &str) -> Result<bool, Error> {
        self.get_by_parameter(key, value)
            .map(|links| !links.is_empty())
    }

    /// Returns copies of the links satisfying the predicate.
    fn filter<F: FnMut(&Link) -> bool>(&self, mut pred: F) -> Vec<Link> {
        self.links.iter().filter(|link| pred(link)).cloned().collect()
    }

    /// Returns the links.
    #[inline]
    #[must_use]
    pub fn into_entries(self) -> Vec<Link> {
        self.links
    }
}

/// Parses all links in the header value, or returns the first error.
fn parse_links(s: &str) -> Result<Vec<Link>, Error> {
    parser::parse(s).collect()
}

impl fmt::Display for LinkHeader {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Stringified::new(&self.links).fmt(f)
    }
}

impl FromStr for LinkHeader {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for LinkHeader {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&[Link]> for LinkHeader {
    type Error = Error;

    #[inline]
    fn try_from(links: &[Link]) -> Result<Self, Self::Error> {
        Self::parse(links)
    }
}

impl TryFrom<Vec<Link>> for LinkHeader {
    type Error = Error;

    fn try_from(links: Vec<Link>) -> Result<Self, Self::Error> {
        links.iter().try_for_each(validate::link)?;
        Ok(Self { links })
    }
}

impl From<LinkHeader> for Vec<Link> {
    #[inline]
    fn from(header: LinkHeader) -> Self {
        header.links
    }
}

impl<'a> IntoIterator for &'a LinkHeader {
    type Item = &'a Link;
    type IntoIter = slice::Iter<'a, Link>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;

    use alloc::string::ToString;

    use serde::de::{self, Deserialize, Deserializer, Visitor};
    use serde::ser::{Serialize, Serializer};

    use super::LinkHeader;

    /// Serialized as the `Link` header value.
    impl Serialize for LinkHeader {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    /// Deserialized by parsing a `Link` header value.
    impl<'de> Deserialize<'de> for LinkHeader {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            /// Visitor for `LinkHeader`.
            struct LinkHeaderVisitor;

            impl<'de> Visitor<'de> for LinkHeaderVisitor {
                type Value = LinkHeader;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a `Link` header value")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                    LinkHeader::parse(v).map_err(E::custom)
                }
            }

            deserializer.deserialize_str(LinkHeaderVisitor)
        }
    }
}
