//! Link entries and their parameters.

use core::fmt;
use core::slice;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::format;

/// Insertion-ordered parameters of a link.
///
/// Keys are unique. Inserting an existing key replaces the value in place,
/// so the key keeps its original position.
///
/// The order is used for serialization only: two parameter sets with the
/// same key-value pairs compare equal regardless of order.
///
/// # Examples
///
/// ```
/// use link_header::Params;
///
/// let mut params = Params::new();
/// params.insert("rel", "preload");
/// params.insert("as", "style");
/// assert_eq!(params.insert("rel", "prefetch"), Some("preload".to_owned()));
///
/// let keys: Vec<_> = params.keys().collect();
/// assert_eq!(keys, ["rel", "as"]);
/// assert_eq!(params.get("rel"), Some("prefetch"));
/// ```
#[derive(Default, Debug, Clone, Eq)]
pub struct Params {
    /// Key-value pairs in insertion order.
    ///
    /// Lookup is a linear scan.
    entries: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the key is present.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair, and returns the previous value if available.
    ///
    /// An empty value represents a parameter without value (such as a flag).
    ///
    /// No validation is done here. Keys and values are validated when the
    /// link is added to a [`LinkHeader`][`crate::LinkHeader`].
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, old)) => Some(core::mem::replace(old, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns an iterator of key-value pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator of keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of parameters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        (self.len() == other.len())
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k) == Some(v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = vec::IntoIter<(String, String)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator of parameters, created by [`Params::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Inner iterator.
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// A link: a URI reference and its parameters.
///
/// The URI is stored percent-decoded, and percent-encoded again on
/// serialization.
///
/// # Examples
///
/// ```
/// use link_header::Link;
///
/// let link = Link::new("https://example.com/\u{82d7}\u{6761}")
///     .with_param("rel", "preconnect")
///     .with_param("crossorigin", "");
/// assert_eq!(
///     link.to_string(),
///     r#"<https://example.com/%E8%8B%97%E6%9D%A1>; rel="preconnect"; crossorigin"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Percent-decoded URI reference.
    uri: String,
    /// Parameters.
    params: Params,
}

impl Link {
    /// Creates a link without parameters.
    #[inline]
    #[must_use]
    pub fn new<U: Into<String>>(uri: U) -> Self {
        Self::from_parts(uri, Params::new())
    }

    /// Creates a link from the URI and the parameters.
    #[inline]
    #[must_use]
    pub fn from_parts<U: Into<String>>(uri: U, params: Params) -> Self {
        Self {
            uri: uri.into(),
            params,
        }
    }

    /// Returns the link with the given parameter inserted.
    #[must_use]
    pub fn with_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params.insert(key, value);
        self
    }

    /// Returns the percent-decoded URI reference.
    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the parameters.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the value of the given parameter.
    #[inline]
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// Returns the `rel` parameter.
    #[inline]
    #[must_use]
    pub fn rel(&self) -> Option<&str> {
        self.param("rel")
    }

    /// Decomposes the link into the URI and the parameters.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (String, Params) {
        (self.uri, self.params)
    }
}

impl fmt::Display for Link {
    /// Writes the link in the `Link` header syntax.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_link(f, self)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;

    use alloc::string::String;

    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, SerializeMap, SerializeTuple, Serializer};

    use super::{Link, Params};

    impl Serialize for Params {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    impl<'de> Deserialize<'de> for Params {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            /// Visitor for `Params`.
            struct ParamsVisitor;

            impl<'de> Visitor<'de> for ParamsVisitor {
                type Value = Params;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a map of link parameters")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Params, A::Error> {
                    let mut params = Params::new();
                    while let Some((k, v)) = access.next_entry::<String, String>()? {
                        params.insert(k, v);
                    }
                    Ok(params)
                }
            }

            deserializer.deserialize_map(ParamsVisitor)
        }
    }

    /// Serialized as a `(uri, params)` tuple.
    impl Serialize for Link {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(2)?;
            tuple.serialize_element(&self.uri)?;
            tuple.serialize_element(&self.params)?;
            tuple.end()
        }
    }

    /// Deserialized from a `(uri, params)` tuple.
    ///
    /// The link is not validated here.
    impl<'de> Deserialize<'de> for Link {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let (uri, params) = <(String, Params)>::deserialize(deserializer)?;
            Ok(Link::from_parts(uri, params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_position() {
        let mut params = Params::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn eq_ignores_order() {
        let lhs: Params = [("rel", "next"), ("type", "text/html")]
            .into_iter()
            .collect();
        let rhs: Params = [("type", "text/html"), ("rel", "next")]
            .into_iter()
            .collect();
        assert_eq!(lhs, rhs);

        let different: Params = [("rel", "next")].into_iter().collect();
        assert_ne!(lhs, different);
    }

    #[test]
    fn link_accessors() {
        let link = Link::new("https://example.com").with_param("rel", "next");
        assert_eq!(link.uri(), "https://example.com");
        assert_eq!(link.rel(), Some("next"));
        assert_eq!(link.param("type"), None);

        let (uri, params) = link.into_parts();
        assert_eq!(uri, "https://example.com");
        assert_eq!(params.len(), 1);
    }
}
