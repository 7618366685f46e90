//! Parser for the `Link` header value.
//!
//! The parser scans the input once from left to right with a single cursor.
//! It never backtracks, and it looks at most one character ahead.
//!
//! ```text
//! Link-value   = #link-value
//! link-value   = "<" URI-Reference ">" *( OWS ";" OWS link-param )
//! link-param   = token [ "=" ( token / quoted-string ) ]
//! ```
//!
//! # Examples
//!
//! ```
//! use link_header::parser;
//!
//! let mut links = parser::parse(r#"<https://one.example>; rel="preconnect", <https://two.example>"#);
//!
//! let first = links.next().unwrap()?;
//! assert_eq!(first.uri(), "https://one.example");
//! assert_eq!(first.rel(), Some("preconnect"));
//!
//! let second = links.next().unwrap()?;
//! assert_eq!(second.uri(), "https://two.example");
//! assert!(second.params().is_empty());
//!
//! assert!(links.next().is_none());
//! # Ok::<_, link_header::Error>(())
//! ```

pub(crate) mod char;
pub(crate) mod str;

use alloc::borrow::Cow;
use alloc::string::String;

use crate::error::{Error, Expected};
use crate::link::{Link, Params};
use crate::percent_encode;
use crate::validate;

use self::str::{find_byte, find_byte2, prefix_len};

/// Parses the `Link` header value.
///
/// Byte order marks (U+FEFF) and no-break spaces (U+00A0) are removed from
/// the whole input before parsing.
///
/// The returned iterator parses lazily: each call of `next()` scans one
/// link. After an error is returned, the iterator yields nothing more.
#[inline]
pub fn parse(input: &str) -> Entries<'_> {
    Entries::new(input)
}

/// Iterator of links parsed from a `Link` header value.
///
/// Created by [`parse`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    /// Input without ignorable characters.
    input: Cow<'a, str>,
    /// Byte offset of the cursor.
    pos: usize,
    /// Whether the end of input or an error is reached.
    finished: bool,
}

impl<'a> Entries<'a> {
    /// Creates a new parser.
    #[must_use]
    fn new(input: &'a str) -> Self {
        let input = if input.chars().any(char::is_ignorable) {
            Cow::Owned(input.chars().filter(|&c| !char::is_ignorable(c)).collect())
        } else {
            Cow::Borrowed(input)
        };
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<Link, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut cursor = Cursor {
            input: &self.input,
            pos: self.pos,
        };
        let result = cursor.link();
        self.pos = cursor.pos;
        match result {
            Ok(Some(link)) => Some(Ok(link)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl core::iter::FusedIterator for Entries<'_> {}

/// Parser cursor over the preprocessed input.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    /// Whole input.
    input: &'a str,
    /// Byte offset of the next character.
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Returns the rest of the input.
    #[inline]
    #[must_use]
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns the next byte.
    #[inline]
    #[must_use]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Creates an error at the current position.
    #[must_use]
    fn unexpected(&self, expected: Expected) -> Error {
        Error::syntax(expected, self.rest().chars().next(), self.pos)
    }

    /// Skips optional whitespace.
    #[inline]
    fn skip_ows(&mut self) {
        self.pos += prefix_len(self.rest(), char::is_ows);
    }

    /// Skips whitespace and commas between links.
    #[inline]
    fn skip_link_separators(&mut self) {
        self.pos += prefix_len(self.rest(), |b| char::is_ows(b) || b == b',');
    }

    /// Returns true if the cursor is at the end of input or at a comma.
    #[inline]
    #[must_use]
    fn at_link_end(&self) -> bool {
        matches!(self.peek(), None | Some(b','))
    }

    /// Parses a link.
    ///
    /// Returns `Ok(None)` if there are no more links.
    fn link(&mut self) -> Result<Option<Link>, Error> {
        self.skip_link_separators();
        if self.peek().is_none() {
            return Ok(None);
        }

        let uri = self.uri()?;
        let mut params = Params::new();

        self.skip_ows();
        if self.at_link_end() {
            return Ok(Some(Link::from_parts(uri, params)));
        }
        if self.peek() != Some(b';') {
            return Err(self.unexpected(Expected::Semicolon));
        }
        self.pos += 1;

        while self.peek().is_some() {
            self.skip_ows();
            let key = self.param_key()?;

            self.skip_ows();
            if self.at_link_end() {
                params.insert(key, String::new());
                break;
            }
            if self.peek() == Some(b';') {
                params.insert(key, String::new());
                self.pos += 1;
                continue;
            }
            if self.peek() != Some(b'=') {
                return Err(self.unexpected(Expected::Equals));
            }
            self.pos += 1;
            self.skip_ows();

            let value = self.param_value();
            let value = if validate::needs_lowercase_value(&key) {
                validate::to_lowercase(value)
            } else {
                value
            };
            params.insert(key, value);

            self.skip_ows();
            if self.at_link_end() {
                break;
            }
            if self.peek() != Some(b';') {
                return Err(self.unexpected(Expected::ParamTerminator));
            }
            self.pos += 1;
        }

        Ok(Some(Link::from_parts(uri, params)))
    }

    /// Parses `"<" URI-Reference ">"` and returns the decoded URI.
    fn uri(&mut self) -> Result<String, Error> {
        if self.peek() != Some(b'<') {
            return Err(self.unexpected(Expected::UriStart));
        }
        self.pos += 1;

        let len = match find_byte(self.rest(), b'>') {
            Some(len) => len,
            None => return Err(Error::syntax(Expected::UriEnd, None, self.pos)),
        };
        if len == 0 {
            return Err(Error::syntax(Expected::Uri, Some('>'), self.pos));
        }
        let raw = &self.rest()[..len];
        self.pos += len + 1;

        validate::uri(raw)?;
        percent_encode::decode(raw).map(Cow::into_owned)
    }

    /// Parses a parameter key (`[\w-]+\*?`) and returns it lowercased.
    fn param_key(&mut self) -> Result<String, Error> {
        let rest = self.rest();
        let mut len = prefix_len(rest, char::is_ascii_token);
        if len == 0 {
            return Err(self.unexpected(Expected::ParamKey));
        }
        if rest.as_bytes().get(len) == Some(&b'*') {
            len += 1;
        }
        self.pos += len;
        Ok(rest[..len].to_ascii_lowercase())
    }

    /// Parses a token or a quoted string and returns the unescaped value.
    fn param_value(&mut self) -> String {
        if self.peek() == Some(b'"') {
            self.pos += 1;
            return self.quoted_string_rest();
        }
        let rest = self.rest();
        let len = prefix_len(rest, |b| !char::is_value_delim(b));
        self.pos += len;
        rest[..len].into()
    }

    /// Parses a quoted string after the opening `"`.
    ///
    /// A backslash escapes the following character. If the closing quote
    /// is missing, the value continues to the end of the input.
    fn quoted_string_rest(&mut self) -> String {
        let mut value = String::new();
        loop {
            let rest = self.rest();
            let len = match find_byte2(rest, b'"', b'\\') {
                Some(len) => len,
                None => {
                    value.push_str(rest);
                    self.pos = self.input.len();
                    return value;
                }
            };
            value.push_str(&rest[..len]);
            self.pos += len + 1;
            if rest.as_bytes()[len] == b'"' {
                return value;
            }
            if let Some(escaped) = self.rest().chars().next() {
                value.push(escaped);
                self.pos += escaped.len_utf8();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    use crate::ErrorKind;

    /// Parses the input into a vector, or returns the first error.
    fn parse_all(s: &str) -> Result<Vec<Link>, Error> {
        parse(s).collect()
    }

    #[test]
    fn empty() {
        assert!(parse_all("").unwrap().is_empty());
        assert!(parse_all(" \t\r\n").unwrap().is_empty());
    }

    #[test]
    fn quoted_and_token_values_are_equal() {
        let quoted = parse_all(r#"<https://example.com>; rel="preconnect""#).unwrap();
        let token = parse_all("<https://example.com>; rel=preconnect").unwrap();
        assert_eq!(quoted, token);
        assert_eq!(quoted[0].rel(), Some("preconnect"));
    }

    #[test]
    fn escaped_quote() {
        let links = parse_all(r#"<https://example.com>; title="say \"hi\" \\o/""#).unwrap();
        assert_eq!(links[0].param("title"), Some(r#"say "hi" \o/"#));
    }

    #[test]
    fn unterminated_quoted_string_runs_to_end() {
        let links = parse_all(r#"<https://example.com>; title="abc, <x>"#).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].param("title"), Some("abc, <x>"));
    }

    #[test]
    fn bare_flag() {
        let links = parse_all("<https://x>; noopener; rel=next").unwrap();
        let pairs: Vec<_> = links[0].params().iter().collect();
        assert_eq!(pairs, [("noopener", ""), ("rel", "next")]);
    }

    #[test]
    fn key_and_value_case() {
        let links =
            parse_all(r#"<https://x>; REL="Next"; Type=Text/HTML; Title="Hello""#).unwrap();
        let pairs: Vec<_> = links[0].params().iter().collect();
        assert_eq!(
            pairs,
            [("rel", "next"), ("type", "text/html"), ("title", "Hello")]
        );
    }

    #[test]
    fn extended_key() {
        let links = parse_all("<https://x>; title*=UTF-8'de'n%c3%a4chstes").unwrap();
        assert_eq!(links[0].param("title*"), Some("UTF-8'de'n%c3%a4chstes"));
    }

    #[test]
    fn later_value_overwrites() {
        let links = parse_all("<https://x>; rel=prev; title=a; rel=next").unwrap();
        let pairs: Vec<_> = links[0].params().iter().collect();
        assert_eq!(pairs, [("rel", "next"), ("title", "a")]);
    }

    #[test]
    fn whitespace_around_delimiters() {
        let links = parse_all("  <https://a> ;  rel = next ; x ,\r\n <https://b>\t").unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].rel(), Some("next"));
        assert_eq!(links[0].param("x"), Some(""));
        assert_eq!(links[1].uri(), "https://b");
    }

    #[test]
    fn stray_separators() {
        let links = parse_all(", <https://a>,, <https://b>; rel=next,").unwrap();
        assert_eq!(links.len(), 2);
        let links = parse_all("<https://a>; rel=next;").unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn ignorable_characters_are_removed() {
        let links = parse_all("\u{FEFF}<https://a>;\u{A0}rel=next").unwrap();
        assert_eq!(links[0].rel(), Some("next"));
        let links = parse_all("<https://exa\u{A0}mple.com>").unwrap();
        assert_eq!(links[0].uri(), "https://example.com");
    }

    #[test]
    fn percent_decoded_uri() {
        let links = parse_all("<https://example.com/%E8%8B%97%E6%9D%A1>").unwrap();
        assert_eq!(links[0].uri(), "https://example.com/\u{82d7}\u{6761}");
    }

    #[test]
    fn missing_angle_bracket() {
        let err = parse_all(r#"https://bad.example; rel="preconnect""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.position(), Some(0));
        assert_eq!(err.found(), Some('h'));
    }

    #[test]
    fn missing_closing_angle_bracket() {
        let err = parse_all("<https://example.com").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.position(), Some(1));
        assert_eq!(err.found(), None);
    }

    #[test]
    fn missing_uri() {
        let err = parse_all("<>; rel=next").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn uri_with_whitespace() {
        let err = parse_all("<https://exa mple.com>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedUri);
    }

    #[test]
    fn missing_semicolon() {
        let err = parse_all("<https://a> <https://b>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.position(), Some(12));
        assert_eq!(err.found(), Some('<'));
    }

    #[test]
    fn missing_param_key() {
        let err = parse_all("<https://a>; =next").unwrap_err();
        assert_eq!(err.position(), Some(13));
        assert_eq!(err.found(), Some('='));
    }

    #[test]
    fn missing_equals() {
        let err = parse_all("<https://a>; rel next").unwrap_err();
        assert_eq!(err.position(), Some(17));
        assert_eq!(err.found(), Some('n'));
    }

    #[test]
    fn invalid_terminator() {
        let err = parse_all(r#"<https://a>; rel="next" x"#).unwrap_err();
        assert_eq!(err.position(), Some(24));
        assert_eq!(err.found(), Some('x'));
    }

    #[test]
    fn lazy_until_error() {
        let mut links = parse("<https://a>, <https://b> oops, <https://c>");
        assert_eq!(links.next().unwrap().unwrap().uri(), "https://a");
        assert!(links.next().unwrap().is_err());
        assert!(links.next().is_none());
    }
}
