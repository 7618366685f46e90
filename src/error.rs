//! Parse and validation error.

use core::fmt;

/// An error returned when parsing, validating, or querying links fails.
///
/// The error carries no reference to the input. For syntax errors, the
/// byte offset of the offending character and the character itself are
/// available through [`Error::position`] and [`Error::found`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Inner error representation.
    repr: ErrorRepr,
}

impl Error {
    /// Creates an error for a malformed URI reference.
    #[inline]
    #[must_use]
    pub(crate) fn malformed_uri(defect: UriDefect) -> Self {
        Self {
            repr: ErrorRepr::MalformedUri(defect),
        }
    }

    /// Creates a syntax error.
    ///
    /// `found` is `None` when the end of the input is reached.
    #[inline]
    #[must_use]
    pub(crate) fn syntax(expected: Expected, found: Option<char>, position: usize) -> Self {
        Self {
            repr: ErrorRepr::Syntax {
                expected,
                found,
                position,
            },
        }
    }

    /// Creates an error for a non-canonical parameter key.
    #[inline]
    #[must_use]
    pub(crate) fn invalid_param_key() -> Self {
        Self {
            repr: ErrorRepr::InvalidParameterKey,
        }
    }

    /// Creates an error for a non-canonical parameter value.
    #[inline]
    #[must_use]
    pub(crate) fn invalid_param_value() -> Self {
        Self {
            repr: ErrorRepr::InvalidParameterValue,
        }
    }

    /// Returns the error kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_header::{ErrorKind, LinkHeader};
    ///
    /// let err = LinkHeader::parse(r#"https://bad.example; rel="preconnect""#).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Syntax);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::MalformedUri(_) => ErrorKind::MalformedUri,
            ErrorRepr::Syntax { .. } => ErrorKind::Syntax,
            ErrorRepr::InvalidParameterKey => ErrorKind::InvalidParameterKey,
            ErrorRepr::InvalidParameterValue => ErrorKind::InvalidParameterValue,
        }
    }

    /// Returns the byte offset of the syntax error, if this is a syntax error.
    ///
    /// The offset is counted in the input after byte order marks and no-break
    /// spaces are removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_header::LinkHeader;
    ///
    /// let err = LinkHeader::parse("<https://example.com> rel").unwrap_err();
    /// assert_eq!(err.position(), Some(22));
    /// assert_eq!(err.found(), Some('r'));
    /// ```
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.repr {
            ErrorRepr::Syntax { position, .. } => Some(position),
            _ => None,
        }
    }

    /// Returns the unexpected character of the syntax error.
    ///
    /// Returns `None` if this is not a syntax error, or if the error is caused
    /// by the end of the input.
    #[inline]
    #[must_use]
    pub fn found(&self) -> Option<char> {
        match self.repr {
            ErrorRepr::Syntax { found, .. } => found,
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            ErrorRepr::MalformedUri(defect) => write!(f, "malformed URI reference: {}", defect),
            ErrorRepr::Syntax {
                expected: Expected::UriEnd,
                position,
                ..
            } => write!(
                f,
                "missing end of URI delimiter '>' after position {}",
                position
            ),
            ErrorRepr::Syntax {
                expected: Expected::Uri,
                position,
                ..
            } => write!(f, "missing URI at position {}", position),
            ErrorRepr::Syntax {
                expected,
                found: Some(c),
                position,
            } => write!(
                f,
                "unexpected character {:?} at position {}; expected {}",
                c, position, expected
            ),
            ErrorRepr::Syntax {
                expected,
                found: None,
                position,
            } => write!(
                f,
                "unexpected end of input at position {}; expected {}",
                position, expected
            ),
            ErrorRepr::InvalidParameterKey => f.write_str("invalid parameter key"),
            ErrorRepr::InvalidParameterValue => f.write_str("invalid parameter value"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

/// Internal representation of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorRepr {
    /// Malformed URI reference.
    MalformedUri(UriDefect),
    /// Grammar violation.
    Syntax {
        /// What the parser was looking for.
        expected: Expected,
        /// The unexpected character, or `None` at the end of the input.
        found: Option<char>,
        /// Byte offset.
        position: usize,
    },
    /// Non-canonical parameter key.
    InvalidParameterKey,
    /// Non-canonical parameter value.
    InvalidParameterValue,
}

/// What is wrong with a URI reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UriDefect {
    /// Empty string.
    Empty,
    /// Contains whitespace.
    Whitespace,
    /// Contains a line break.
    MultiLine,
    /// Contains a control character.
    Control,
    /// Contains a triplet that decoding would change.
    NotDecoded,
    /// Broken percent-encoding triplet, or triplets not forming UTF-8.
    PercentEncoding,
}

impl fmt::Display for UriDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Whitespace => "contains whitespace",
            Self::MultiLine => "contains a line break",
            Self::Control => "contains a control character",
            Self::NotDecoded => "not in percent-decoded form",
            Self::PercentEncoding => "invalid percent encoding",
        })
    }
}

/// Syntax the parser expected at the error position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expected {
    /// `<` starting a link.
    UriStart,
    /// `>` closing a URI reference.
    UriEnd,
    /// Non-empty URI reference.
    Uri,
    /// `;` after a URI reference.
    Semicolon,
    /// A parameter key.
    ParamKey,
    /// `=` after a parameter key.
    Equals,
    /// `,`, `;`, or end of input after a parameter value.
    ParamTerminator,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UriStart => "'<'",
            Self::UriEnd => "'>'",
            Self::Uri => "URI reference",
            Self::Semicolon => "';'",
            Self::ParamKey => "a valid parameter key",
            Self::Equals => "'='",
            Self::ParamTerminator => "',', ';', or end of input",
        })
    }
}

/// Error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A URI reference is empty, contains whitespace or line breaks, or has
    /// broken percent encoding.
    MalformedUri,
    /// The header value violates the `Link` header grammar.
    Syntax,
    /// A parameter key is not lowercase or is not a valid token.
    InvalidParameterKey,
    /// A `rel` or `type` parameter value (or a `rel` query) is not lowercase.
    InvalidParameterValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::string::ToString;

    #[test]
    fn syntax_message() {
        let err = Error::syntax(Expected::UriStart, Some('h'), 0);
        assert_eq!(
            err.to_string(),
            "unexpected character 'h' at position 0; expected '<'"
        );
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.position(), Some(0));
        assert_eq!(err.found(), Some('h'));
    }

    #[test]
    fn end_of_input_message() {
        let err = Error::syntax(Expected::Equals, None, 7);
        assert_eq!(
            err.to_string(),
            "unexpected end of input at position 7; expected '='"
        );
        assert_eq!(err.found(), None);
    }

    #[test]
    fn non_syntax_errors_have_no_position() {
        let err = Error::malformed_uri(UriDefect::Whitespace);
        assert_eq!(err.kind(), ErrorKind::MalformedUri);
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "malformed URI reference: contains whitespace");
    }
}
