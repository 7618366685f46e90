//! Utilities for tests.
#![allow(dead_code)]

use core::fmt;

use link_header::{Link, LinkHeader, Params};

/// Returns true if the two equals after they are converted to strings.
pub(crate) fn eq_display_str<T>(d: &T, s: &str) -> bool
where
    T: ?Sized + fmt::Display,
{
    use core::fmt::Write as _;

    /// Dummy writer to compare the formatted object to the given string.
    struct CmpWriter<'a>(&'a str);
    impl fmt::Write for CmpWriter<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.0.len() < s.len() {
                return Err(fmt::Error);
            }
            let (prefix, rest) = self.0.split_at(s.len());
            self.0 = rest;
            if prefix == s {
                Ok(())
            } else {
                Err(fmt::Error)
            }
        }
    }

    let mut writer = CmpWriter(s);
    let succeeded = write!(writer, "{}", d).is_ok();
    succeeded && writer.0.is_empty()
}

#[allow(unused_macros)]
macro_rules! assert_eq_display {
    ($left:expr, $right:expr $(,)?) => {{
        match (&$left, &$right) {
            (left, right) => {
                assert!(
                    utils::eq_display_str(left, right.as_ref()),
                    "`eq_display_str(left, right)`\n  left: `{left}`,\n right: `{right}`",
                    left = left,
                    right = right,
                );
            }
        }
    }};
}

/// Builds a link from the URI and parameter pairs.
pub fn link(uri: &str, params: &[(&str, &str)]) -> Link {
    Link::from_parts(uri, params.iter().copied().collect::<Params>())
}

/// Parses the header value, panicking on failure.
#[track_caller]
pub fn parse(s: &str) -> LinkHeader {
    match LinkHeader::parse(s) {
        Ok(header) => header,
        Err(e) => panic!("failed to parse {:?}: {}", s, e),
    }
}

/// Returns the URIs of the links.
pub fn uris(links: &[Link]) -> Vec<&str> {
    links.iter().map(Link::uri).collect()
}
