//! Functions for common string operations.

/// Returns the byte offset of the first occurrence of the given byte.
///
/// The needle must be an ASCII character, so the returned offset is always
/// on a character boundary.
#[inline]
#[must_use]
pub(crate) fn find_byte(haystack: &str, needle: u8) -> Option<usize> {
    debug_assert!(needle.is_ascii());
    #[cfg(feature = "memchr")]
    {
        memchr::memchr(needle, haystack.as_bytes())
    }
    #[cfg(not(feature = "memchr"))]
    {
        haystack.bytes().position(|b| b == needle)
    }
}

/// Returns the byte offset of the first occurrence of any of the given bytes.
///
/// The needles must be ASCII characters.
#[inline]
#[must_use]
pub(crate) fn find_byte2(haystack: &str, needle1: u8, needle2: u8) -> Option<usize> {
    debug_assert!(needle1.is_ascii());
    debug_assert!(needle2.is_ascii());
    #[cfg(feature = "memchr")]
    {
        memchr::memchr2(needle1, needle2, haystack.as_bytes())
    }
    #[cfg(not(feature = "memchr"))]
    {
        haystack
            .bytes()
            .position(|b| (b == needle1) || (b == needle2))
    }
}

/// Returns the length of the longest prefix whose bytes all satisfy the predicate.
///
/// The predicate must give the same answer for every non-ASCII byte, so the
/// returned offset is always on a character boundary.
#[inline]
#[must_use]
pub(crate) fn prefix_len(s: &str, pred: impl Fn(u8) -> bool) -> usize {
    s.bytes().position(|b| !pred(b)).unwrap_or(s.len())
}
