//! Parser and serializer for the HTTP `Link` header ([RFC 8288]).
//!
//! A `Link` header value is a comma-separated list of URI references in angle
//! brackets, each followed by optional semicolon-separated parameters:
//!
//! ```text
//! <https://one.example.com>; rel="preconnect", <https://two.example.com>; rel=preload; as=style
//! ```
//!
//! [`LinkHeader`] is an ordered collection of [`Link`]s. It can be built from
//! header values, header maps, responses, other collections, and links built
//! programmatically, and it is serialized back with [`Display`][`core::fmt::Display`].
//!
//! [RFC 8288]: https://www.rfc-editor.org/rfc/rfc8288.html
//!
//! # Examples
//!
//! ```
//! use link_header::{Link, LinkHeader};
//!
//! let mut header: LinkHeader = r#"<https://example.com/%E8%8B%97%E6%9D%A1>; rel="preconnect""#.parse()?;
//! assert_eq!(
//!     header.get_by_rel("preconnect")?[0].uri(),
//!     "https://example.com/\u{82d7}\u{6761}"
//! );
//!
//! header.add(&[Link::new("https://example.com/style.css")
//!     .with_param("rel", "preload")
//!     .with_param("as", "style")
//!     .with_param("nopush", "")])?;
//! assert_eq!(
//!     header.to_string(),
//!     concat!(
//!         r#"<https://example.com/%E8%8B%97%E6%9D%A1>; rel="preconnect", "#,
//!         r#"<https://example.com/style.css>; rel="preload"; as="style"; nopush"#,
//!     )
//! );
//! # Ok::<_, link_header::Error>(())
//! ```
//!
//! # Normalization
//!
//! * Parameter keys are lowercased on parse. Values of `rel` and `type` are
//!   lowercased too; other values keep their case.
//! * URI references are percent-decoded on parse, and percent-encoded on
//!   serialization. See [`percent_encode`] for details.
//! * Parameter values are always quoted on serialization, and parameters with
//!   an empty value are written as bare keys.
//! * Byte order marks and no-break spaces are removed before parsing.
//!
//! Links built programmatically are not normalized but validated: they are
//! rejected if a parameter key or a `rel`/`type` value is not lowercase.
//!
//! # Features
//!
//! * `std` feature (**enabled by default**):
//!     + Std library is required.
//!     + This automatically enables `alloc` feature.
//!     + The feature lets the crate implement `std::error::Error` for [`Error`].
//! * `alloc` feature:
//!     + The crate always requires the `alloc` crate. This feature propagates
//!       the requirement to optional dependencies.
//! * Without neither of them:
//!     + The crate can be used in `no_std` environment with `alloc`.
//! * `memchr` feature:
//!     + Uses the `memchr` crate to search delimiters.
//! * `serde` feature:
//!     + Implements `Serialize` and `Deserialize` for [`LinkHeader`] (as a
//!       header value string), [`Link`] (as a `(uri, params)` tuple), and
//!       [`Params`] (as a map).
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod collection;
mod error;
pub mod format;
mod link;
pub mod parser;
pub mod percent_encode;
pub mod validate;

pub use self::collection::{HeaderSource, Input, LinkHeader, ResponseSource, LINK};
pub use self::error::{Error, ErrorKind};
pub use self::link::{Iter as ParamsIter, Link, Params};
