//! Serde support.
#![cfg(feature = "serde")]

mod utils;

use serde_test::{assert_de_tokens_error, assert_tokens, Token};

use link_header::{Link, LinkHeader, Params};

#[test]
fn link_header_as_string() {
    let header = utils::parse(r#"<https://a>; rel=next, <https://b>; title="B""#);
    assert_tokens(
        &header,
        &[Token::Str(r#"<https://a>; rel="next", <https://b>; title="B""#)],
    );
}

#[test]
fn link_header_parse_error() {
    assert_de_tokens_error::<LinkHeader>(
        &[Token::Str("https://a")],
        "unexpected character 'h' at position 0; expected '<'",
    );
}

#[test]
fn params_as_map() {
    let params: Params = [("rel", "next"), ("nopush", "")].into_iter().collect();
    assert_tokens(
        &params,
        &[
            Token::Map { len: Some(2) },
            Token::Str("rel"),
            Token::Str("next"),
            Token::Str("nopush"),
            Token::Str(""),
            Token::MapEnd,
        ],
    );
}

#[test]
fn link_as_tuple() {
    let link = utils::link("https://example.com/\u{03B1}", &[("rel", "next")]);
    assert_tokens(
        &link,
        &[
            Token::Tuple { len: 2 },
            Token::Str("https://example.com/\u{03B1}"),
            Token::Map { len: Some(1) },
            Token::Str("rel"),
            Token::Str("next"),
            Token::MapEnd,
            Token::TupleEnd,
        ],
    );

    let bare = Link::new("https://a");
    assert_tokens(
        &bare,
        &[
            Token::Tuple { len: 2 },
            Token::Str("https://a"),
            Token::Map { len: Some(0) },
            Token::MapEnd,
            Token::TupleEnd,
        ],
    );
}
