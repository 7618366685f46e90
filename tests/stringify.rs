//! Serialize links into `Link` header values.

#[macro_use]
mod utils;

use link_header::format::Stringified;
use link_header::{ErrorKind, Link, LinkHeader, Params};

#[test]
fn from_links() {
    let links = [utils::link("https://one.example.com", &[("rel", "preconnect")])];
    let header = LinkHeader::parse(&links).unwrap();
    assert!(header.has_parameter("rel", "preconnect").unwrap());
    assert_eq!(header.entries().len(), 1);
    assert_eq_display!(header, r#"<https://one.example.com>; rel="preconnect""#);
}

#[test]
fn static_stringify() {
    let links = [
        utils::link("https://one.example.com", &[("rel", "preconnect")]),
        utils::link("https://two.example.com", &[("rel", "preconnect")]),
    ];
    assert_eq!(
        LinkHeader::stringify([&links[..]]).unwrap(),
        r#"<https://one.example.com>; rel="preconnect", <https://two.example.com>; rel="preconnect""#
    );
    assert!(LinkHeader::stringify([&[Link::new("https://a").with_param("Rel", "x")]]).is_err());
}

#[test]
fn bare_key() {
    let header = utils::parse("<https://x>; noopener");
    assert_eq_display!(header, "<https://x>; noopener");
}

#[test]
fn normalized_output() {
    let header = utils::parse("<https://a>;REL=Next;  title = Hello ;x,<https://b>");
    assert_eq_display!(
        header,
        r#"<https://a>; rel="next"; title="Hello"; x, <https://b>"#
    );
}

#[test]
fn escaped_values() {
    let link = utils::link("https://a", &[("title", r#"say "hi" \o/"#)]);
    assert_eq_display!(link, r#"<https://a>; title="say \"hi\" \\o/""#);
}

#[test]
fn percent_encoding_round_trip() {
    let input = r#"<https://example.com/%E8%8B%97%E6%9D%A1?q=a%20b&r=%2F>; rel="preconnect""#;
    let header = utils::parse(input);
    assert_eq!(
        header.entries()[0].uri(),
        "https://example.com/\u{82d7}\u{6761}?q=a%20b&r=%2F"
    );
    assert_eq_display!(header, input);
}

#[test]
fn parse_stringified() {
    let cases = [
        utils::link("https://example.com", &[]),
        utils::link("https://example.com/\u{03B1}", &[("rel", "next")]),
        utils::link("/relative?x=1#frag", &[("rel", "prev"), ("anchor", "#a")]),
        utils::link(
            "https://example.com",
            &[("title", "a, b; c=\"d\" \\ e"), ("crossorigin", "")],
        ),
        utils::link("urn:isbn:0451450523", &[("type", "text/html"), ("title*", "UTF-8''x")]),
    ];
    for link in &cases {
        let s = Stringified::new(core::slice::from_ref(link)).to_string();
        let parsed = utils::parse(&s);
        assert_eq!(parsed.entries(), [link.clone()], "{:?}", s);
    }
}

#[test]
fn links_not_surviving_round_trip_are_rejected() {
    for uri in [
        "https://example.com/%FF",
        "https://example.com/a%41",
        "https://example.com/100%",
        "https://example.com/\0x",
    ] {
        let links = [Link::new(uri)];
        let err = LinkHeader::stringify([&links]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedUri, "{:?}", uri);
        assert!(LinkHeader::try_from(links.to_vec()).is_err(), "{:?}", uri);
    }

    let links = [utils::link("https://a", &[("title", "line\r\nbreak")])];
    assert_eq!(
        LinkHeader::stringify([&links]).unwrap_err().kind(),
        ErrorKind::InvalidParameterValue
    );
}

#[test]
fn accepted_links_survive_round_trip() {
    let cases = [
        utils::link("https://example.com/a%2Fb%3Fc", &[("rel", "next")]),
        utils::link("https://example.com/100%25", &[]),
        utils::link("https://example.com/%00x", &[]),
        utils::link("https://example.com/q?x=a%20b&y=\"z\"", &[]),
    ];
    for link in &cases {
        let s = LinkHeader::stringify([core::slice::from_ref(link)]).unwrap();
        let parsed = utils::parse(&s);
        assert_eq!(parsed.entries(), [link.clone()], "{:?}", s);
    }
}

#[test]
fn stringified_links_join() {
    let links = [
        Link::new("https://a"),
        Link::from_parts("https://b", [("rel", "next")].into_iter().collect::<Params>()),
    ];
    assert_eq_display!(Stringified::new(&links), r#"<https://a>, <https://b>; rel="next""#);
}
