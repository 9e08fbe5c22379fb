use canon_uri::{
    pct_enc::{table::*, *},
    ErrorCategory,
};

const RAW: &str = "te😃a 测1`~!@试#$%st^&+=";
const ENCODED: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

#[test]
fn encode_decode() {
    let s = encode(RAW, QUERY);
    assert_eq!(s, ENCODED);
    assert!(QUERY.validate(s.as_bytes()));
    assert_eq!(percent_decode(&s).unwrap(), RAW.as_bytes());

    let estr = EStr::new(ENCODED).unwrap();
    assert_eq!(estr.decode(), RAW.as_bytes());
    assert_eq!(estr.decode_utf8_lossy(), RAW);

    // Nothing to encode.
    assert!(matches!(encode("abc", QUERY), std::borrow::Cow::Borrowed("abc")));
    // The delimiter is kept in paths but not in segments.
    assert_eq!(encode("/a/b?", PATH), "/a/b%3F");
    assert_eq!(encode("a/b", PCHAR), "a%2Fb");
    assert_eq!(encode("a:b@c", USERINFO), "a:b%40c");
    assert_eq!(encode("[::1]", REG_NAME), "%5B%3A%3A1%5D");
}

#[test]
fn decode_errors() {
    for (s, index) in [("%", 0), ("%2", 0), ("ab%g0", 2), ("%41%4", 3), ("%%41", 0)] {
        let e = percent_decode(s).unwrap_err();
        assert_eq!(e.index(), index, "{s}");
        assert_eq!(e.category(), ErrorCategory::MalformedEncoding);
    }
    assert!(decode_triplet([b'g', b'0']).is_err());
    assert_eq!(decode_triplet([b'f', b'F']), Ok(0xff));

    // Invalid UTF-8 is replaced when decoding lossily.
    let estr = EStr::new("%FF%41").unwrap();
    assert_eq!(estr.decode(), &[0xff, b'A'][..]);
    assert_eq!(estr.decode_utf8_lossy(), "\u{FFFD}A");
}

#[test]
fn uppercase() {
    assert_eq!(uppercase_triplets("%2a%2A%aB"), "%2A%2A%AB");
    // Not a triplet, so untouched.
    assert_eq!(uppercase_triplets("%zz%a"), "%zz%a");
    assert_eq!(uppercase_triplets("abc%"), "abc%");

    let once = uppercase_triplets("/%7efoo/%e2%82%ac");
    assert_eq!(once, "/%7Efoo/%E2%82%AC");
    assert_eq!(uppercase_triplets(&once), once);
}

#[test]
fn decode_unreserved() {
    assert_eq!(decode_unreserved_triplets("%41%7a%30%2D%2e%5F%7E"), "Az0-._~");
    assert_eq!(
        decode_unreserved_triplets("%2F%3A%40%25%20%C3%A9"),
        "%2F%3A%40%25%20%C3%A9"
    );
    // Decoding happens once: "%2541" is "%25" followed by "41".
    assert_eq!(decode_unreserved_triplets("%2541"), "%2541");

    for x in 0..=u8::MAX {
        assert_eq!(is_unreserved(x), UNRESERVED.allows(x));
    }
    assert!(is_unreserved(b'~'));
    assert!(!is_unreserved(b'%'));
    assert!(!is_unreserved(b'!'));
}

#[test]
fn estr() {
    assert!(EStr::new("%").is_none());
    assert!(EStr::new("a%2").is_none());
    assert!(EStr::new("a%zz").is_none());
    assert!(EStr::new("a%20").is_some());
    assert!(EStr::EMPTY.is_empty());

    let s = EStr::new("a%2Fb/c").unwrap();
    assert_eq!(s.len(), 7);
    assert!(s.split('/').eq([EStr::new("a%2Fb").unwrap(), EStr::new("c").unwrap()]));
    assert_eq!(s.to_string(), "a%2Fb/c");
    assert_eq!(format!("{s:?}"), "\"a%2Fb/c\"");
}

#[test]
#[should_panic]
fn estr_split_on_percent() {
    let _ = EStr::new("a%20").unwrap().split('%');
}

#[test]
fn tables() {
    assert!(SCHEME.validate(b"svn+ssh"));
    assert!(!SCHEME.validate(b"a b"));
    assert!(!SCHEME.allows_enc());
    assert!(PATH.allows_enc());
    assert!(PATH.validate(b"/a%20b"));
    assert!(!PATH.validate(b"/a%2"));
    assert!(!PATH.validate(b"/a?"));
    assert!(QUERY.validate(b"/?a=b"));
    assert!(!REG_NAME.validate(b"a:b"));
    assert!(RESERVED.allows(b'#'));
    assert!(!UNRESERVED.allows(b'#'));
}
