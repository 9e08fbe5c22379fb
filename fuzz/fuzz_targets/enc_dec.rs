#![no_main]
use canon_uri::pct_enc::{encode, percent_decode, table::QUERY, EStr};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let encoded = encode(data, QUERY);
    assert!(QUERY.validate(encoded.as_bytes()));

    let estr = EStr::new(&encoded).unwrap();
    assert_eq!(estr.decode(), data.as_bytes());
    assert_eq!(estr.decode_utf8_lossy(), data);
    assert_eq!(percent_decode(&encoded).unwrap(), data.as_bytes());
});
