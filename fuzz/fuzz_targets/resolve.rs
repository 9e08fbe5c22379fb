#![no_main]
use canon_uri::{resolve::remove_dot_segments, ComparisonLevel, Uri};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(r)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };
    if base.scheme().is_none() {
        return;
    }

    let t = base.resolve(&r, ComparisonLevel::StringComparison).unwrap();
    let t2 = Uri::parse(t.as_str()).unwrap();
    assert_eq!(t.as_str(), t2.as_str());

    // The target always takes the reference's fragment.
    assert_eq!(t.fragment(), r.fragment());
    assert!(t.scheme().is_some());

    // A path taken from the reference loses its dot segments,
    // unless a guard had to be inserted.
    let path = t.path().as_str();
    if !r.path().is_empty() && !path.starts_with("/.//") {
        assert_eq!(remove_dot_segments(path), path);
    }

    if let Ok(n) = base.resolve(&r, ComparisonLevel::SyntaxBased) {
        assert_eq!(n, t);
    }
});
