#![no_main]
use canon_uri::{ComparisonLevel, Uri};
use libfuzzer_sys::fuzz_target;

type Shape = (
    Option<String>,
    Option<(String, String)>,
    String,
    Option<String>,
    Option<String>,
);

fn shape(u: &Uri<&str>) -> Shape {
    (
        u.scheme().map(|s| s.as_str().to_owned()),
        u.authority()
            .map(|a| (a.as_str().to_owned(), a.host_parsed().to_string())),
        u.path().as_str().to_owned(),
        u.query().map(|q| q.as_str().to_owned()),
        u.fragment().map(|f| f.as_str().to_owned()),
    )
}

fuzz_target!(|data: &str| {
    let Ok(uri) = Uri::parse(data) else {
        return;
    };

    let same = uri.normalize(ComparisonLevel::StringComparison).unwrap();
    assert_eq!(same.as_str(), data);

    let Ok(norm) = uri.normalize(ComparisonLevel::SyntaxBased) else {
        return;
    };
    let reparsed = Uri::parse(norm.as_str()).unwrap();

    // The parser sees the same structure in the normalized string.
    assert_eq!(shape(&norm.borrow()), shape(&reparsed));

    let scheme = norm.scheme().map_or("", |s| s.as_str());
    assert!(!scheme.bytes().any(|b| b.is_ascii_uppercase()));
    assert!(!norm.path().as_str().contains("//"));

    let twice = norm.normalize(ComparisonLevel::SyntaxBased).unwrap();
    assert_eq!(twice.as_str(), norm.as_str());
    assert_eq!(uri, norm);
});
