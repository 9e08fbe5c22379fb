#![no_main]
use canon_uri::{normalize::normalize_path_segments, resolve::remove_dot_segments};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|path: &str| {
    let once = remove_dot_segments(path);
    assert_eq!(remove_dot_segments(&once), once);
    assert!(once.len() <= path.len());

    if let Ok(norm) = normalize_path_segments(path) {
        assert_eq!(normalize_path_segments(&norm).as_deref(), Ok(norm.as_str()));
        assert!(!norm.split('/').any(|seg| seg == "." || seg == ".."));
    }
});
