//! Module for reference resolution.
//!
//! Implements [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2).

use crate::{
    compose::{compose, AuthParts, Parts},
    internal::{Meta, Ref},
};
use alloc::{borrow::Cow, string::String};

/// Removes the dot segments from a path, as described in
/// [Section 5.2.4 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4).
///
/// A `..` with nothing left to remove is silently dropped,
/// so this function never fails.
///
/// # Examples
///
/// ```
/// use canon_uri::resolve::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
/// assert_eq!(remove_dot_segments("/../../g"), "/g");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        if let Some(rem) = input.strip_prefix("../") {
            input = rem;
        } else if let Some(rem) = input.strip_prefix("./") {
            input = rem;
        } else if input.starts_with("/./") {
            // Replace "/./" with "/".
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            // Replace "/../" with "/".
            input = &input[3..];
            remove_last_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            remove_last_segment(&mut output);
        } else if input.bytes().all(|x| x == b'.') {
            input = "";
        } else {
            // Move the first segment, with its leading slash if any, to the output.
            let start = usize::from(input.starts_with('/'));
            let end = input[start..].find('/').map_or(input.len(), |i| start + i);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }
    output
}

// Removes the last segment and the slash before it, if any.
fn remove_last_segment(output: &mut String) {
    let i = output.rfind('/').unwrap_or(0);
    output.truncate(i);
}

/// Merges a relative-path reference with the path of the base,
/// as described in [Section 5.2.3 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.3).
///
/// An empty base path merges to `"/" + ref_path`. Otherwise everything in
/// the base path up to and including its last `/` is kept, which is
/// nothing if the base path has no `/`.
///
/// # Examples
///
/// ```
/// use canon_uri::resolve::merge_paths;
///
/// assert_eq!(merge_paths("/b/c/d;p", "g"), "/b/c/g");
/// assert_eq!(merge_paths("", "g"), "/g");
/// assert_eq!(merge_paths("a", "g"), "g");
/// ```
#[must_use]
pub fn merge_paths(base_path: &str, ref_path: &str) -> String {
    let prefix = if base_path.is_empty() {
        "/"
    } else {
        base_path.rfind('/').map_or("", |i| &base_path[..=i])
    };

    let mut buf = String::with_capacity(prefix.len() + ref_path.len());
    buf.push_str(prefix);
    buf.push_str(ref_path);
    buf
}

/// Resolves a reference against a base.
///
/// The base should have a scheme; if it has none, neither will the result.
/// The base's fragment is ignored.
pub(crate) fn resolve(base: Ref<'_, '_>, r: Ref<'_, '_>) -> (String, Meta) {
    let (t_scheme, t_authority, t_path, t_query);

    let r_path = r.path();
    let r_query = r.query();

    if let Some(r_scheme) = r.scheme() {
        t_scheme = Some(r_scheme);
        t_authority = r.authority();
        t_path = Cow::Owned(remove_dot_segments(r_path));
        t_query = r_query;
    } else if r.has_authority() {
        t_scheme = base.scheme();
        t_authority = r.authority();
        t_path = Cow::Owned(remove_dot_segments(r_path));
        t_query = r_query;
    } else if r_path.is_empty() {
        t_scheme = base.scheme();
        t_authority = base.authority();
        t_path = Cow::Borrowed(base.path());
        t_query = r_query.or(base.query());
    } else if r_path.starts_with('/') {
        t_scheme = base.scheme();
        t_authority = base.authority();
        t_path = Cow::Owned(remove_dot_segments(r_path));
        t_query = r_query;
    } else {
        t_scheme = base.scheme();
        t_authority = base.authority();
        t_path = Cow::Owned(remove_dot_segments(&merge_paths(base.path(), r_path)));
        t_query = r_query;
    }

    compose(&Parts {
        scheme: t_scheme,
        authority: t_authority.map(AuthParts::from),
        path: &t_path,
        query: t_query,
        fragment: r.fragment(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_segments() {
        let cases = [
            ("", ""),
            (".", ""),
            ("..", ""),
            ("...", ""),
            ("./", ""),
            ("../", ""),
            ("/.", "/"),
            ("/..", "/"),
            ("/./g", "/g"),
            ("/../g", "/g"),
            ("a/..", "/"),
            ("/a/b/..", "/a/"),
            ("/a/b/../", "/a/"),
            ("/a/./b/", "/a/b/"),
            ("/a/.../b", "/a/.../b"),
            ("/a/..b/c", "/a/..b/c"),
            ("/b/c/../../../g", "/g"),
            ("//a//..", "//a/"),
        ];
        for (input, expected) in cases {
            assert_eq!(remove_dot_segments(input), expected, "{input}");
        }
    }

    #[test]
    fn dot_segments_idempotent() {
        for input in ["/a/b/../c/./d", "../../x", "/./../y/", "a/./b/../../c", "//x/.."] {
            let once = remove_dot_segments(input);
            assert_eq!(remove_dot_segments(&once), once, "{input}");
        }
    }
}
