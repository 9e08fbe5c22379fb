//! Module for normalization.
//!
//! See [Section 6 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-6)
//! for the comparison ladder these levels are taken from.

use crate::{
    compose::{compose, AuthParts, Parts},
    error::NormalizeError,
    internal::{HostKind, Meta, Ref},
    parser,
    pct_enc::{decode_unreserved_triplets, uppercase_triplets},
};
use alloc::{borrow::Cow, string::String, vec::Vec};

/// How much normalization to apply before comparing URI references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComparisonLevel {
    /// Byte-for-byte comparison; normalization leaves the string unchanged.
    StringComparison,
    /// Syntax-based normalization.
    ///
    /// - The scheme is lower-cased.
    /// - In user information, registered names, path, query and fragment,
    ///   the hexadecimal digits of percent-encoded triplets are upper-cased
    ///   and triplets of unreserved bytes are decoded.
    /// - The path has dot segments and repeated slashes removed, see
    ///   [`normalize_path_segments`].
    ///
    /// Letter case in the host and IP literals are left as parsed.
    #[default]
    SyntaxBased,
}

/// Normalizes a path at the given level.
///
/// At [`ComparisonLevel::StringComparison`] the path is returned unchanged.
///
/// # Errors
///
/// Returns `Err` if a `..` segment would ascend above the root of the path.
///
/// # Examples
///
/// ```
/// use canon_uri::normalize::{normalize_path, ComparisonLevel};
///
/// let level = ComparisonLevel::SyntaxBased;
/// assert_eq!(normalize_path("/%7efoo/./%2e%2E/bar", level).unwrap(), "/bar");
/// assert!(normalize_path("/..", level).is_err());
/// ```
pub fn normalize_path(path: &str, level: ComparisonLevel) -> Result<Cow<'_, str>, NormalizeError> {
    match level {
        ComparisonLevel::StringComparison => Ok(Cow::Borrowed(path)),
        ComparisonLevel::SyntaxBased => {
            let path = normalize_encoding(path);
            normalize_path_segments(&path).map(Cow::Owned)
        }
    }
}

/// Normalizes the segments of a path.
///
/// - `.` segments are dropped.
/// - Each `..` segment removes the segment before it.
/// - Empty segments from repeated slashes are collapsed, while a leading
///   and a trailing slash are each kept if present.
/// - An empty result becomes `/`.
///
/// Triplets are not decoded here, so `%2E` is not a dot segment;
/// [`normalize_path`] decodes them first.
///
/// # Errors
///
/// Returns `Err` at the first `..` segment that has no parent segment to remove.
/// Unlike [`remove_dot_segments`](crate::resolve::remove_dot_segments),
/// this never clamps at the root.
///
/// # Examples
///
/// ```
/// use canon_uri::{normalize::normalize_path_segments, NormalizeError};
///
/// assert_eq!(normalize_path_segments("/a/./b//c/../").unwrap(), "/a/b/");
/// assert_eq!(normalize_path_segments("").unwrap(), "/");
/// assert_eq!(
///     normalize_path_segments("/a/../..").unwrap_err(),
///     NormalizeError::PathEscapesRoot { segment: 3 },
/// );
/// ```
pub fn normalize_path_segments(path: &str) -> Result<String, NormalizeError> {
    let mut segs: Vec<&str> = Vec::new();

    for (i, seg) in path.split('/').enumerate() {
        match seg {
            "." => {}
            ".." => {
                // The first segment is the root (or the start of a relative path)
                // and can never be removed.
                if segs.len() < 2 {
                    return Err(NormalizeError::PathEscapesRoot { segment: i });
                }
                segs.pop();
            }
            _ => segs.push(seg),
        }
    }

    let leading_slash = segs.first().is_some_and(|s| s.is_empty());
    let trailing_slash = segs.len() > usize::from(leading_slash) && segs.last().is_some_and(|s| s.is_empty());

    let mut buf = String::with_capacity(path.len());
    if leading_slash {
        buf.push('/');
    }
    let inner_start = buf.len();
    for seg in segs.into_iter().filter(|s| !s.is_empty()) {
        if buf.len() > inner_start {
            buf.push('/');
        }
        buf.push_str(seg);
    }
    if trailing_slash && buf.len() > inner_start {
        buf.push('/');
    }

    if buf.is_empty() {
        buf.push('/');
    }
    Ok(buf)
}

// Upper-cases triplets, then decodes those of unreserved bytes.
fn normalize_encoding(s: &str) -> Cow<'_, str> {
    match uppercase_triplets(s) {
        Cow::Borrowed(s) => decode_unreserved_triplets(s),
        Cow::Owned(s) => Cow::Owned(decode_unreserved_triplets(&s).into_owned()),
    }
}

pub(crate) fn normalize(r: Ref<'_, '_>, level: ComparisonLevel) -> Result<(String, Meta), NormalizeError> {
    if level == ComparisonLevel::StringComparison {
        return Ok(compose(&r.into()));
    }

    let path = normalize_path(r.path(), level)?;
    let scheme = r.scheme().map(str::to_ascii_lowercase);

    let authority = r.authority();
    let userinfo = authority.and_then(|auth| auth.userinfo()).map(normalize_encoding);
    let host = authority.map(|auth| match auth.meta.host_kind {
        HostKind::RegName => normalize_encoding(auth.host()),
        _ => Cow::Borrowed(auth.host()),
    });

    let query = r.query().map(normalize_encoding);
    let fragment = r.fragment().map(normalize_encoding);

    let parts = Parts {
        scheme: scheme.as_deref(),
        authority: authority.zip(host.as_deref()).map(|(auth, host)| AuthParts {
            userinfo: userinfo.as_deref(),
            host,
            host_kind: match auth.meta.host_kind {
                // Decoding may have turned a registered name into an IPv4 address.
                HostKind::RegName => parser::classify_host(host.as_bytes()),
                meta => meta,
            },
            port: auth.port(),
        }),
        path: &path,
        query: query.as_deref(),
        fragment: fragment.as_deref(),
    };
    Ok(compose(&parts))
}
