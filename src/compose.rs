//! Reassembly of a URI reference from its components.

use crate::internal::{AuthLayout, AuthRef, HostKind, Meta, Ref};
use alloc::string::String;
use core::num::NonZeroUsize;

#[derive(Clone, Copy, Default)]
pub(crate) struct Parts<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<AuthParts<'a>>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

#[derive(Clone, Copy, Default)]
pub(crate) struct AuthParts<'a> {
    pub userinfo: Option<&'a str>,
    pub host: &'a str,
    pub host_kind: HostKind,
    pub port: Option<&'a str>,
}

impl<'a> From<AuthRef<'a>> for AuthParts<'a> {
    fn from(auth: AuthRef<'a>) -> Self {
        Self {
            userinfo: auth.userinfo(),
            host: auth.host(),
            host_kind: auth.meta.host_kind,
            port: auth.port(),
        }
    }
}

impl<'a> From<Ref<'a, '_>> for Parts<'a> {
    fn from(r: Ref<'a, '_>) -> Self {
        Self {
            scheme: r.scheme(),
            authority: r.authority().map(AuthParts::from),
            path: r.path(),
            query: r.query(),
            fragment: r.fragment(),
        }
    }
}

enum PathGuard {
    None,
    // Keeps a path starting with "//" from being read as an authority.
    DotSlash,
    // Keeps a colon in the first segment from being read as a scheme delimiter.
    DotSegment,
}

impl Parts<'_> {
    fn path_guard(&self) -> PathGuard {
        if self.authority.is_some() {
            return PathGuard::None;
        }
        if self.path.starts_with("//") {
            return PathGuard::DotSlash;
        }
        if self.scheme.is_none() {
            let first_seg = self.path.split('/').next().unwrap_or_default();
            if first_seg.contains(':') {
                return PathGuard::DotSegment;
            }
        }
        PathGuard::None
    }

    fn len(&self) -> usize {
        let mut len = self.path.len() + 2;
        if let Some(scheme) = self.scheme {
            len += scheme.len() + 1;
        }
        if let Some(auth) = self.authority {
            len += 2 + auth.host.len();
            len += auth.userinfo.map_or(0, |s| s.len() + 1);
            len += auth.port.map_or(0, |s| s.len() + 1);
        }
        len += self.query.map_or(0, |s| s.len() + 1);
        len += self.fragment.map_or(0, |s| s.len() + 1);
        len
    }
}

/// Writes `scheme ":" ["//" authority] path ["?" query] ["#" fragment]`,
/// omitting the punctuation of every absent component, and returns the
/// string along with its component ranges.
///
/// For components taken from a parsed URI reference the output is byte-for-byte
/// the original string. Otherwise, a path that could be misread is prefixed
/// with a dot segment so that the output always parses back into the same parts.
pub(crate) fn compose(parts: &Parts<'_>) -> (String, Meta) {
    let mut buf = String::with_capacity(parts.len());
    let mut meta = Meta::default();

    if let Some(scheme) = parts.scheme {
        buf.push_str(scheme);
        meta.scheme_len = NonZeroUsize::new(buf.len());
        buf.push(':');
    }

    if let Some(auth) = parts.authority {
        buf.push_str("//");
        if let Some(userinfo) = auth.userinfo {
            buf.push_str(userinfo);
            buf.push('@');
        }
        let host_start = buf.len();
        buf.push_str(auth.host);
        meta.auth = Some(AuthLayout {
            host_range: (host_start, buf.len()),
            host_kind: auth.host_kind,
        });
        if let Some(port) = auth.port {
            buf.push(':');
            buf.push_str(port);
        }
    }

    meta.path_range.0 = buf.len();
    match parts.path_guard() {
        PathGuard::None => {}
        PathGuard::DotSlash => buf.push_str("/."),
        PathGuard::DotSegment => buf.push_str("./"),
    }
    buf.push_str(parts.path);
    meta.path_range.1 = buf.len();

    if let Some(query) = parts.query {
        buf.push('?');
        buf.push_str(query);
        meta.query_end = NonZeroUsize::new(buf.len());
    }

    if let Some(fragment) = parts.fragment {
        buf.push('#');
        buf.push_str(fragment);
    }

    (buf, meta)
}
