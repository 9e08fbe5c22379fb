#![allow(missing_debug_implementations)]

use crate::{error::ParseError, parser, uri::Uri};
use alloc::string::String;
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::NonZeroUsize,
};

pub trait Parse {
    type Val;
    type Err;

    fn parse(self) -> Result<Uri<Self::Val>, Self::Err>;
}

impl<'a> Parse for &'a str {
    type Val = &'a str;
    type Err = ParseError;

    fn parse(self) -> Result<Uri<&'a str>, ParseError> {
        parser::parse(self.as_bytes()).map(|meta| Uri::new(self, meta))
    }
}

impl Parse for String {
    type Val = String;
    type Err = (ParseError, String);

    fn parse(self) -> Result<Uri<String>, Self::Err> {
        match parser::parse(self.as_bytes()) {
            Ok(meta) => Ok(Uri::new(self, meta)),
            Err(e) => Err((e, self)),
        }
    }
}

/// Component ranges of a parsed URI reference, as byte offsets into its string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    // Also the index of the ':' ending the scheme.
    pub scheme_len: Option<NonZeroUsize>,
    pub auth: Option<AuthLayout>,
    pub path_range: (usize, usize),
    // Index of the '#' or the end of input, if a query is present.
    pub query_end: Option<NonZeroUsize>,
}

impl Meta {
    // Where the fragment delimiter would be.
    #[inline]
    pub fn fragment_delim(&self) -> usize {
        self.query_end.map_or(self.path_range.1, |i| i.get())
    }

    #[inline]
    pub fn auth_start(&self) -> usize {
        self.scheme_len.map_or(0, |i| i.get() + 1) + 2
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthLayout {
    pub host_range: (usize, usize),
    pub host_kind: HostKind,
}

/// The kind of a host, decided once by the parser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostKind {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    IpvFuture,
    #[default]
    RegName,
}

/// A borrowed view of a URI reference together with its component ranges.
#[derive(Clone, Copy)]
pub struct Ref<'v, 'm> {
    pub val: &'v str,
    pub meta: &'m Meta,
}

impl<'v, 'm> Ref<'v, 'm> {
    pub fn new(val: &'v str, meta: &'m Meta) -> Self {
        Self { val, meta }
    }

    pub fn scheme(self) -> Option<&'v str> {
        self.meta.scheme_len.map(|i| &self.val[..i.get()])
    }

    pub fn has_authority(self) -> bool {
        self.meta.auth.is_some()
    }

    pub fn authority(self) -> Option<AuthRef<'v>> {
        let auth = self.meta.auth?;
        Some(AuthRef {
            val: self.val,
            start: self.meta.auth_start(),
            end: self.meta.path_range.0,
            meta: auth,
        })
    }

    pub fn path(self) -> &'v str {
        let (start, end) = self.meta.path_range;
        &self.val[start..end]
    }

    pub fn query(self) -> Option<&'v str> {
        let end = self.meta.query_end?.get();
        Some(&self.val[self.meta.path_range.1 + 1..end])
    }

    pub fn fragment(self) -> Option<&'v str> {
        let i = self.meta.fragment_delim();
        (i < self.val.len()).then(|| &self.val[i + 1..])
    }
}

/// A borrowed view of an authority component.
///
/// Offsets are relative to the whole URI reference string `val`.
#[derive(Clone, Copy)]
pub struct AuthRef<'a> {
    pub val: &'a str,
    pub start: usize,
    pub end: usize,
    pub meta: AuthLayout,
}

impl<'a> AuthRef<'a> {
    pub fn as_str(self) -> &'a str {
        &self.val[self.start..self.end]
    }

    pub fn userinfo(self) -> Option<&'a str> {
        let host_start = self.meta.host_range.0;
        (host_start > self.start).then(|| &self.val[self.start..host_start - 1])
    }

    pub fn host(self) -> &'a str {
        let (start, end) = self.meta.host_range;
        &self.val[start..end]
    }

    pub fn port(self) -> Option<&'a str> {
        let host_end = self.meta.host_range.1;
        (host_end < self.end).then(|| &self.val[host_end + 1..self.end])
    }
}
