//! Typed views of the components of a parsed URI reference.

use crate::{
    internal::{AuthRef, HostKind},
    pct_enc::{table, EStr},
};
use core::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
    num::ParseIntError,
};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A validated scheme name, e.g. `http` or `svn+ssh`.
///
/// See [Section 3.1 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-3.1).
///
/// Two `Scheme`s are equal when they match ignoring ASCII case. The original
/// spelling is kept by [`as_str`](Self::as_str).
///
/// # Examples
///
/// ```
/// use canon_uri::{component::Scheme, Uri};
///
/// const MAILTO: &Scheme = Scheme::new_or_panic("mailto");
///
/// let uri = Uri::parse("MailTo:someone@example.org")?;
/// assert_eq!(uri.scheme(), Some(MAILTO));
/// assert_eq!(uri.scheme().unwrap().as_str(), "MailTo");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    pub(crate) const fn new_validated(name: &str) -> &Scheme;

    /// Checks and converts a string slice in a const context.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid scheme. Use [`new`](Self::new) to get
    /// an `Option` instead.
    #[must_use]
    pub const fn new_or_panic(name: &str) -> &Scheme {
        let Some(scheme) = Self::new(name) else {
            panic!("not a valid scheme name");
        };
        scheme
    }

    /// Checks and converts a string slice.
    ///
    /// A scheme is a letter followed by any number of letters, digits,
    /// `+`, `-` and `.`.
    #[must_use]
    pub const fn new(name: &str) -> Option<&Scheme> {
        match name.as_bytes() {
            [first, rest @ ..] if first.is_ascii_alphabetic() && table::SCHEME.validate(rest) => {
                Some(Scheme::new_validated(name))
            }
            _ => None,
        }
    }

    /// Yields the scheme as written.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Scheme) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for Scheme {}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authority of a URI reference: `[userinfo "@"] host [":" port]`.
///
/// See [Section 3.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-3.2).
/// Every accessor returns a slice of the string the reference was parsed from.
///
/// # Examples
///
/// ```
/// use canon_uri::Uri;
///
/// let uri = Uri::parse("ssh://git@[2001:db8::1]:2222/repo.git")?;
/// let auth = uri.authority().unwrap();
///
/// assert_eq!(auth.as_str(), "git@[2001:db8::1]:2222");
/// assert_eq!(auth.userinfo().unwrap(), "git");
/// assert_eq!(auth.host(), "[2001:db8::1]");
/// assert_eq!(auth.port(), Some("2222"));
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Authority<'a> {
    inner: AuthRef<'a>,
}

impl<'a> Authority<'a> {
    pub(crate) fn new(inner: AuthRef<'a>) -> Self {
        Self { inner }
    }

    /// Yields the whole authority, without the leading `//`.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.inner.as_str()
    }

    /// Returns the user information before `@`, if any.
    ///
    /// `Some("")` and `None` are told apart: `//@host` has empty
    /// user information while `//host` has none.
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a EStr> {
        self.inner.userinfo().map(EStr::new_validated)
    }

    /// Returns the host as written, brackets included for IP literals.
    ///
    /// The host of an authority may be empty, as in `file:///etc/hosts`.
    #[must_use]
    pub fn host(&self) -> &'a str {
        self.inner.host()
    }

    /// Returns the host as classified by the parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{component::Host, Uri};
    /// use std::net::Ipv4Addr;
    ///
    /// let host = |s| Uri::parse(s).unwrap().authority().unwrap().host_parsed();
    ///
    /// assert_eq!(host("//10.0.0.1"), Host::Ipv4(Ipv4Addr::new(10, 0, 0, 1)));
    /// assert!(matches!(host("//[fe80::1]"), Host::Ipv6(_)));
    /// assert_eq!(host("//[v9.abc]"), Host::IpvFuture("v9.abc"));
    /// // Not an IPv4 address, as the last octet is out of range.
    /// assert!(matches!(host("//10.0.0.256"), Host::RegName(_)));
    /// ```
    #[must_use]
    pub fn host_parsed(&self) -> Host<'a> {
        let host = self.host();
        match self.inner.meta.host_kind {
            HostKind::Ipv4(addr) => Host::Ipv4(addr),
            HostKind::Ipv6(addr) => Host::Ipv6(addr),
            HostKind::IpvFuture => Host::IpvFuture(&host[1..host.len() - 1]),
            HostKind::RegName => Host::RegName(EStr::new_validated(host)),
        }
    }

    /// Returns the digits after `:`, if a port is present.
    ///
    /// The digits are returned as written and may have leading zeros or
    /// a value too large for a port number.
    #[must_use]
    pub fn port(&self) -> Option<&'a str> {
        self.inner.port()
    }

    /// Parses the port as a `u16`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the port is present but greater than 65535.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// let port = |s| Uri::parse(s).unwrap().authority().unwrap().port_to_u16();
    ///
    /// assert_eq!(port("//h:0443"), Ok(Some(443)));
    /// assert_eq!(port("//h"), Ok(None));
    /// assert!(port("//h:70000").is_err());
    /// ```
    pub fn port_to_u16(&self) -> Result<Option<u16>, ParseIntError> {
        self.port().map(str::parse).transpose()
    }

    /// Checks whether `@` delimits user information.
    #[must_use]
    pub fn has_userinfo(&self) -> bool {
        self.inner.userinfo().is_some()
    }

    /// Checks whether `:` introduces a port.
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.inner.port().is_some()
    }
}

impl fmt::Debug for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("userinfo", &self.userinfo())
            .field("host", &self.host_parsed())
            .field("port", &self.port())
            .finish()
    }
}

impl fmt::Display for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a host, with the address already parsed for IP hosts.
///
/// The kind is decided when parsing: a host that reads as an IPv4 address
/// in full is `Ipv4` and never `RegName`.
///
/// See [Section 3.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Host<'a> {
    /// A dotted-decimal IPv4 address.
    Ipv4(Ipv4Addr),
    /// A bracketed IPv6 address.
    Ipv6(Ipv6Addr),
    /// A bracketed literal of a future IP version, given without the brackets.
    IpvFuture(&'a str),
    /// Any other host, possibly empty.
    ///
    /// ASCII letters in a registered name are case-insensitive, though
    /// normalization keeps them as written.
    RegName(&'a EStr),
}

impl fmt::Display for Host<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ipv4(addr) => addr.fmt(f),
            Host::Ipv6(addr) => write!(f, "[{addr}]"),
            Host::IpvFuture(lit) => write!(f, "[{lit}]"),
            Host::RegName(name) => name.fmt(f),
        }
    }
}
