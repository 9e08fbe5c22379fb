//! Percent-encoding utilities.
//!
//! The functions in this module work on percent-encoded triplets
//! (`%` followed by two hexadecimal digits), as defined in
//! [Section 2.1 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-2.1).

pub mod table;

pub use table::Table;

use crate::error::DecodeError;
use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{fmt, hash};
use ref_cast::{ref_cast_custom, RefCastCustom};

const HEX_DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Returns `true` if the byte is unreserved, i.e., ALPHA, DIGIT, `-`, `.`, `_`, or `~`.
///
/// Unreserved bytes carry no delimiter meaning, so they may be represented
/// either encoded or literally without changing what a URI identifies.
#[inline]
#[must_use]
pub fn is_unreserved(x: u8) -> bool {
    table::UNRESERVED.allows(x)
}

#[inline]
const fn hex_value(x: u8) -> Option<u8> {
    match x {
        b'0'..=b'9' => Some(x - b'0'),
        b'A'..=b'F' => Some(x - b'A' + 10),
        b'a'..=b'f' => Some(x - b'a' + 10),
        _ => None,
    }
}

#[inline]
fn decode_octet(hi: u8, lo: u8) -> Option<u8> {
    Some((hex_value(hi)? << 4) | hex_value(lo)?)
}

/// Decodes the two hexadecimal digits following a `%` into a byte.
///
/// Both upper- and lower-case digits are accepted.
///
/// # Errors
///
/// Returns `Err` if either digit is not hexadecimal. The error index is
/// always `0`, i.e., relative to the (implied) `%`.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::decode_triplet;
///
/// assert_eq!(decode_triplet([b'2', b'a']), Ok(b'*'));
/// assert!(decode_triplet([b'2', b'g']).is_err());
/// ```
pub fn decode_triplet(digits: [u8; 2]) -> Result<u8, DecodeError> {
    decode_octet(digits[0], digits[1]).ok_or(DecodeError { index: 0 })
}

/// Appends the percent-encoded form of a byte, with upper-case digits.
pub(crate) fn push_pct_encoded(buf: &mut String, x: u8) {
    buf.push('%');
    buf.push(HEX_DIGITS_UPPER[(x >> 4) as usize] as char);
    buf.push(HEX_DIGITS_UPPER[(x & 0x0f) as usize] as char);
}

// Returns the byte index of the next well-formed triplet at or after `from`,
// along with its decoded value.
fn next_triplet(s: &[u8], mut from: usize) -> Option<(usize, u8)> {
    while let Some(i) = s[from..].iter().position(|&x| x == b'%').map(|i| i + from) {
        if let [hi, lo, ..] = s[i + 1..] {
            if let Some(x) = decode_octet(hi, lo) {
                return Some((i, x));
            }
        }
        from = i + 1;
    }
    None
}

/// Rewrites every percent-encoded triplet so that both of its hexadecimal
/// digits are upper-case, leaving all other bytes untouched.
///
/// A `%` not followed by two hexadecimal digits is left as is.
/// The operation is idempotent and borrows the input when nothing changes.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::uppercase_triplets;
///
/// assert_eq!(uppercase_triplets("/%7efoo%2a"), "/%7Efoo%2A");
/// assert_eq!(uppercase_triplets("abc"), "abc");
/// ```
#[must_use]
pub fn uppercase_triplets(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let mut buf: Option<String> = None;
    let mut copied = 0;
    let mut from = 0;

    while let Some((i, _)) = next_triplet(bytes, from) {
        let (hi, lo) = (bytes[i + 1], bytes[i + 2]);
        if hi.is_ascii_lowercase() || lo.is_ascii_lowercase() {
            let buf = buf.get_or_insert_with(|| String::with_capacity(s.len()));
            buf.push_str(&s[copied..i]);
            buf.push('%');
            buf.push(hi.to_ascii_uppercase() as char);
            buf.push(lo.to_ascii_uppercase() as char);
            copied = i + 3;
        }
        from = i + 3;
    }

    match buf {
        Some(mut buf) => {
            buf.push_str(&s[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(s),
    }
}

/// Decodes every percent-encoded triplet whose byte is [unreserved](is_unreserved),
/// leaving all other triplets encoded exactly as they were.
///
/// This is the one decoding step that may be performed unconditionally,
/// as it cannot change the syntactic role of any byte.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::decode_unreserved_triplets;
///
/// assert_eq!(decode_unreserved_triplets("%7Efoo%2F%41"), "~foo%2FA");
/// ```
#[must_use]
pub fn decode_unreserved_triplets(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let mut buf: Option<String> = None;
    let mut copied = 0;
    let mut from = 0;

    while let Some((i, x)) = next_triplet(bytes, from) {
        if is_unreserved(x) {
            let buf = buf.get_or_insert_with(|| String::with_capacity(s.len()));
            buf.push_str(&s[copied..i]);
            buf.push(x as char);
            copied = i + 3;
        }
        from = i + 3;
    }

    match buf {
        Some(mut buf) => {
            buf.push_str(&s[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(s),
    }
}

/// Decodes every percent-encoded triplet in the string.
///
/// The output is raw bytes and may not be valid UTF-8.
///
/// # Errors
///
/// Returns `Err` if a `%` is not followed by two hexadecimal digits,
/// including a trailing incomplete triplet. The error index points to the `%`.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::percent_decode;
///
/// assert_eq!(percent_decode("a%20b%2F").unwrap(), &b"a b/"[..]);
/// assert_eq!(percent_decode("50%").unwrap_err().index(), 2);
/// ```
pub fn percent_decode(s: &str) -> Result<Cow<'_, [u8]>, DecodeError> {
    let bytes = s.as_bytes();
    let Some(first) = bytes.iter().position(|&x| x == b'%') else {
        return Ok(Cow::Borrowed(bytes));
    };

    let mut buf = Vec::with_capacity(bytes.len());
    buf.extend_from_slice(&bytes[..first]);

    let mut i = first;
    while i < bytes.len() {
        let x = bytes[i];
        if x == b'%' {
            let [hi, lo, ..] = bytes[i + 1..] else {
                return Err(DecodeError { index: i });
            };
            let Some(octet) = decode_octet(hi, lo) else {
                return Err(DecodeError { index: i });
            };
            buf.push(octet);
            i += 3;
        } else {
            buf.push(x);
            i += 1;
        }
    }
    Ok(Cow::Owned(buf))
}

/// Percent-encodes every byte of the string not allowed unencoded by the table.
///
/// A `%` in the input is always encoded, as the input is taken to be raw data.
///
/// # Examples
///
/// ```
/// use canon_uri::pct_enc::{encode, table::PATH};
///
/// assert_eq!(encode("/a b/50%", PATH), "/a%20b/50%25");
/// ```
#[must_use]
pub fn encode<'a>(s: &'a str, table: &Table) -> Cow<'a, str> {
    let bytes = s.as_bytes();
    let Some(first) = bytes.iter().position(|&x| !table.allows(x)) else {
        return Cow::Borrowed(s);
    };

    let mut buf = String::with_capacity(s.len() + 8);
    buf.push_str(&s[..first]);
    for &x in &bytes[first..] {
        if table.allows(x) {
            buf.push(x as char);
        } else {
            push_pct_encoded(&mut buf, x);
        }
    }
    Cow::Owned(buf)
}

/// Percent-encoded string slices.
///
/// Every `%` in an `EStr` is guaranteed to begin a well-formed triplet,
/// which makes decoding infallible.
///
/// # Examples
///
/// ```
/// use canon_uri::Uri;
///
/// let uri = Uri::parse("http://example.com/caf%C3%A9?q=a%20b")?;
/// assert_eq!(uri.path().decode_utf8_lossy(), "/café");
/// assert_eq!(uri.query().unwrap().decode(), &b"q=a b"[..]);
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &EStr;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static EStr = EStr::new_validated("");

    /// Converts a string slice to an `EStr` slice, returning `None`
    /// if any `%` does not begin a well-formed triplet.
    #[must_use]
    pub const fn new(s: &str) -> Option<&EStr> {
        if table::ANY_ENCODED.validate(s.as_bytes()) {
            Some(EStr::new_validated(s))
        } else {
            None
        }
    }

    /// Yields the underlying string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the slice is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the slice, borrowing it if no triplet is present.
    #[must_use]
    pub fn decode(&self) -> Cow<'_, [u8]> {
        match percent_decode(&self.inner) {
            Ok(bytes) => bytes,
            // Unreachable: every `%` begins a triplet.
            Err(_) => Cow::Borrowed(self.inner.as_bytes()),
        }
    }

    /// Decodes the slice and converts the result to a string,
    /// replacing invalid UTF-8 sequences with U+FFFD.
    #[must_use]
    pub fn decode_utf8_lossy(&self) -> Cow<'_, str> {
        match self.decode() {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => Cow::Owned(match String::from_utf8(bytes) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }),
        }
    }

    /// Returns an iterator over subslices separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is `%`.
    pub fn split(&self, delim: char) -> impl Iterator<Item = &EStr> + '_ {
        assert!(delim != '%', "cannot split on %");
        self.inner.split(delim).map(EStr::new_validated)
    }
}

impl AsRef<str> for EStr {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for EStr {
    #[inline]
    fn eq(&self, other: &EStr) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<&str> for EStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &self.inner == *other
    }
}

impl PartialEq<EStr> for str {
    #[inline]
    fn eq(&self, other: &EStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Default for &EStr {
    #[inline]
    fn default() -> Self {
        EStr::EMPTY
    }
}
