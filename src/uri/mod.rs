mod fmt;

use crate::{
    build::Builder,
    component::{Authority, Scheme},
    error::{NormalizeError, ParseError},
    internal::{Meta, Parse, Ref},
    log::trace,
    normalize::{self, ComparisonLevel},
    pct_enc::EStr,
    resolve,
};
use alloc::{
    borrow::{Cow, ToOwned},
    string::String,
};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{cmp::Ordering, hash, str::FromStr};

/// A parsed [URI reference] (RFC 3986), absolute or relative.
///
/// A `Uri` may carry any combination of components, the scheme included,
/// so relative references are `Uri`s too. Its value is either borrowed
/// (`Uri<&str>`) or owned (`Uri<String>`); in both cases the components are
/// located once when parsing and read back as subslices afterwards.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
///
/// # Comparison
///
/// `Uri`s are compared after [syntax-based normalization](ComparisonLevel::SyntaxBased),
/// so `HTTP://a/%7e` equals `http://a/~`. A `Uri` whose path cannot be normalized
/// is compared by its string instead. Use [`compare`](Self::compare) to choose
/// another level, or compare [`as_str`](Self::as_str) for byte equality.
///
/// # Examples
///
/// ```
/// use canon_uri::Uri;
///
/// let uri = Uri::parse("https://alice@files.example.net:8443/docs/a%20b.txt?v=2#top")?;
///
/// assert_eq!(uri.scheme().unwrap().as_str(), "https");
/// let auth = uri.authority().unwrap();
/// assert_eq!(auth.userinfo().map(|u| u.as_str()), Some("alice"));
/// assert_eq!((auth.host(), auth.port()), ("files.example.net", Some("8443")));
/// assert_eq!(uri.path().decode_utf8_lossy(), "/docs/a b.txt");
/// assert_eq!(uri.query().unwrap(), "v=2");
/// assert_eq!(uri.fragment().unwrap(), "top");
/// # Ok::<_, canon_uri::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Uri<T> {
    val: T,
    meta: Meta,
}

impl<T> Uri<T> {
    pub(crate) fn new(val: T, meta: Meta) -> Self {
        Self { val, meta }
    }

    /// Parses a borrowed or owned string as a URI reference.
    ///
    /// A `&str` gives a `Uri<&str>` and fails with a [`ParseError`]. A
    /// `String` gives a `Uri<String>` and fails with the error paired with
    /// the string handed back.
    ///
    /// # Errors
    ///
    /// Fails unless the entire input matches [`URI-reference`][abnf].
    ///
    /// [abnf]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
    pub fn parse<I>(input: I) -> Result<Self, I::Err>
    where
        I: Parse<Val = T>,
    {
        input.parse()
    }
}

impl Uri<String> {
    /// Starts assembling a URI reference from its components.
    #[inline]
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Gets a `Uri<&str>` viewing the same string.
    #[allow(clippy::should_implement_trait)]
    #[inline]
    #[must_use]
    pub fn borrow(&self) -> Uri<&str> {
        Uri {
            val: &self.val,
            meta: self.meta,
        }
    }

    /// Gives up the parsed layout and returns the string.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.val
    }

    fn from_pair((val, meta): (String, Meta)) -> Self {
        Self { val, meta }
    }
}

impl Uri<&str> {
    /// Copies the string into an owned `Uri`, keeping the parsed layout.
    #[inline]
    #[must_use]
    pub fn to_owned(&self) -> Uri<String> {
        Uri {
            val: self.val.to_owned(),
            meta: self.meta,
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    fn make_ref(&'i self) -> Ref<'o, 'i> {
        Ref::new(self.as_str(), &self.meta)
    }

    /// The full string, exactly as parsed.
    #[must_use]
    pub fn as_str(&'i self) -> &'o str {
        self.val.borrow_or_share()
    }

    /// The scheme, or `None` for a relative reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{component::Scheme, Uri};
    ///
    /// const FTP: &Scheme = Scheme::new_or_panic("ftp");
    ///
    /// assert_eq!(Uri::parse("FTP://mirror.example/pub")?.scheme(), Some(FTP));
    /// assert_eq!(Uri::parse("//mirror.example/pub")?.scheme(), None);
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o Scheme> {
        self.make_ref().scheme().map(Scheme::new_validated)
    }

    /// The authority, present whenever the hierarchical part starts with `//`.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("news://nntp.example/")?.authority().unwrap().host(), "nntp.example");
    /// // No "//", so "nntp.example" is part of the path here.
    /// assert!(Uri::parse("news:nntp.example")?.authority().is_none());
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        self.make_ref().authority().map(Authority::new)
    }

    /// Checks whether an authority component is present.
    ///
    /// This is true whenever `//` follows the scheme (or starts a relative
    /// reference), even if the authority is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// assert!(Uri::parse("file:///etc/hosts")?.has_authority());
    /// assert!(!Uri::parse("file:/etc/hosts")?.has_authority());
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.meta.auth.is_some()
    }

    /// The path, which is never absent but may be empty.
    #[must_use]
    pub fn path(&'i self) -> &'o EStr {
        EStr::new_validated(self.make_ref().path())
    }

    /// Returns an iterator over the path segments, separated by `/`.
    ///
    /// A leading `/` does not start an empty segment, while every other `/`
    /// does. An empty path yields a single empty segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a//b/")?;
    /// assert!(uri.path_segments().eq(["a", "", "b", ""]));
    ///
    /// let uri = Uri::parse("a/b")?;
    /// assert!(uri.path_segments().eq(["a", "b"]));
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    pub fn path_segments(&'i self) -> impl Iterator<Item = &'o EStr> {
        let path = self.make_ref().path();
        let path = path.strip_prefix('/').unwrap_or(path);
        EStr::new_validated(path).split('/')
    }

    /// The query after `?`, without the `?`.
    ///
    /// An empty query is told apart from a missing one.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// let query = |s| Uri::parse(s).unwrap().query().map(|q| q.as_str());
    ///
    /// assert_eq!(query("/search?q=rust&page=2#r"), Some("q=rust&page=2"));
    /// assert_eq!(query("/search?"), Some(""));
    /// assert_eq!(query("/search#?"), None);
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn query(&'i self) -> Option<&'o EStr> {
        self.make_ref().query().map(EStr::new_validated)
    }

    /// The fragment after `#`, without the `#`.
    #[must_use]
    pub fn fragment(&'i self) -> Option<&'o EStr> {
        self.make_ref().fragment().map(EStr::new_validated)
    }
}

impl<T: Bos<str>> Uri<T> {
    /// Checks whether the URI reference is [absolute], i.e., has a scheme
    /// and no fragment.
    ///
    /// Note that this is not the opposite of [`is_relative`](Self::is_relative).
    ///
    /// [absolute]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.3
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// assert!(Uri::parse("http://example.com/")?.is_absolute());
    /// assert!(!Uri::parse("http://example.com/#title1")?.is_absolute());
    /// assert!(!Uri::parse("/path/to/file")?.is_absolute());
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.meta.scheme_len.is_some() && self.make_ref().fragment().is_none()
    }

    /// Checks whether the URI reference is a [relative reference], i.e.,
    /// has no scheme.
    ///
    /// [relative reference]: https://datatracker.ietf.org/doc/html/rfc3986#section-4.2
    #[inline]
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.meta.scheme_len.is_none()
    }

    /// Checks whether the URI reference is opaque, i.e., has a scheme,
    /// no authority and a path not starting with `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::Uri;
    ///
    /// assert!(Uri::parse("mailto:John.Doe@example.com")?.is_opaque());
    /// assert!(Uri::parse("urn:isbn:0451450523")?.is_opaque());
    /// assert!(!Uri::parse("file:/etc/hosts")?.is_opaque());
    /// assert!(!Uri::parse("a/b")?.is_opaque());
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.meta.scheme_len.is_some()
            && !self.has_authority()
            && !self.make_ref().path().starts_with('/')
    }

    /// Normalizes the URI reference at the given level.
    ///
    /// At [`ComparisonLevel::StringComparison`] the result equals the input.
    /// At [`ComparisonLevel::SyntaxBased`]:
    ///
    /// - The scheme is lower-cased.
    /// - In user information, registered names, path, query and fragment,
    ///   the hexadecimal digits of percent-encoded octets are upper-cased and
    ///   octets of unreserved characters are decoded.
    /// - Dot segments and repeated slashes are removed from the path,
    ///   and an empty path becomes `/`.
    ///
    /// The letter case of the host is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `..` segment would ascend above the root of the path.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{normalize::ComparisonLevel, Uri};
    ///
    /// let uri = Uri::parse("HTTP://www.example.com/a/../b/%7efoo/%2a")?;
    /// let normalized = uri.normalize(ComparisonLevel::SyntaxBased).unwrap();
    /// assert_eq!(normalized.as_str(), "http://www.example.com/b/~foo/%2A");
    ///
    /// let uri = Uri::parse("http://www.example.com/..")?;
    /// assert!(uri.normalize(ComparisonLevel::SyntaxBased).is_err());
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    pub fn normalize(&self, level: ComparisonLevel) -> Result<Uri<String>, NormalizeError> {
        normalize::normalize(self.make_ref(), level).map(Uri::from_pair)
    }

    /// Resolves a reference against this URI as the base and returns the target.
    ///
    /// This applies the algorithm of
    /// [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-5.2)
    /// with no deviations: excess `..` segments are dropped silently.
    /// The base's fragment is ignored. The target is then normalized at `level`.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if normalizing the target fails, which cannot
    /// happen at [`ComparisonLevel::StringComparison`].
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{normalize::ComparisonLevel, Uri};
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q")?;
    /// let level = ComparisonLevel::StringComparison;
    ///
    /// let target = base.resolve(&Uri::parse("g")?, level).unwrap();
    /// assert_eq!(target.as_str(), "http://a/b/c/g");
    ///
    /// let target = base.resolve(&Uri::parse("../../../g")?, level).unwrap();
    /// assert_eq!(target.as_str(), "http://a/g");
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    pub fn resolve<U: Bos<str>>(
        &self,
        reference: &Uri<U>,
        level: ComparisonLevel,
    ) -> Result<Uri<String>, NormalizeError> {
        let target = Uri::from_pair(resolve::resolve(self.make_ref(), reference.make_ref()));
        match level {
            ComparisonLevel::StringComparison => Ok(target),
            ComparisonLevel::SyntaxBased => target.normalize(level),
        }
    }

    /// Compares two URI references after normalizing both at the given level.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either side fails to normalize.
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_uri::{normalize::ComparisonLevel, Uri};
    /// use std::cmp::Ordering;
    ///
    /// let a = Uri::parse("HTTP://example.com/%7Efoo")?;
    /// let b = Uri::parse("http://example.com/~foo")?;
    ///
    /// assert_eq!(a.compare(&b, ComparisonLevel::SyntaxBased), Ok(Ordering::Equal));
    /// assert_ne!(a.compare(&b, ComparisonLevel::StringComparison), Ok(Ordering::Equal));
    /// # Ok::<_, canon_uri::ParseError>(())
    /// ```
    pub fn compare<U: Bos<str>>(
        &self,
        other: &Uri<U>,
        level: ComparisonLevel,
    ) -> Result<Ordering, NormalizeError> {
        if level == ComparisonLevel::StringComparison {
            return Ok(self.as_str().cmp(other.as_str()));
        }
        let a = self.normalize(level)?;
        let b = other.normalize(level)?;
        Ok(a.as_str().cmp(b.as_str()))
    }

    // The string that equality, hashing and ordering are based on.
    fn cmp_key(&self) -> Cow<'_, str> {
        match normalize::normalize(self.make_ref(), ComparisonLevel::SyntaxBased) {
            Ok((val, _)) => Cow::Owned(val),
            Err(_e) => {
                trace!("comparing {:?} by its string: {}", self.as_str(), _e);
                Cow::Borrowed(self.as_str())
            }
        }
    }
}

impl<T: Bos<str>, U: Bos<str>> PartialEq<Uri<U>> for Uri<T> {
    fn eq(&self, other: &Uri<U>) -> bool {
        self.cmp_key() == other.cmp_key()
    }
}

impl<T: Bos<str>> PartialEq<str> for Uri<T> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for str {
    fn eq(&self, other: &Uri<T>) -> bool {
        self == other.as_str()
    }
}

impl<T: Bos<str>> PartialEq<&str> for Uri<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: Bos<str>> PartialEq<Uri<T>> for &str {
    fn eq(&self, other: &Uri<T>) -> bool {
        *self == other.as_str()
    }
}

impl<T: Bos<str>> Eq for Uri<T> {}

impl<T: Bos<str>> hash::Hash for Uri<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.cmp_key().hash(state);
    }
}

impl<T: Bos<str>> PartialOrd for Uri<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Bos<str>> Ord for Uri<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_key().cmp(&other.cmp_key())
    }
}

impl<T: Bos<str>> AsRef<str> for Uri<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = ParseError;

    /// Equivalent to [`parse`](Self::parse).
    #[inline]
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri<String> {
    type Error = (ParseError, String);

    /// Equivalent to [`parse`](Self::parse).
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl<'a> From<Uri<&'a str>> for &'a str {
    /// Equivalent to [`as_str`](Uri::as_str).
    #[inline]
    fn from(value: Uri<&'a str>) -> &'a str {
        value.val
    }
}

impl From<Uri<String>> for String {
    /// Equivalent to [`into_string`](Uri::into_string).
    #[inline]
    fn from(value: Uri<String>) -> String {
        value.val
    }
}

impl From<Uri<&str>> for Uri<String> {
    /// Equivalent to [`to_owned`](Uri::to_owned).
    #[inline]
    fn from(value: Uri<&str>) -> Self {
        value.to_owned()
    }
}

impl FromStr for Uri<String> {
    type Err = ParseError;

    /// Equivalent to `Uri::parse(s).map(|r| r.to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned())
    }
}
