//! Error types.

use core::fmt;

/// The closed set of failure categories.
///
/// Every error type in this crate maps to exactly one category,
/// which an outer error-reporting layer may translate into its own codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input does not match the URI grammar.
    Syntax,
    /// A `%` not followed by two hexadecimal digits was found while decoding.
    MalformedEncoding,
    /// Syntax-based normalization tried to ascend above the root of a path.
    PathEscapesRoot,
    /// A builder was asked to assemble an invalid combination of components.
    BuilderInvariantViolation,
}

/// What went wrong in a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A `%` is not followed by two hexadecimal digits.
    ///
    /// The index is that of the `%`.
    InvalidOctet,
    /// A byte cannot appear where it was found.
    ///
    /// The index is that of the byte, or the input length when the input
    /// ends too early.
    UnexpectedChar,
    /// A bracketed host is neither an IPv6 address nor an IPvFuture literal.
    ///
    /// The index is that of the `[`.
    InvalidIpLiteral,
}

/// A string that is not a URI reference, with the position where
/// parsing stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Byte offset into the input.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// What went wrong.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns [`ErrorCategory::Syntax`].
    #[inline]
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Syntax
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ParseErrorKind::InvalidOctet => "malformed percent-encoded octet",
            ParseErrorKind::UnexpectedChar => "character not allowed here",
            ParseErrorKind::InvalidIpLiteral => "malformed IP literal",
        };
        write!(f, "{what} (byte {})", self.index)
    }
}

/// A `%` in a string being decoded does not start a triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeError {
    pub(crate) index: usize,
}

impl DecodeError {
    /// Returns the index of the `%` that does not begin a well-formed triplet.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns [`ErrorCategory::MalformedEncoding`].
    #[inline]
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::MalformedEncoding
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed percent-encoded octet (byte {})", self.index)
    }
}

/// Failure of syntax-based normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    /// A `..` segment had no parent segment to remove.
    PathEscapesRoot {
        /// Zero-based index of the offending segment among the `/`-separated
        /// segments of the path.
        segment: usize,
    },
}

impl NormalizeError {
    /// Returns [`ErrorCategory::PathEscapesRoot`].
    #[inline]
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathEscapesRoot { .. } => ErrorCategory::PathEscapesRoot,
        }
    }
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathEscapesRoot { segment } => {
                write!(f, "path segment {segment} ascends above the root")
            }
        }
    }
}

/// Why a [`Builder`](crate::Builder) refused to produce a URI reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// The scheme is not a valid scheme name.
    InvalidScheme,
    /// A scheme was set with no other component.
    SchemeOnly,
    /// User information or a port was set without a host.
    AuthorityWithoutHost,
    /// The host begins with `[` but is not a valid IP literal.
    InvalidIpLiteral,
    /// A non-empty path not starting with `/` was set along with a host.
    RootlessPathWithAuthority,
    /// The path would be mistaken for another component when reparsed:
    /// it starts with `//` without a host, or its first segment contains `:`
    /// without a scheme or a host.
    AmbiguousPath,
    /// The assembled string failed to parse.
    Syntax(ParseError),
}

impl BuildError {
    /// Returns the category of the error.
    ///
    /// A reparse failure is [`ErrorCategory::Syntax`]; everything else is
    /// [`ErrorCategory::BuilderInvariantViolation`].
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax(e) => e.category(),
            _ => ErrorCategory::BuilderInvariantViolation,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidScheme => "invalid scheme name",
            Self::SchemeOnly => "a scheme requires at least one other component",
            Self::AuthorityWithoutHost => "user information or port set without a host",
            Self::InvalidIpLiteral => "invalid IP literal host",
            Self::RootlessPathWithAuthority => "path must be empty or start with '/' when a host is set",
            Self::AmbiguousPath => "path would be mistaken for another component",
            Self::Syntax(e) => return write!(f, "failed to parse the built string: {e}"),
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
mod std_impls {
    use super::*;
    use std::error::Error;

    impl Error for ParseError {}
    impl Error for DecodeError {}
    impl Error for NormalizeError {}

    impl Error for BuildError {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            match self {
                Self::Syntax(e) => Some(e),
                _ => None,
            }
        }
    }
}
