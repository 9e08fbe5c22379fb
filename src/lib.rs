#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

//! An [RFC 3986] URI reference parser with syntax-based normalization
//! and reference resolution.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! See the documentation of [`Uri`] for more details.
//!
//! # Overview
//!
//! - [`Uri::parse`] validates a string against the `URI-reference` grammar
//!   once and records where each component lies. Components are read back
//!   as subslices of the input, without copying.
//! - [`Uri::normalize`] produces a canonical string for a [`ComparisonLevel`];
//!   equality, hashing and ordering of [`Uri`]s are based on it.
//! - [`Uri::resolve`] resolves a reference against a base as described in
//!   Section 5 of RFC 3986.
//! - [`Builder`] assembles a URI reference from raw components.
//! - [`pct_enc`] holds the percent-encoding utilities shared by all of the above.
//!
//! # Feature flags
//!
//! - `std` (default): Enables [`Error`] implementations. Without it the crate
//!   is `no_std` and depends on `alloc` only.
//!
//! - `serde`: Enables [`serde`] support, serializing a [`Uri`] as a string
//!   and parsing it back on deserialization.
//!
//! - `log`: Emits [`log`] records when a [`Builder`] rejects its components
//!   and when a comparison falls back to the unnormalized string.
//!   Parsing, normalization and resolution never log.
//!
//! [`Error`]: std::error::Error
//! [`serde`]: https://docs.rs/serde
//! [`log`]: https://docs.rs/log
//!
//! # Examples
//!
//! ```
//! use canon_uri::{ComparisonLevel, Uri};
//!
//! let base = Uri::parse("HTTP://www.example.com/a/b/c")?;
//! let reference = Uri::parse("../%7Efoo?q")?;
//!
//! let target = base.resolve(&reference, ComparisonLevel::SyntaxBased).unwrap();
//! assert_eq!(target.as_str(), "http://www.example.com/a/~foo?q");
//! assert_eq!(target, Uri::parse("http://www.example.com/a/%7efoo?q")?);
//! # Ok::<_, canon_uri::ParseError>(())
//! ```

extern crate alloc;

pub mod build;
pub mod component;
pub mod error;
pub mod normalize;
pub mod pct_enc;
pub mod resolve;

mod compose;
mod internal;
mod log;
mod parser;
mod uri;

pub use build::Builder;
pub use error::{BuildError, DecodeError, ErrorCategory, NormalizeError, ParseError, ParseErrorKind};
pub use normalize::ComparisonLevel;
pub use uri::Uri;
