//! Byte classes of the RFC 3986 grammar.
//!
//! Each constant is named after the ABNF rule it matches and is built in a
//! const context, so lookups compile down to a shift and a mask.

/// A set of bytes allowed unencoded in some component, plus whether
/// percent-encoded triplets may appear there.
///
/// `%` itself is never a member: it is only accepted as the start of a
/// triplet, and only when [`allows_enc`](Self::allows_enc) holds.
#[derive(Clone, Copy, Debug)]
pub struct Table {
    ascii: u128,
    non_ascii: bool,
    allows_enc: bool,
}

impl Table {
    /// Builds a table from a list of ASCII bytes.
    ///
    /// # Panics
    ///
    /// Panics on a non-ASCII byte or on `%`.
    #[must_use]
    pub const fn gen(bytes: &[u8]) -> Table {
        let mut ascii = 0;
        let mut i = 0;
        while i < bytes.len() {
            let x = bytes[i];
            assert!(x.is_ascii() && x != b'%', "table bytes must be ASCII and not %");
            ascii |= 1 << x;
            i += 1;
        }
        Table {
            ascii,
            non_ascii: false,
            allows_enc: false,
        }
    }

    /// Returns this table with percent-encoded triplets allowed.
    #[must_use]
    pub const fn enc(self) -> Table {
        Table {
            allows_enc: true,
            ..self
        }
    }

    /// Returns the union of two tables.
    #[must_use]
    pub const fn or(self, other: &Table) -> Table {
        Table {
            ascii: self.ascii | other.ascii,
            non_ascii: self.non_ascii || other.non_ascii,
            allows_enc: self.allows_enc || other.allows_enc,
        }
    }

    /// Checks whether the byte may appear unencoded.
    #[inline]
    #[must_use]
    pub const fn allows(&self, x: u8) -> bool {
        if x < 128 {
            self.ascii & (1 << x) != 0
        } else {
            self.non_ascii
        }
    }

    /// Checks whether percent-encoded triplets may appear.
    #[inline]
    #[must_use]
    pub const fn allows_enc(&self) -> bool {
        self.allows_enc
    }

    /// Checks that every byte is allowed and that every `%` starts a
    /// well-formed triplet.
    #[must_use]
    pub const fn validate(&self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            if s[i] != b'%' {
                if !self.allows(s[i]) {
                    return false;
                }
                i += 1;
                continue;
            }
            let well_formed =
                i + 2 < s.len() && HEXDIG.allows(s[i + 1]) && HEXDIG.allows(s[i + 2]);
            if !self.allows_enc || !well_formed {
                return false;
            }
            i += 3;
        }
        true
    }
}

const fn gen(bytes: &[u8]) -> Table {
    Table::gen(bytes)
}

/// `ALPHA`
pub const ALPHA: &Table = &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT`
pub const DIGIT: &Table = &gen(b"0123456789");

/// `HEXDIG`, either case.
pub const HEXDIG: &Table = &DIGIT.or(&gen(b"ABCDEFabcdef"));

/// `gen-delims`: `:/?#[]@`
pub const GEN_DELIMS: &Table = &gen(b":/?#[]@");

/// `sub-delims`: `!$&'()*+,;=`
pub const SUB_DELIMS: &Table = &gen(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: &Table = &GEN_DELIMS.or(SUB_DELIMS);

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: &Table = &ALPHA.or(DIGIT).or(&gen(b"-._~"));

/// `scheme` after its first letter.
pub const SCHEME: &Table = &ALPHA.or(DIGIT).or(&gen(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":")).enc();

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: &Table = &UNRESERVED.or(SUB_DELIMS).enc();

/// The part of `IPvFuture` after the version and the dot.
pub const IPV_FUTURE: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":"));

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub const PCHAR: &Table = &USERINFO.or(&gen(b"@"));

/// `segment-nz-nc`, a path segment without `:`.
pub const SEGMENT_NZ_NC: &Table = &REG_NAME.or(&gen(b"@"));

/// `path`, that is `pchar` and `/`.
pub const PATH: &Table = &PCHAR.or(&gen(b"/"));

/// `query`, that is `pchar`, `/` and `?`.
pub const QUERY: &Table = &PATH.or(&gen(b"?"));

/// `fragment`, which allows the same bytes as `query`.
pub const FRAGMENT: &Table = QUERY;

/// Everything but a bare `%`, non-ASCII bytes included.
pub(crate) const ANY_ENCODED: &Table = &Table {
    ascii: !(1 << b'%'),
    non_ascii: true,
    allows_enc: true,
};
