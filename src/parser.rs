use crate::{
    error::{ParseError, ParseErrorKind},
    internal::{AuthLayout, HostKind, Meta},
    pct_enc::table::*,
    pct_enc::Table,
};
use core::{
    net::{Ipv4Addr, Ipv6Addr},
    num::NonZeroUsize,
    ops::{Deref, DerefMut},
};

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

/// Parses a URI reference, returning the ranges of its components.
///
/// The whole input must be consumed.
pub(crate) fn parse(bytes: &[u8]) -> Result<Meta> {
    let mut parser = Parser {
        reader: Reader::new(bytes),
        out: Meta::default(),
    };
    parser.parse_uri_reference()?;
    Ok(parser.out)
}

/// Classifies a host that is not an IP literal.
///
/// An IPv4 address wins over a registered name only when it spans the whole host.
pub(crate) fn classify_host(bytes: &[u8]) -> HostKind {
    let mut reader = Reader::new(bytes);
    match reader.read_v4() {
        Some(addr) if !reader.has_remaining() => HostKind::Ipv4(addr),
        _ => HostKind::RegName,
    }
}

/// Checks whether the bytes form exactly one bracketed IP literal.
pub(crate) fn is_ip_literal(bytes: &[u8]) -> bool {
    let mut reader = Reader::new(bytes);
    matches!(reader.read_ip_literal(), Ok(Some(_))) && !reader.has_remaining()
}

/// Recursive-descent parser over the `URI-reference` rule.
///
/// The cursor never passes the end of input. It is moved backwards only
/// when bytes read as user information turn out to belong to the host.
///
/// On success every range written to `out` is in bounds, ordered, and
/// covers a validated component.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Meta,
}

/// A cursor over the input bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Reader<'a> {
        &self.reader
    }
}

impl<'a> DerefMut for Parser<'a> {
    fn deref_mut(&mut self) -> &mut Reader<'a> {
        &mut self.reader
    }
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.bytes.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.rest().get(i).copied()
    }

    fn skip(&mut self, n: usize) {
        debug_assert!(n <= self.rest().len());
        self.pos += n;
    }

    /// Consumes the longest prefix made of bytes the table allows and,
    /// if the table allows them, percent-encoded triplets.
    ///
    /// Returns whether anything was consumed.
    fn read(&mut self, table: &Table) -> Result<bool> {
        let start = self.pos;

        while let Some(x) = self.peek(0) {
            if x == b'%' && table.allows_enc() {
                match (self.peek(1), self.peek(2)) {
                    (Some(hi), Some(lo)) if HEXDIG.allows(hi) && HEXDIG.allows(lo) => self.skip(3),
                    _ => err!(self.pos, InvalidOctet),
                }
            } else if table.allows(x) {
                self.skip(1);
            } else {
                break;
            }
        }
        Ok(self.pos != start)
    }

    fn read_str(&mut self, s: &str) -> bool {
        let matched = self.rest().starts_with(s.as_bytes());
        if matched {
            self.skip(s.len());
        }
        matched
    }

    // IP-literal = "[" ( IPv6address / IPvFuture  ) "]"
    //
    // Errors point at the opening bracket.
    fn read_ip_literal(&mut self) -> Result<Option<HostKind>> {
        let bracket = self.pos;
        if !self.read_str("[") {
            return Ok(None);
        }

        let meta = if let Some(b'v' | b'V') = self.peek(0) {
            // IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
            self.skip(1);
            let valid = self.read(HEXDIG)? && self.read_str(".") && self.read(IPV_FUTURE)?;
            valid.then_some(HostKind::IpvFuture)
        } else {
            self.read_v6().map(|pieces| HostKind::Ipv6(Ipv6Addr::from(pieces)))
        };

        match meta {
            Some(meta) if self.read_str("]") => Ok(Some(meta)),
            _ => err!(bracket, InvalidIpLiteral),
        }
    }

    // IPv6address: eight 16-bit pieces separated by ":", the last two of which
    // may be written as an IPv4 address. A single "::" stands for one or more
    // zero pieces.
    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut pieces = [0; 8];
        let mut len = 0;
        // Where the "::" sits among the pieces.
        let mut gap = None;

        if self.read_str("::") {
            gap = Some(0);
        }

        while len < 8 {
            if len <= 6 && self.v4_ahead() {
                let [a, b, c, d] = self.read_v4()?.octets();
                pieces[len] = u16::from_be_bytes([a, b]);
                pieces[len + 1] = u16::from_be_bytes([c, d]);
                len += 2;
                break;
            }

            match self.read_v6_piece() {
                Some(piece) => {
                    pieces[len] = piece;
                    len += 1;
                }
                // Nothing may follow "::" directly.
                None if gap == Some(len) => break,
                None => return None,
            }

            if len == 8 {
                break;
            }
            if self.read_str("::") {
                if gap.is_some() {
                    return None;
                }
                gap = Some(len);
            } else if !self.read_str(":") {
                break;
            }
        }

        match gap {
            None => (len == 8).then_some(pieces),
            // "::" must stand for at least one piece.
            Some(_) if len == 8 => None,
            Some(g) => {
                let zeros = 8 - len;
                pieces.copy_within(g..len, g + zeros);
                pieces[g..g + zeros].fill(0);
                Some(pieces)
            }
        }
    }

    // h16 = 1*4HEXDIG
    fn read_v6_piece(&mut self) -> Option<u16> {
        let digits = self
            .rest()
            .iter()
            .take(4)
            .take_while(|x| x.is_ascii_hexdigit())
            .count();
        let s = core::str::from_utf8(&self.rest()[..digits]).ok()?;
        let piece = u16::from_str_radix(s, 16).ok()?;
        self.skip(digits);
        Some(piece)
    }

    // Whether the next piece is the start of an embedded IPv4 address.
    fn v4_ahead(&self) -> bool {
        let digits = self.rest().iter().take_while(|x| x.is_ascii_hexdigit()).count();
        digits > 0 && self.peek(digits) == Some(b'.')
    }

    // IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet
    fn read_v4(&mut self) -> Option<Ipv4Addr> {
        let mut octets = [0; 4];
        for (i, octet) in octets.iter_mut().enumerate() {
            if i > 0 && !self.read_str(".") {
                return None;
            }
            *octet = self.read_v4_octet()?;
        }
        Some(Ipv4Addr::from(octets))
    }

    // dec-octet = "0" / %x31-39 *2DIGIT, at most 255.
    fn read_v4_octet(&mut self) -> Option<u8> {
        let rest = self.rest();
        let digits = match rest.first()? {
            b'0' => 1,
            b'1'..=b'9' => rest.iter().take(3).take_while(|x| x.is_ascii_digit()).count(),
            _ => return None,
        };
        self.skip(digits);
        rest[..digits]
            .iter()
            .try_fold(0u8, |acc, &x| acc.checked_mul(10)?.checked_add(x - b'0'))
    }
}

impl<'a> Parser<'a> {
    // URI-reference = URI / relative-ref
    fn parse_uri_reference(&mut self) -> Result<()> {
        if let Some(len) = self.scan_scheme() {
            self.out.scheme_len = NonZeroUsize::new(len);
            // Skip the scheme and the colon.
            self.skip(len + 1);
            self.parse_hier_part()?;
        } else {
            self.parse_relative_part()?;
        }

        self.parse_query()?;
        self.parse_fragment()?;

        if self.has_remaining() {
            err!(self.pos, UnexpectedChar);
        }
        Ok(())
    }

    // scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
    //
    // Returns the length of the scheme if the input starts with one followed by ":".
    fn scan_scheme(&self) -> Option<usize> {
        let rem = &self.bytes[self.pos..];
        if !rem.first().is_some_and(|x| x.is_ascii_alphabetic()) {
            return None;
        }
        let len = rem.iter().take_while(|&&x| SCHEME.allows(x)).count();
        (rem.get(len) == Some(&b':')).then_some(len)
    }

    // hier-part = "//" authority path-abempty
    //           / path-absolute
    //           / path-rootless
    //           / path-empty
    fn parse_hier_part(&mut self) -> Result<()> {
        if self.read_str("//") {
            self.parse_authority()?;
            self.parse_path_abempty()
        } else {
            self.parse_path(PCHAR)
        }
    }

    // relative-part = "//" authority path-abempty
    //               / path-absolute
    //               / path-noscheme
    //               / path-empty
    fn parse_relative_part(&mut self) -> Result<()> {
        if self.read_str("//") {
            self.parse_authority()?;
            self.parse_path_abempty()
        } else {
            self.parse_path(SEGMENT_NZ_NC)?;
            let (start, end) = self.out.path_range;
            let first_seg_end = self.bytes[start..end]
                .iter()
                .position(|&x| x == b'/')
                .map_or(end, |i| start + i);
            if self.bytes[first_seg_end..].first() == Some(&b':') {
                // The first segment of a relative path cannot contain a colon.
                err!(first_seg_end, UnexpectedChar);
            }
            Ok(())
        }
    }

    // authority = [ userinfo "@" ] host [ ":" port ]
    fn parse_authority(&mut self) -> Result<()> {
        let auth_start = self.pos;

        // userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
        self.read(USERINFO)?;
        if self.peek(0) == Some(b'@') {
            self.skip(1);
        } else {
            // No user information: what was read belongs to the host and port.
            self.pos = auth_start;
        }

        let host_start = self.pos;
        let host_kind = self.parse_host()?;
        let host_end = self.pos;

        // port = 1*DIGIT
        if self.read_str(":") && !self.read(DIGIT)? {
            err!(self.pos, UnexpectedChar);
        }

        self.out.auth = Some(AuthLayout {
            host_range: (host_start, host_end),
            host_kind,
        });
        Ok(())
    }

    // host = IP-literal / IPv4address / reg-name
    fn parse_host(&mut self) -> Result<HostKind> {
        if let Some(meta) = self.read_ip_literal()? {
            return Ok(meta);
        }
        // reg-name = *( unreserved / pct-encoded / sub-delims )
        //
        // An IPv4 address is also a valid reg-name, so keep reading
        // and only take the address if nothing follows it.
        Ok(match (self.read_v4(), self.read(REG_NAME)?) {
            (Some(addr), false) => HostKind::Ipv4(addr),
            _ => HostKind::RegName,
        })
    }

    // path-abempty = *( "/" segment )
    fn parse_path_abempty(&mut self) -> Result<()> {
        let start = self.pos;
        while self.read_str("/") {
            self.read(PCHAR)?;
        }
        self.out.path_range = (start, self.pos);
        Ok(())
    }

    // path-absolute = "/" [ segment-nz *( "/" segment ) ]
    // path-rootless = segment-nz *( "/" segment )
    // path-noscheme = segment-nz-nc *( "/" segment )
    // path-empty    = 0<pchar>
    //
    // The caller has already ruled out a leading "//".
    fn parse_path(&mut self, first_seg: &Table) -> Result<()> {
        let start = self.pos;
        self.read(first_seg)?;
        while self.read_str("/") {
            self.read(PCHAR)?;
        }
        self.out.path_range = (start, self.pos);
        Ok(())
    }

    // query = *( pchar / "/" / "?" )
    fn parse_query(&mut self) -> Result<()> {
        if self.read_str("?") {
            self.read(QUERY)?;
            self.out.query_end = NonZeroUsize::new(self.pos);
        }
        Ok(())
    }

    // fragment = *( pchar / "/" / "?" )
    fn parse_fragment(&mut self) -> Result<()> {
        if self.read_str("#") {
            self.read(FRAGMENT)?;
        }
        Ok(())
    }
}
