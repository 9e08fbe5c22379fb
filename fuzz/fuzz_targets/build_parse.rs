#![no_main]
use canon_uri::{component::Host, BuildError, Uri};
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use std::net::IpAddr;

#[derive(Arbitrary, Debug)]
struct Components<'a> {
    scheme: Option<&'a str>,
    userinfo: Option<&'a str>,
    host: Option<&'a str>,
    host_ip: Option<IpAddr>,
    port: Option<u16>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

fuzz_target!(|c: Components<'_>| {
    let mut b = Uri::builder().path(c.path);
    if let Some(s) = c.scheme {
        b = b.scheme(s);
    }
    if let Some(s) = c.userinfo {
        b = b.userinfo(s);
    }
    if let Some(s) = c.host {
        b = b.host(s);
    }
    if let Some(addr) = c.host_ip {
        b = b.host_ip(addr);
    }
    if let Some(port) = c.port {
        b = b.port(port);
    }
    if let Some(s) = c.query {
        b = b.query(s);
    }
    if let Some(s) = c.fragment {
        b = b.fragment(s);
    }

    let u1 = match b.build() {
        Ok(u) => u,
        Err(BuildError::Syntax(e)) => panic!("built an unparsable string: {e}"),
        Err(_) => return,
    };
    let u2 = Uri::parse(u1.as_str()).unwrap();
    assert_eq!(u1.as_str(), u2.as_str());

    if let Some(addr) = c.host_ip {
        let expected = match addr {
            IpAddr::V4(addr) => Host::Ipv4(addr),
            IpAddr::V6(addr) => Host::Ipv6(addr),
        };
        assert_eq!(u2.authority().unwrap().host_parsed(), expected);
    }

    assert_eq!(u2.path().decode_utf8_lossy(), c.path);
    assert_eq!(u2.query().map(|q| q.decode_utf8_lossy()), c.query.map(Into::into));
    assert_eq!(u2.fragment().map(|f| f.decode_utf8_lossy()), c.fragment.map(Into::into));
    assert_eq!(
        u2.scheme().map(|s| s.as_str()),
        c.scheme
    );
});
