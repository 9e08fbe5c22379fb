#![no_main]
use canon_uri::{component::Host, Uri};
use libfuzzer_sys::fuzz_target;
use std::net::{Ipv4Addr, Ipv6Addr};

fuzz_target!(|data: &str| {
    let Ok(uri) = Uri::parse(data) else {
        return;
    };
    assert_eq!(uri.as_str(), data);

    // Gluing the components back with their delimiters gives the input.
    let scheme = uri.scheme().map(|s| format!("{s}:")).unwrap_or_default();
    let auth = uri.authority().map(|auth| {
        let userinfo = auth.userinfo().map(|u| format!("{u}@")).unwrap_or_default();
        let port = auth.port().map(|p| format!(":{p}")).unwrap_or_default();
        let joined = format!("{userinfo}{}{port}", auth.host());
        assert_eq!(joined, auth.as_str());
        format!("//{joined}")
    });
    let query = uri.query().map(|q| format!("?{q}")).unwrap_or_default();
    let fragment = uri.fragment().map(|f| format!("#{f}")).unwrap_or_default();
    let glued = format!(
        "{scheme}{}{}{query}{fragment}",
        auth.unwrap_or_default(),
        uri.path()
    );
    assert_eq!(glued, data);

    // IP hosts agree with the standard library.
    if let Some(auth) = uri.authority() {
        let host = auth.host();
        match auth.host_parsed() {
            Host::Ipv4(addr) => assert_eq!(host.parse::<Ipv4Addr>(), Ok(addr)),
            Host::Ipv6(addr) => {
                assert_eq!(host[1..host.len() - 1].parse::<Ipv6Addr>(), Ok(addr));
            }
            Host::IpvFuture(_) => assert!(host.starts_with("[v") || host.starts_with("[V")),
            Host::RegName(_) => assert!(host.parse::<Ipv4Addr>().is_err()),
        }
    }
});
