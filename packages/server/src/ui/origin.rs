//! Admission policy for the realtime channel, keyed on the `Origin` header.

use url::{Host, Url};

/// Allow-list of browser origins.
///
/// - no `Origin` header (non-browser client): allowed
/// - loopback host (`localhost`, `*.localhost`, `127.0.0.0/8`, `::1`): allowed
/// - anything else: allowed only if its serialized origin matches a listed
///   one (scheme and host lowercased, default port dropped, IDN hosts in
///   punycode)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed = Vec::new();
        for raw in origins {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            match parse_origin(raw) {
                Some(url) => allowed.push(url.origin().ascii_serialization()),
                None => tracing::warn!("Ignoring unparseable allowed origin {:?}", raw),
            }
        }
        Self { allowed }
    }

    pub fn allows(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        let Some(url) = parse_origin(origin) else {
            return false;
        };

        if url.host().is_some_and(|host| is_loopback_host(&host)) {
            return true;
        }
        let serialized = url.origin().ascii_serialization();
        self.allowed.iter().any(|allowed| *allowed == serialized)
    }
}

/// Parse `scheme://host[:port]`; opaque origins such as `null` yield `None`.
fn parse_origin(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    url.origin().is_tuple().then_some(url)
}

fn is_loopback_host(host: &Host<&str>) -> bool {
    match host {
        Host::Domain(domain) => *domain == "localhost" || domain.ends_with(".localhost"),
        Host::Ipv4(ip) => ip.is_loopback(),
        Host::Ipv6(ip) => ip.is_loopback(),
    }
}
