use std::{fmt, net::IpAddr, str::FromStr};

/// Host part of a destination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// Raw IPv4 or IPv6 address
    Ip(IpAddr),
    /// DNS name
    Domain(String),
}

impl Address {
    /// Classify a host string as IP or domain. IPv6 literals may be bracketed.
    #[must_use]
    pub fn parse(host: &str) -> Self {
        let bare = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        bare.parse::<IpAddr>()
            .map_or_else(|_| Self::Domain(host.to_string()), Self::Ip)
    }

    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Domain value, `None` for IP addresses
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::Domain(domain) => Some(domain),
            Self::Ip(_) => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(IpAddr::V6(ip)) => write!(f, "[{ip}]"),
            Self::Ip(ip) => write!(f, "{ip}"),
            Self::Domain(domain) => f.write_str(domain),
        }
    }
}

/// Remote endpoint a secured connection is opened to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub address: Address,
    pub port: u16,
}

impl Destination {
    #[must_use]
    pub const fn new(address: Address, port: u16) -> Self {
        Self { address, port }
    }

    #[must_use]
    pub fn domain(domain: &str, port: u16) -> Self {
        Self::new(Address::Domain(domain.to_string()), port)
    }

    #[must_use]
    pub const fn ip(ip: IpAddr, port: u16) -> Self {
        Self::new(Address::Ip(ip), port)
    }
}

impl FromStr for Destination {
    type Err = String;

    /// Parse `host:port`, `[v6]:port`; port defaults to 443 when omitted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Invalid destination: empty".to_string());
        }

        // bare IPv6 without port
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::ip(ip, 443));
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && (!host.contains(':') || host.ends_with(']')) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid destination port: {s}"))?;
                (host, port)
            }
            Some(_) => return Err(format!("Invalid destination: {s}")),
            None => (s, 443),
        };

        if host.chars().any(char::is_whitespace) {
            return Err(format!("Invalid destination host: {host}"));
        }

        Ok(Self::new(Address::parse(host), port))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}
