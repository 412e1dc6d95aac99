//! Domain-name payload carried by registration transactions
//!
//! A full domain is a name, a top-level domain, and an optional IP address,
//! rendered as `name.tld` or `name.tld:ip`. The textual form doubles as the
//! byte payload, so parsing forbids separator characters inside the parts.

use std::net::IpAddr;

use serde::Serialize;
use thiserror::Error;

/// Maximum length of the name part in characters
pub const MAX_DOMAIN_NAME_LEN: usize = 64;

/// Maximum length of the TLD part in characters
pub const MAX_TLD_LEN: usize = 4;

/// Domain validation and parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0:?}")]
    InvalidName(String),
    #[error("Invalid TLD: {0:?}")]
    InvalidTld(String),
    #[error("Invalid IP address: {0:?}")]
    InvalidIp(String),
    #[error("Invalid serialized domain")]
    InvalidFormat,
}

/// A registered domain: name, TLD, and optionally the IP it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullDomain {
    name: String,
    tld: String,
    ip: Option<IpAddr>,
}

impl FullDomain {
    /// Create a validated domain; `ip` is the optional textual address
    pub fn new(name: &str, tld: &str, ip: Option<&str>) -> Result<Self, DomainError> {
        if name.is_empty() || name.chars().count() > MAX_DOMAIN_NAME_LEN || name.contains(['.', ':'])
        {
            return Err(DomainError::InvalidName(name.to_string()));
        }
        if tld.is_empty() || tld.chars().count() > MAX_TLD_LEN || tld.contains(['.', ':']) {
            return Err(DomainError::InvalidTld(tld.to_string()));
        }
        let ip = match ip {
            Some(text) => Some(
                text.parse::<IpAddr>()
                    .map_err(|_| DomainError::InvalidIp(text.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            tld: tld.to_string(),
            ip,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    /// The full textual form, `name.tld` or `name.tld:ip`
    pub fn full_name(&self) -> String {
        match self.ip {
            Some(ip) => format!("{}.{}:{}", self.name, self.tld, ip),
            None => format!("{}.{}", self.name, self.tld),
        }
    }

    /// Serialize to the UTF-8 byte payload of a registration transaction
    pub fn to_bytes(&self) -> Vec<u8> {
        self.full_name().into_bytes()
    }

    /// Parse a byte payload back into a domain
    pub fn parse(data: &[u8]) -> Result<Self, DomainError> {
        let text = std::str::from_utf8(data).map_err(|_| DomainError::InvalidFormat)?;

        let (domain_part, ip_part) = match text.split_once(':') {
            Some((domain, ip)) => (domain, Some(ip)),
            None => (text, None),
        };
        let (name, tld) = domain_part.split_once('.').ok_or(DomainError::InvalidFormat)?;

        Self::new(name, tld, ip_part)
    }

    /// Whether two domains name the same registration, ignoring the IP
    pub fn is_equal_up_to_ip(&self, other: &FullDomain) -> bool {
        self.name == other.name && self.tld == other.tld
    }

    /// Point the domain at a new IP address
    pub fn change_ip(&mut self, ip: &str) -> Result<(), DomainError> {
        self.ip = Some(
            ip.parse::<IpAddr>()
                .map_err(|_| DomainError::InvalidIp(ip.to_string()))?,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_rendering() {
        let bare = FullDomain::new("example", "com", None).unwrap();
        assert_eq!(bare.full_name(), "example.com");

        let addressed = FullDomain::new("example", "com", Some("10.0.0.1")).unwrap();
        assert_eq!(addressed.full_name(), "example.com:10.0.0.1");
    }

    #[test]
    fn test_round_trip() {
        let domain = FullDomain::new("example", "net", Some("2001:db8::1")).unwrap();
        assert_eq!(FullDomain::parse(&domain.to_bytes()), Ok(domain));

        let bare = FullDomain::new("a", "io", None).unwrap();
        assert_eq!(FullDomain::parse(&bare.to_bytes()), Ok(bare));
    }

    #[test]
    fn test_validation_limits() {
        assert!(matches!(
            FullDomain::new("", "com", None),
            Err(DomainError::InvalidName(_))
        ));
        assert!(matches!(
            FullDomain::new(&"a".repeat(65), "com", None),
            Err(DomainError::InvalidName(_))
        ));
        assert!(matches!(
            FullDomain::new("dotted.name", "com", None),
            Err(DomainError::InvalidName(_))
        ));
        assert!(matches!(
            FullDomain::new("example", "toolong", None),
            Err(DomainError::InvalidTld(_))
        ));
        assert!(matches!(
            FullDomain::new("example", "com", Some("not-an-ip")),
            Err(DomainError::InvalidIp(_))
        ));
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        // 64 two-byte characters: within the character limit even though the
        // UTF-8 form is 128 bytes
        let name = "ü".repeat(64);
        let domain = FullDomain::new(&name, "com", None).unwrap();
        assert_eq!(domain.name().chars().count(), 64);
        assert!(matches!(
            FullDomain::new(&"ü".repeat(65), "com", None),
            Err(DomainError::InvalidName(_))
        ));

        assert!(FullDomain::new("example", "köln", None).is_ok());
        assert!(matches!(
            FullDomain::new("example", "kölnn", None),
            Err(DomainError::InvalidTld(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(FullDomain::parse(b"no-separator"), Err(DomainError::InvalidFormat));
        assert_eq!(FullDomain::parse(&[0xff, 0xfe]), Err(DomainError::InvalidFormat));
    }

    #[test]
    fn test_equality_up_to_ip() {
        let a = FullDomain::new("example", "com", Some("10.0.0.1")).unwrap();
        let b = FullDomain::new("example", "com", Some("10.0.0.2")).unwrap();
        let c = FullDomain::new("other", "com", None).unwrap();
        assert!(a.is_equal_up_to_ip(&b));
        assert!(!a.is_equal_up_to_ip(&c));
    }

    #[test]
    fn test_change_ip() {
        let mut domain = FullDomain::new("example", "com", None).unwrap();
        domain.change_ip("192.168.1.1").unwrap();
        assert_eq!(domain.full_name(), "example.com:192.168.1.1");
        assert!(domain.change_ip("bogus").is_err());
    }
}
