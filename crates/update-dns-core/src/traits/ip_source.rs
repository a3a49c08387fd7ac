// # IP Source Trait
//
// Defines the interface for discovering the address the record should point at.
//
// ## Implementations
//
// - HTTP "what is my IP" endpoint: `update-dns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use update_dns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let ip = source.current().await?;
//     println!("Public IP: {ip}");
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// IP version (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// The address family a record type holds, if it holds one
    ///
    /// `A` maps to v4 and `AAAA` to v6 (case-insensitive); other record
    /// types carry no address and return `None`.
    pub fn for_record_type(record_type: &str) -> Option<Self> {
        if record_type.eq_ignore_ascii_case("A") {
            Some(Self::V4)
        } else if record_type.eq_ignore_ascii_case("AAAA") {
            Some(Self::V6)
        } else {
            None
        }
    }

    /// Whether `ip` belongs to this family
    pub fn matches(self, ip: &IpAddr) -> bool {
        match self {
            Self::V4 => ip.is_ipv4(),
            Self::V6 => ip.is_ipv6(),
        }
    }
}

/// Trait for IP source implementations
///
/// Sources perform a single lookup per call. They never retry and never
/// cache across calls.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current IP address
    ///
    /// # Errors
    ///
    /// [`Error::PublicIpLookupFailed`](crate::Error::PublicIpLookupFailed)
    /// when the address cannot be determined.
    async fn current(&self) -> Result<IpAddr, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
