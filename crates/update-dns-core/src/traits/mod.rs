//! Core traits for the DNS updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsProvider`]: Read and write DNS records via provider APIs
//! - [`IpSource`]: Discover the address a record should point at

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{DnsProvider, DnsProviderFactory, DnsRecord};
pub use ip_source::{IpSource, IpVersion};
