// # DNS Provider Trait
//
// Defines the interface for reading and writing DNS records via provider APIs.
//
// ## Implementations
//
// - Cloudflare: `update-dns-cloudflare` crate
// - Future: Route53, DigitalOcean, GoDaddy, etc.
//
// ## Usage
//
// ```rust,ignore
// use update_dns_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let record = provider.get_record("example.com", "home.example.com", "A").await?;
//     provider.update_record_content(&record, "5.6.7.8").await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Snapshot of one provider-side DNS record
///
/// A `DnsRecord` is taken at query time. Changing the record at the provider
/// does not change an existing value; fetch again or use the record returned
/// by a write to see the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    id: String,
    name: String,
    content: String,
    #[serde(rename = "type")]
    record_type: String,
    zone_id: String,
    zone_name: String,
}

impl DnsRecord {
    /// Create a record snapshot
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        record_type: impl Into<String>,
        zone_id: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            record_type: record_type.into(),
            zone_id: zone_id.into(),
            zone_name: zone_name.into(),
        }
    }

    /// Provider-assigned record identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully-qualified record name (e.g. `home.example.com`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record content (e.g. an IPv4 address)
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Record type (e.g. `A`, `AAAA`, `CNAME`)
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Provider-assigned identifier of the owning zone
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Name of the owning zone (e.g. `example.com`)
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }
}

/// Trait for DNS provider implementations
///
/// Providers expose name-based lookup and id-based mutation, which is how
/// real DNS APIs are shaped: zones and records are searched by name, and
/// writes address a record by its `(zone_id, id)` pair.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Responsibilities
///
/// Providers perform HTTP calls to their own endpoints and parse the
/// responses. They never retry, never cache between calls, and never decide
/// whether a write is needed; that belongs to
/// [`Reconciler`](crate::reconcile::Reconciler).
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Resolve `zone_name`, then the single record matching
    /// `(record_name, record_type)` inside it
    ///
    /// # Errors
    ///
    /// - [`Error::ZoneNotFound`](crate::Error::ZoneNotFound) / [`Error::AmbiguousZone`](crate::Error::AmbiguousZone)
    ///   when the zone name matches zero or several zones
    /// - [`Error::RecordNotFound`](crate::Error::RecordNotFound) / [`Error::AmbiguousRecord`](crate::Error::AmbiguousRecord)
    ///   when the record matches zero or several records
    /// - [`Error::ProviderRequestFailed`](crate::Error::ProviderRequestFailed) on a non-2xx response
    async fn get_record(
        &self,
        zone_name: &str,
        record_name: &str,
        record_type: &str,
    ) -> Result<DnsRecord, crate::Error>;

    /// Create a record in `zone_name`
    ///
    /// Returns the provider's representation of the new record.
    async fn create_record(
        &self,
        zone_name: &str,
        record_name: &str,
        content: &str,
        record_type: &str,
    ) -> Result<DnsRecord, crate::Error>;

    /// Replace the content of a previously fetched record
    ///
    /// The record is addressed by its `(zone_id, id)` pair. The returned
    /// value is the provider's post-update representation.
    async fn update_record_content(
        &self,
        record: &DnsRecord,
        content: &str,
    ) -> Result<DnsRecord, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS providers from configuration
pub trait DnsProviderFactory: Send + Sync {
    /// Create a DnsProvider instance from configuration
    ///
    /// Factories validate the configuration (credentials in particular) and
    /// fail with [`Error::Config`](crate::Error::Config) before any network call.
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsProvider>, crate::Error>;
}
