// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider for update-dns-record.
//
// ## Behavior
//
// - ✅ Zone and record lookups by name with a strict cardinality policy
//   (zero matches → not found, several matches → ambiguous)
// - ✅ Record creation and content updates addressed by `(zone_id, id)`
// - ✅ Non-2xx responses surface as `ProviderRequestFailed` with status and body
// - ✅ Fixed HTTP timeout (10 seconds by default)
// - ❌ NO retry or backoff logic; every failure is terminal for the run
// - ❌ NO caching between calls; each lookup hits the API
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Provider MUST fail fast if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...&type=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use update_dns_core::config::{DEFAULT_TIMEOUT_SECS, ProviderConfig};
use update_dns_core::traits::{DnsProvider, DnsProviderFactory, DnsRecord};
use update_dns_core::{Error, ProviderRegistry, Result};

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

/// Name under which the provider registers itself
pub const PROVIDER_NAME: &str = "cloudflare";

/// Envelope of every Cloudflare v4 response; only `result` is used
#[derive(Debug, Deserialize)]
struct CloudflareResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct CloudflareZone {
    id: String,
}

/// Record object as returned by the DNS records endpoints
///
/// Newer API versions omit `zone_id` and `zone_name`; those are then taken
/// from the zone the request was made against.
#[derive(Debug, Deserialize)]
struct CloudflareDnsRecord {
    id: String,
    name: String,
    content: String,
    #[serde(rename = "type")]
    record_type: String,
    #[serde(default)]
    zone_id: Option<String>,
    #[serde(default)]
    zone_name: Option<String>,
}

impl CloudflareDnsRecord {
    fn into_record(self, zone_id: &str, zone_name: &str) -> DnsRecord {
        DnsRecord::new(
            self.id,
            self.name,
            self.content,
            self.record_type,
            self.zone_id.unwrap_or_else(|| zone_id.to_string()),
            self.zone_name.unwrap_or_else(|| zone_name.to_string()),
        )
    }
}

#[derive(Debug, Serialize)]
struct CreateRecordBody<'a> {
    content: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
}

#[derive(Debug, Serialize)]
struct PatchContentBody<'a> {
    content: &'a str,
}

/// Cloudflare DNS provider
///
/// Stateless and single-shot: every trait call performs its own zone lookup
/// and holds nothing between calls.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL without a trailing slash
    api_base: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a provider against the public Cloudflare API
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:Read and DNS:Edit permissions
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the token is empty or the HTTP client cannot be built.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_options(api_token, CLOUDFLARE_API_BASE, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a provider with an explicit base URL and timeout
    pub fn with_options(
        api_token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let api_base = api_base.into().trim_end_matches('/').to_string();

        Ok(Self {
            api_token,
            api_base,
            client,
        })
    }

    /// Create a provider from a [`ProviderConfig`]
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_token = config
            .require_api_token()
            .map_err(|_| Error::config("Cloudflare API token is required (set API_KEY)"))?;
        let api_base = config.api_base.as_deref().unwrap_or(CLOUDFLARE_API_BASE);

        Self::with_options(api_token, api_base, config.timeout())
    }

    /// The API base URL requests are sent to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Start a request carrying the authorization and content-type headers
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, path))
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and unwrap the `result` of the response envelope
    ///
    /// Non-2xx statuses become [`Error::ProviderRequestFailed`]; transport
    /// and parse failures become [`Error::Provider`].
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, operation: &str) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Cloudflare request failed");
            Error::provider(PROVIDER_NAME, format!("{operation}: HTTP request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            tracing::error!(operation, status = status.as_u16(), body = %body, "Cloudflare API returned an error");
            return Err(Error::request_failed(PROVIDER_NAME, status.as_u16(), body));
        }

        let envelope: CloudflareResponse<T> = response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Malformed Cloudflare response");
            Error::provider(PROVIDER_NAME, format!("{operation}: Failed to parse response: {e}"))
        })?;

        Ok(envelope.result)
    }

    /// Get the zone ID for a zone name
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn get_zone_id(&self, zone_name: &str) -> Result<String> {
        tracing::debug!(zone = zone_name, "Looking up zone ID");

        let request = self.request(Method::GET, "/zones").query(&[("name", zone_name)]);
        let zones: Vec<CloudflareZone> = self.execute(request, "list zones").await?;

        let zone = exactly_one(
            zones,
            || Error::zone_not_found(zone_name),
            |count| Error::ambiguous_zone(zone_name, count),
        )?;

        tracing::debug!(zone = zone_name, zone_id = %zone.id, "Found zone ID");
        Ok(zone.id)
    }

    /// Get the single record matching `(record_name, record_type)` in a zone
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?name=home.example.com&type=A
    /// Authorization: Bearer <token>
    /// ```
    async fn find_record(
        &self,
        zone_id: &str,
        zone_name: &str,
        record_name: &str,
        record_type: &str,
    ) -> Result<DnsRecord> {
        tracing::debug!(record = record_name, record_type, "Looking up DNS record");

        let request = self
            .request(Method::GET, &format!("/zones/{zone_id}/dns_records"))
            .query(&[("name", record_name), ("type", record_type)]);
        let records: Vec<CloudflareDnsRecord> = self.execute(request, "list DNS records").await?;

        let record = exactly_one(
            records,
            || Error::record_not_found(record_name, record_type),
            |count| Error::ambiguous_record(record_name, record_type, count),
        )?;

        tracing::debug!(record = record_name, record_id = %record.id, "Found DNS record");
        Ok(record.into_record(zone_id, zone_name))
    }
}

/// Apply the cardinality policy: exactly one match is required
///
/// Several matches are never disambiguated.
fn exactly_one<T>(
    items: Vec<T>,
    none: impl FnOnce() -> Error,
    many: impl FnOnce(usize) -> Error,
) -> Result<T> {
    let count = items.len();
    let mut items = items.into_iter();

    let error = match (items.next(), count) {
        (Some(item), 1) => return Ok(item),
        (None, _) => none(),
        _ => many(count),
    };

    tracing::error!("{error}");
    Err(error)
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn get_record(&self, zone_name: &str, record_name: &str, record_type: &str) -> Result<DnsRecord> {
        let zone_id = self.get_zone_id(zone_name).await?;
        self.find_record(&zone_id, zone_name, record_name, record_type)
            .await
    }

    /// # API Call
    ///
    /// ```http
    /// POST /zones/:zone_id/dns_records
    /// {"content": "9.9.9.9", "name": "home.example.com", "type": "A"}
    /// ```
    async fn create_record(
        &self,
        zone_name: &str,
        record_name: &str,
        content: &str,
        record_type: &str,
    ) -> Result<DnsRecord> {
        let zone_id = self.get_zone_id(zone_name).await?;

        tracing::info!(zone = zone_name, record = record_name, record_type, content, "Creating Cloudflare DNS record");

        let body = CreateRecordBody {
            content,
            name: record_name,
            record_type,
        };
        let request = self
            .request(Method::POST, &format!("/zones/{zone_id}/dns_records"))
            .json(&body);
        let created: CloudflareDnsRecord = self.execute(request, "create DNS record").await?;

        Ok(created.into_record(&zone_id, zone_name))
    }

    /// # API Call
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// {"content": "5.6.7.8"}
    /// ```
    async fn update_record_content(&self, record: &DnsRecord, content: &str) -> Result<DnsRecord> {
        tracing::info!(
            record = record.name(),
            record_id = record.id(),
            from = record.content(),
            to = content,
            "Updating Cloudflare DNS record"
        );

        let path = format!("/zones/{}/dns_records/{}", record.zone_id(), record.id());
        let request = self
            .request(Method::PATCH, &path)
            .json(&PatchContentBody { content });
        let updated: CloudflareDnsRecord = self.execute(request, "update DNS record").await?;

        Ok(updated.into_record(record.zone_id(), record.zone_name()))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating Cloudflare providers
pub struct CloudflareFactory;

impl DnsProviderFactory for CloudflareFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        Ok(Box::new(CloudflareProvider::from_config(config)?))
    }
}

/// Register the Cloudflare provider with a registry
///
/// # Example
///
/// ```rust
/// use update_dns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// update_dns_cloudflare::register(&registry);
/// assert!(registry.has_provider("cloudflare"));
/// ```
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(CloudflareFactory));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creation() {
        let config = ProviderConfig::new("cloudflare").with_api_token("test_token");

        let provider = CloudflareFactory.create(&config);
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "cloudflare");
    }

    #[test]
    fn test_factory_missing_token() {
        let err = CloudflareFactory
            .create(&ProviderConfig::new("cloudflare"))
            .err()
            .unwrap();

        assert!(err.is_config());
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(matches!(CloudflareProvider::new(""), Err(Error::Config(_))));
        assert!(matches!(CloudflareProvider::new("  "), Err(Error::Config(_))));
    }

    #[test]
    fn test_default_api_base() {
        let provider = CloudflareProvider::new("token").unwrap();
        assert_eq!(provider.api_base(), CLOUDFLARE_API_BASE);
    }

    #[test]
    fn test_api_base_override_drops_trailing_slash() {
        let config = ProviderConfig::new("cloudflare")
            .with_api_token("token")
            .with_api_base("http://127.0.0.1:8080/");

        let provider = CloudflareProvider::from_config(&config).unwrap();
        assert_eq!(provider.api_base(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_register_adds_factory() {
        let registry = ProviderRegistry::new();
        register(&registry);

        assert!(registry.has_provider("cloudflare"));
        let config = ProviderConfig::new("cloudflare").with_api_token("token");
        assert!(registry.create_provider(&config).is_ok());
    }

    #[test]
    fn test_api_token_not_exposed_in_debug() {
        let provider = CloudflareProvider::new("secret_token_12345").unwrap();

        let debug_str = format!("{provider:?}");
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(!debug_str.contains("secret_token"));
        assert!(debug_str.contains("CloudflareProvider"));
    }

    #[test]
    fn test_exactly_one_policy() {
        let none = || Error::zone_not_found("example.com");
        let many = |count| Error::ambiguous_zone("example.com", count);

        assert_eq!(exactly_one(vec![7], none, many).unwrap(), 7);
        assert!(matches!(
            exactly_one(Vec::<u8>::new(), none, many),
            Err(Error::ZoneNotFound { .. })
        ));
        assert!(matches!(
            exactly_one(vec![1, 2, 3], none, many),
            Err(Error::AmbiguousZone { count: 3, .. })
        ));
    }

    #[test]
    fn test_record_fills_missing_zone_fields() {
        let raw: CloudflareDnsRecord = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "name": "home.example.com",
            "content": "1.2.3.4",
            "type": "A",
        }))
        .unwrap();

        let record = raw.into_record("z1", "example.com");
        assert_eq!(record.zone_id(), "z1");
        assert_eq!(record.zone_name(), "example.com");
    }

    #[test]
    fn test_create_body_uses_api_field_names() {
        let body = CreateRecordBody {
            content: "9.9.9.9",
            name: "home.example.com",
            record_type: "A",
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"content": "9.9.9.9", "name": "home.example.com", "type": "A"})
        );
    }
}
