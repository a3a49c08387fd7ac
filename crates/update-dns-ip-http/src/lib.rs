// # HTTP IP Source
//
// This crate resolves the caller's public IP through an external
// "what is my IP" service.
//
// ## Protocol
//
// A single `GET` to a JSON endpoint answering `{"ip": "<address>"}`, by
// default `https://api.ipify.org?format=json`. Any non-2xx status, transport
// failure, malformed body, or unparsable address is a
// `PublicIpLookupFailed` error. There is no caching and no retry: each call
// to `current()` performs exactly one request.

use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;
use update_dns_core::config::DEFAULT_TIMEOUT_SECS;
use update_dns_core::traits::{IpSource, IpVersion};
use update_dns_core::{Error, Result};

/// Default public IP endpoint
pub const DEFAULT_IP_SERVICE: &str = "https://api.ipify.org?format=json";

/// Default HTTP timeout for the lookup
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// HTTP-based public IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// URL to fetch the IP from
    url: String,

    /// Address family the caller needs, if any
    version: Option<IpVersion>,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source against [`DEFAULT_IP_SERVICE`]
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_IP_SERVICE, None, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source with an explicit endpoint, family filter and timeout
    ///
    /// # Parameters
    ///
    /// - `url`: JSON endpoint answering `{"ip": "..."}`
    /// - `version`: reject addresses of the other family (None = accept both)
    /// - `timeout`: request timeout
    pub fn with_options(url: impl Into<String>, version: Option<IpVersion>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            version,
            client,
        })
    }

    /// The endpoint queried by [`IpSource::current`]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch current IP from the HTTP service
    async fn fetch_ip(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::public_ip(format!("Request to {} failed: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(Error::public_ip(format!(
                "{} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body: IpResponse = response
            .json()
            .await
            .map_err(|e| Error::public_ip(format!("Malformed response from {}: {e}", self.url)))?;

        let ip_text = body.ip.trim();
        let ip: IpAddr = ip_text
            .parse()
            .map_err(|_| Error::public_ip(format!("Invalid IP address: {ip_text}")))?;

        if let Some(version) = self.version
            && !version.matches(&ip)
        {
            return Err(Error::public_ip(format!("Expected {version:?} address, got: {ip}")));
        }

        Ok(ip)
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        tracing::info!(url = %self.url, "Requesting host machine public IP");

        match self.fetch_ip().await {
            Ok(ip) => {
                tracing::info!(%ip, "Host machine has public IP");
                Ok(ip)
            }
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Public IP lookup failed");
                Err(e)
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
