//! Configuration types for the DNS updater
//!
//! This module defines the configuration structures passed explicitly into
//! providers and the reconciler. Nothing here reads the process environment;
//! the binary builds these values at startup.

use crate::traits::IpVersion;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Record type used when the caller does not pick one
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// Default HTTP timeout for provider and IP lookups (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// DNS provider configuration
///
/// `provider` selects the factory in the
/// [`ProviderRegistry`](crate::registry::ProviderRegistry); the remaining
/// fields are handed to that factory.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type name (e.g. "cloudflare")
    pub provider: String,

    /// API token; ⚠️ never log this value
    #[serde(default)]
    pub api_token: Option<String>,

    /// Override of the provider's API base URL
    #[serde(default)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a configuration for the named provider with defaults
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_token: None,
            api_base: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Set the API token
    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        &self.provider
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Return the API token, failing when it is unset or blank
    pub fn require_api_token(&self) -> Result<&str, crate::Error> {
        match self.api_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(crate::Error::config(format!(
                "An API token is required for provider '{}'",
                self.provider
            ))),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.provider.is_empty() {
            return Err(crate::Error::config("Provider name cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("Provider timeout must be > 0"));
        }
        if let Some(base) = &self.api_base
            && !base.starts_with("https://")
            && !base.starts_with("http://")
        {
            return Err(crate::Error::config(format!(
                "Provider API base must use HTTP or HTTPS scheme. Got: {base}"
            )));
        }
        Ok(())
    }
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_token", &self.api_token.as_ref().map(|_| "<REDACTED>"))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Desired state of one DNS record for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Zone the record lives in (e.g. "example.com")
    pub zone_name: String,

    /// Fully-qualified record name (e.g. "home.example.com")
    pub record_name: String,

    /// Record type
    #[serde(default = "default_record_type")]
    pub record_type: String,

    /// Desired record content, usually an IP address
    pub content: String,

    /// Create the record when it does not exist yet
    #[serde(default)]
    pub create_if_missing: bool,
}

impl UpdateRequest {
    /// Create a request for an `A` record that must already exist
    pub fn new(
        zone_name: impl Into<String>,
        record_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            zone_name: zone_name.into(),
            record_name: record_name.into(),
            record_type: default_record_type(),
            content: content.into(),
            create_if_missing: false,
        }
    }

    /// Set the record type
    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = record_type.into();
        self
    }

    /// Allow or forbid creating a missing record
    pub fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    /// Validate the request
    ///
    /// Names and content must be non-empty. `A` and `AAAA` content must be an
    /// address of the matching family; other record types are not checked.
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (field, value) in [
            ("zone name", &self.zone_name),
            ("record name", &self.record_name),
            ("record type", &self.record_type),
            ("record content", &self.content),
        ] {
            if value.trim().is_empty() {
                return Err(crate::Error::invalid_input(format!("{field} cannot be empty")));
            }
        }

        if let Some(version) = IpVersion::for_record_type(&self.record_type) {
            let ip: IpAddr = self.content.parse().map_err(|_| {
                crate::Error::invalid_input(format!(
                    "'{}' is not a valid IP address for a {} record",
                    self.content, self.record_type
                ))
            })?;

            if !version.matches(&ip) {
                return Err(crate::Error::invalid_input(format!(
                    "'{}' is not an {:?} address, which a {} record requires",
                    self.content, version, self.record_type
                )));
            }
        }

        Ok(())
    }
}

fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
