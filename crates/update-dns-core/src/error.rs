//! Error types for the DNS updater
//!
//! This module defines all error types used throughout the workspace.
//! Every variant is terminal for a run; the only recovery path is the
//! create-if-missing branch of the reconciler, which matches on
//! [`Error::RecordNotFound`].

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// No zone matched the requested name
    #[error("Zone '{zone}' not found")]
    ZoneNotFound {
        /// Requested zone name
        zone: String,
    },

    /// More than one zone matched the requested name
    #[error("Too many zones ({count}) found for zone name '{zone}'")]
    AmbiguousZone {
        /// Requested zone name
        zone: String,
        /// Number of matching zones
        count: usize,
    },

    /// No record matched `(name, type)` inside the zone
    #[error("Record '{name}' of type '{record_type}' not found")]
    RecordNotFound {
        /// Requested record name
        name: String,
        /// Requested record type
        record_type: String,
    },

    /// More than one record matched `(name, type)` inside the zone
    #[error("Too many records ({count}) found for record name '{name}' of type '{record_type}'")]
    AmbiguousRecord {
        /// Requested record name
        name: String,
        /// Requested record type
        record_type: String,
        /// Number of matching records
        count: usize,
    },

    /// The provider answered with a non-2xx status
    #[error("Provider request failed ({provider}): HTTP {status}: {body}")]
    ProviderRequestFailed {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// The public IP could not be determined
    #[error("Public IP lookup failed: {0}")]
    PublicIpLookupFailed(String),

    /// Configuration errors (unknown provider, missing credential, bad environment value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider transport or response-format error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a "zone not found" error
    pub fn zone_not_found(zone: impl Into<String>) -> Self {
        Self::ZoneNotFound { zone: zone.into() }
    }

    /// Create an "ambiguous zone" error
    pub fn ambiguous_zone(zone: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousZone {
            zone: zone.into(),
            count,
        }
    }

    /// Create a "record not found" error
    pub fn record_not_found(name: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self::RecordNotFound {
            name: name.into(),
            record_type: record_type.into(),
        }
    }

    /// Create an "ambiguous record" error
    pub fn ambiguous_record(
        name: impl Into<String>,
        record_type: impl Into<String>,
        count: usize,
    ) -> Self {
        Self::AmbiguousRecord {
            name: name.into(),
            record_type: record_type.into(),
            count,
        }
    }

    /// Create a "provider request failed" error from a non-2xx response
    pub fn request_failed(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::ProviderRequestFailed {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a public IP lookup error
    pub fn public_ip(msg: impl Into<String>) -> Self {
        Self::PublicIpLookupFailed(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error stems from configuration or user input rather than
    /// from talking to a remote service
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidInput(_))
    }

    /// HTTP status carried by a failed provider request, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
