//! Process configuration read from environment variables
//!
//! Everything is read once at startup into [`AppConfig`]. Parsing goes
//! through [`AppConfig::from_lookup`] so tests never touch the real
//! environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use update_dns_core::config::DEFAULT_TIMEOUT_SECS;
use update_dns_core::{Error, ProviderConfig, Result};

/// Default directory for the rotating log file
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Default number of daily log files retained
pub const DEFAULT_LOG_LENGTH_DAYS: usize = 7;

/// Application configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Provider API token (`API_KEY`)
    pub api_key: Option<String>,

    /// Directory holding the log files (`LOG_DIR`)
    pub log_dir: PathBuf,

    /// Daily log files kept on disk (`LOG_LENGTH_DAYS`)
    pub log_length_days: usize,

    /// Maximum level emitted (`LOG_LEVEL`)
    pub log_level: LevelFilter,

    /// Timeout for every HTTP call (`HTTP_TIMEOUT_SECS`)
    pub http_timeout_secs: u64,

    /// Cloudflare base URL override (`CLOUDFLARE_API_BASE`)
    pub cloudflare_api_base: Option<String>,

    /// Public IP endpoint override (`PUBLIC_IP_URL`)
    pub public_ip_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Blank values count as unset
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_length_days = match var("LOG_LENGTH_DAYS") {
            Some(raw) => parse_number::<usize>("LOG_LENGTH_DAYS", &raw)?,
            None => DEFAULT_LOG_LENGTH_DAYS,
        };
        if log_length_days == 0 {
            return Err(Error::config("LOG_LENGTH_DAYS must be at least 1. Got: 0"));
        }

        let http_timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("HTTP_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if !(1..=300).contains(&http_timeout_secs) {
            return Err(Error::config(format!(
                "HTTP_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {http_timeout_secs}"
            )));
        }

        let log_level = match var("LOG_LEVEL") {
            Some(raw) => parse_log_level(&raw)?,
            None => LevelFilter::INFO,
        };

        let cloudflare_api_base = var("CLOUDFLARE_API_BASE");
        let public_ip_url = var("PUBLIC_IP_URL");
        for (key, url) in [("CLOUDFLARE_API_BASE", &cloudflare_api_base), ("PUBLIC_IP_URL", &public_ip_url)] {
            if let Some(url) = url
                && !url.starts_with("https://")
                && !url.starts_with("http://")
            {
                return Err(Error::config(format!("{key} must use HTTP or HTTPS scheme. Got: {url}")));
            }
        }

        Ok(Self {
            api_key: var("API_KEY"),
            log_dir: var("LOG_DIR").map_or_else(|| PathBuf::from(DEFAULT_LOG_DIR), PathBuf::from),
            log_length_days,
            log_level,
            http_timeout_secs,
            cloudflare_api_base,
            public_ip_url,
        })
    }

    /// Timeout applied to every HTTP call
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Build the configuration handed to the factory of `provider_name`
    pub fn provider_config(&self, provider_name: &str) -> ProviderConfig {
        let mut config = ProviderConfig::new(provider_name).with_timeout_secs(self.http_timeout_secs);

        if let Some(api_key) = &self.api_key {
            config = config.with_api_token(api_key);
        }

        if provider_name == "cloudflare"
            && let Some(api_base) = &self.cloudflare_api_base
        {
            config = config.with_api_base(api_base);
        }

        config
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("log_dir", &self.log_dir)
            .field("log_length_days", &self.log_length_days)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("cloudflare_api_base", &self.cloudflare_api_base)
            .field("public_ip_url", &self.public_ip_url)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::config(format!("{key} must be a non-negative integer. Got: {raw}")))
}

fn parse_log_level(raw: &str) -> Result<LevelFilter> {
    match raw.to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(Error::config(format!(
            "LOG_LEVEL '{raw}' is not valid. Valid levels: trace, debug, info, warn, error"
        ))),
    }
}
