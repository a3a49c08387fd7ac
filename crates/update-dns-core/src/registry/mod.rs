//! Plugin-based provider registry
//!
//! The registry allows DNS providers to be registered by name at startup,
//! avoiding hardcoded if-else chains in the binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use update_dns_core::registry::ProviderRegistry;
//! use update_dns_core::config::ProviderConfig;
//!
//! let registry = ProviderRegistry::new();
//! update_dns_cloudflare::register(&registry);
//!
//! let config = ProviderConfig::new("cloudflare").with_api_token(token);
//! let provider = registry.create_provider(&config)?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsProviderFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Provider registry for plugin-based DNS provider creation
///
/// The registry maintains a map of provider type names to factory objects,
/// allowing dynamic instantiation of providers based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered DNS provider factories
    providers: RwLock<HashMap<String, Box<dyn DnsProviderFactory>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DNS provider factory
    ///
    /// Registering a name twice replaces the earlier factory.
    pub fn register_provider(&self, name: impl Into<String>, factory: Box<dyn DnsProviderFactory>) {
        let name = name.into();
        tracing::debug!(provider = %name, "Registering DNS provider");
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, factory);
    }

    /// Create a DNS provider from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DnsProvider>)`: Created provider instance
    /// - `Err(Error::Config)`: If the provider type is not registered, or the
    ///   factory rejects the configuration
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
        config.validate()?;

        let provider_type = config.type_name();
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);

        let Some(factory) = providers.get(provider_type) else {
            let mut known: Vec<&str> = providers.keys().map(String::as_str).collect();
            known.sort_unstable();
            return Err(Error::config(format!(
                "Invalid provider name '{provider_type}', options are [{}]",
                known.join(", ")
            )));
        };

        factory.create(config)
    }

    /// List all registered provider types, sorted
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DnsRecord;

    struct StaticProvider;

    #[async_trait::async_trait]
    impl DnsProvider for StaticProvider {
        async fn get_record(&self, zone: &str, name: &str, record_type: &str) -> Result<DnsRecord> {
            Ok(DnsRecord::new("r1", name, "1.2.3.4", record_type, "z1", zone))
        }

        async fn create_record(
            &self,
            zone: &str,
            name: &str,
            content: &str,
            record_type: &str,
        ) -> Result<DnsRecord> {
            Ok(DnsRecord::new("r2", name, content, record_type, "z1", zone))
        }

        async fn update_record_content(&self, record: &DnsRecord, content: &str) -> Result<DnsRecord> {
            Ok(DnsRecord::new(
                record.id(),
                record.name(),
                content,
                record.record_type(),
                record.zone_id(),
                record.zone_name(),
            ))
        }

        fn provider_name(&self) -> &'static str {
            "static"
        }
    }

    struct StaticProviderFactory;

    impl DnsProviderFactory for StaticProviderFactory {
        fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsProvider>> {
            config.require_api_token()?;
            Ok(Box::new(StaticProvider))
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ProviderRegistry::new();

        assert!(!registry.has_provider("static"));

        registry.register_provider("static", Box::new(StaticProviderFactory));

        assert!(registry.has_provider("static"));
        assert_eq!(registry.list_providers(), vec!["static".to_string()]);
    }

    #[test]
    fn test_create_registered_provider() {
        let registry = ProviderRegistry::new();
        registry.register_provider("static", Box::new(StaticProviderFactory));

        let config = ProviderConfig::new("static").with_api_token("token");
        let provider = registry.create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "static");

        let record = tokio_test::block_on(provider.get_record("example.com", "home.example.com", "A"))
            .unwrap();
        assert_eq!(record.zone_name(), "example.com");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let registry = ProviderRegistry::new();
        registry.register_provider("static", Box::new(StaticProviderFactory));
        registry.register_provider("another", Box::new(StaticProviderFactory));

        let err = registry
            .create_provider(&ProviderConfig::new("route53").with_api_token("token"))
            .err()
            .unwrap();

        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid provider name 'route53', options are [another, static]"
        );
    }

    #[test]
    fn test_factory_rejection_propagates() {
        let registry = ProviderRegistry::new();
        registry.register_provider("static", Box::new(StaticProviderFactory));

        let err = registry
            .create_provider(&ProviderConfig::new("static"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
