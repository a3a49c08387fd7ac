// # update-dns-core
//
// Core library for the update-dns-record dynamic DNS updater.
//
// ## Architecture Overview
//
// - **DnsProvider**: Trait for reading and writing DNS records via provider APIs
// - **DnsRecord**: Immutable snapshot of one provider-side record
// - **IpSource**: Trait for discovering the caller's public IP
// - **Reconciler**: Decides between no-op, update and create for one record
// - **ProviderRegistry**: Plugin-based registry for DNS providers
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from provider implementations
// 2. **Plugin-Based**: Providers are registered by name, no hard-coded if-else
// 3. **Library-First**: The binary is a thin layer over this crate
// 4. **Idempotency**: A record that already holds the desired content is never written

pub mod config;
pub mod error;
pub mod reconcile;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::{ProviderConfig, UpdateRequest};
pub use error::{Error, Result};
pub use reconcile::{Lookup, ReconcileOutcome, Reconciler};
pub use registry::ProviderRegistry;
pub use traits::{DnsProvider, DnsProviderFactory, DnsRecord, IpSource, IpVersion};
