//! Record reconciliation
//!
//! The [`Reconciler`] compares the desired content of one record with what
//! the provider currently holds and issues the minimal write to converge
//! them.
//!
//! ## Flow
//!
//! ```text
//!                 ┌──────────────┐
//!  UpdateRequest ─│  Reconciler  │
//!                 └──────────────┘
//!                        │ get_record
//!            ┌───────────┴────────────┐
//!            ▼                        ▼
//!      Lookup::Found            Lookup::Missing
//!            │                        │
//!   content equal? ── yes ─▶ Unchanged    create_if_missing? ── no ─▶ RecordNotFound
//!            │ no                     │ yes
//!            ▼                        ▼
//!   update_record_content      create_record
//!            │                        │
//!            ▼                        ▼
//!         Updated                  Created
//! ```
//!
//! Every other provider error propagates unchanged.

use crate::config::UpdateRequest;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsRecord};
use tracing::{debug, info, warn};

/// Result of looking up a record by name and type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Exactly one record matched
    Found(DnsRecord),
    /// No record matched
    Missing,
}

/// Observable result of a reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Record already had the desired content; nothing was written
    Unchanged {
        /// The record as fetched
        record: DnsRecord,
    },
    /// Record content was replaced
    Updated {
        /// Content before the update
        previous_content: String,
        /// The provider's post-update representation
        record: DnsRecord,
    },
    /// Record did not exist and was created
    Created {
        /// The provider's representation of the new record
        record: DnsRecord,
    },
}

impl ReconcileOutcome {
    /// The record as it stands after the run
    pub fn record(&self) -> &DnsRecord {
        match self {
            Self::Unchanged { record } | Self::Updated { record, .. } | Self::Created { record } => {
                record
            }
        }
    }

    /// Whether the run wrote to the provider
    pub fn wrote(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unchanged { .. } => "unchanged",
            Self::Updated { .. } => "updated",
            Self::Created { .. } => "created",
        }
    }
}

/// Converges one provider record to the desired content
///
/// The reconciler borrows its provider; it holds no state of its own, so
/// running it twice with the same request performs at most one write.
pub struct Reconciler<'a> {
    provider: &'a dyn DnsProvider,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over `provider`
    pub fn new(provider: &'a dyn DnsProvider) -> Self {
        Self { provider }
    }

    /// Look up a record, turning "not found" into [`Lookup::Missing`]
    ///
    /// Only [`Error::RecordNotFound`] is converted; zone errors, ambiguity
    /// and request failures are returned as errors.
    pub async fn lookup_record(
        &self,
        zone_name: &str,
        record_name: &str,
        record_type: &str,
    ) -> Result<Lookup> {
        match self
            .provider
            .get_record(zone_name, record_name, record_type)
            .await
        {
            Ok(record) => Ok(Lookup::Found(record)),
            Err(Error::RecordNotFound { .. }) => Ok(Lookup::Missing),
            Err(e) => Err(e),
        }
    }

    /// Reconcile the record described by `request`
    ///
    /// # Errors
    ///
    /// - [`Error::RecordNotFound`] when the record is missing and
    ///   `create_if_missing` is false; nothing is written
    /// - any error from the provider, unchanged
    pub async fn reconcile(&self, request: &UpdateRequest) -> Result<ReconcileOutcome> {
        let UpdateRequest {
            zone_name,
            record_name,
            record_type,
            content,
            create_if_missing,
        } = request;

        info!(
            provider = self.provider.provider_name(),
            zone = %zone_name,
            record = %record_name,
            record_type = %record_type,
            "Validating DNS record"
        );

        match self.lookup_record(zone_name, record_name, record_type).await? {
            Lookup::Found(record) => {
                debug!(
                    record = %record_name,
                    current = record.content(),
                    desired = %content,
                    "Comparing record content to requested content"
                );

                if record.content() == content.as_str() {
                    info!(record = %record_name, content = %content, "Record content is already up-to-date");
                    return Ok(ReconcileOutcome::Unchanged { record });
                }

                info!(
                    record = %record_name,
                    from = record.content(),
                    to = %content,
                    "Updating record content"
                );
                let updated = self.provider.update_record_content(&record, content).await?;

                Ok(ReconcileOutcome::Updated {
                    previous_content: record.content().to_string(),
                    record: updated,
                })
            }
            Lookup::Missing => {
                warn!(zone = %zone_name, record = %record_name, record_type = %record_type, "Record not found in zone");

                if !*create_if_missing {
                    return Err(Error::record_not_found(record_name.as_str(), record_type.as_str()));
                }

                info!(zone = %zone_name, record = %record_name, content = %content, "Creating record");
                let created = self
                    .provider
                    .create_record(zone_name, record_name, content, record_type)
                    .await?;

                Ok(ReconcileOutcome::Created { record: created })
            }
        }
    }
}
