//! Test doubles and common utilities for reconciliation contract tests
//!
//! `InMemoryProvider` keeps zones and records in memory, applies the same
//! 0 / 1 / many cardinality policy a real provider does, and counts every
//! call so tests can assert exactly which writes happened.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use update_dns_core::error::{Error, Result};
use update_dns_core::traits::{DnsProvider, DnsRecord};

/// A failure the provider returns from `get_record` instead of looking anything up
pub type InjectedFailure = Box<dyn Fn() -> Error + Send + Sync>;

#[derive(Default)]
struct Zone {
    id: String,
    records: Vec<DnsRecord>,
}

/// An in-memory DnsProvider that tracks calls
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    zones: Arc<Mutex<HashMap<String, Zone>>>,
    get_call_count: Arc<AtomicUsize>,
    create_call_count: Arc<AtomicUsize>,
    update_call_count: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<InjectedFailure>>>,
    next_id: Arc<AtomicUsize>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty zone
    pub fn with_zone(self, zone_name: &str, zone_id: &str) -> Self {
        self.zones.lock().unwrap().insert(
            zone_name.to_string(),
            Zone {
                id: zone_id.to_string(),
                records: Vec::new(),
            },
        );
        self
    }

    /// Add a record to an existing zone
    pub fn with_record(self, zone_name: &str, id: &str, name: &str, record_type: &str, content: &str) -> Self {
        {
            let mut zones = self.zones.lock().unwrap();
            let zone = zones.get_mut(zone_name).expect("zone must be added first");
            let record = DnsRecord::new(id, name, content, record_type, zone.id.clone(), zone_name);
            zone.records.push(record);
        }
        self
    }

    /// Make every `get_record` call fail with the produced error
    pub fn failing_with(self, failure: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        *self.failure.lock().unwrap() = Some(Box::new(failure));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.get_call_count.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_call_count.load(Ordering::SeqCst)
    }

    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    pub fn write_call_count(&self) -> usize {
        self.create_call_count() + self.update_call_count()
    }

    /// Current content of the single `(name, type)` record, if any
    pub fn content_of(&self, zone_name: &str, name: &str, record_type: &str) -> Option<String> {
        let zones = self.zones.lock().unwrap();
        zones.get(zone_name).and_then(|zone| {
            zone.records
                .iter()
                .find(|r| r.name() == name && r.record_type() == record_type)
                .map(|r| r.content().to_string())
        })
    }
}

#[async_trait::async_trait]
impl DnsProvider for InMemoryProvider {
    async fn get_record(&self, zone_name: &str, record_name: &str, record_type: &str) -> Result<DnsRecord> {
        self.get_call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = self.failure.lock().unwrap().as_ref() {
            return Err(failure());
        }

        let zones = self.zones.lock().unwrap();
        let zone = zones
            .get(zone_name)
            .ok_or_else(|| Error::zone_not_found(zone_name))?;

        let matches: Vec<&DnsRecord> = zone
            .records
            .iter()
            .filter(|r| r.name() == record_name && r.record_type() == record_type)
            .collect();

        match matches.as_slice() {
            [] => Err(Error::record_not_found(record_name, record_type)),
            [record] => Ok((*record).clone()),
            many => Err(Error::ambiguous_record(record_name, record_type, many.len())),
        }
    }

    async fn create_record(
        &self,
        zone_name: &str,
        record_name: &str,
        content: &str,
        record_type: &str,
    ) -> Result<DnsRecord> {
        self.create_call_count.fetch_add(1, Ordering::SeqCst);

        let mut zones = self.zones.lock().unwrap();
        let zone = zones
            .get_mut(zone_name)
            .ok_or_else(|| Error::zone_not_found(zone_name))?;

        let id = format!("created-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = DnsRecord::new(id, record_name, content, record_type, zone.id.clone(), zone_name);
        zone.records.push(record.clone());
        Ok(record)
    }

    async fn update_record_content(&self, record: &DnsRecord, content: &str) -> Result<DnsRecord> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);

        let mut zones = self.zones.lock().unwrap();
        let stored = zones
            .values_mut()
            .filter(|zone| zone.id == record.zone_id())
            .flat_map(|zone| zone.records.iter_mut())
            .find(|r| r.id() == record.id())
            .ok_or_else(|| Error::request_failed("memory", 404, "record does not exist"))?;

        let replacement = DnsRecord::new(
            stored.id(),
            stored.name(),
            content,
            stored.record_type(),
            stored.zone_id(),
            stored.zone_name(),
        );
        *stored = replacement.clone();
        Ok(replacement)
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}

/// The zone used throughout the scenarios: `example.com` (id `z1`) holding
/// `home.example.com A 1.2.3.4` (id `r1`)
pub fn example_zone() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_zone("example.com", "z1")
        .with_record("example.com", "r1", "home.example.com", "A", "1.2.3.4")
}
