//! In-memory store of captured resources, deduplicated by exact URL.
//!
//! Entries are immutable after insertion: the first accepted observation of
//! a URL wins all fields, including `size`. Later observations of the same
//! URL (e.g. from the second capture channel) are no-ops. The map keeps
//! insertion order so snapshots list resources in capture order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::ResourceCategory;

/// One captured resource. Created on first accepted observation of a URL;
/// never mutated; removed only by `clear` or session restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedResource {
    pub url: String,
    pub category: ResourceCategory,
    pub format: String,
    /// Best-effort byte count from the Content-Length header; 0 if unknown.
    /// Not updated retroactively when a later observation carries a length.
    pub size: u64,
    /// Capture time, Unix milliseconds.
    pub timestamp: i64,
    pub status_code: u16,
    pub method: String,
    pub content_type: String,
}

/// Deduplicated, insertion-ordered resource store.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    entries: IndexMap<String, CapturedResource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the URL is already present. Returns true if inserted.
    /// The first writer's entry survives; a duplicate insert is a no-op.
    pub fn insert_if_absent(&mut self, resource: CapturedResource) -> bool {
        if self.entries.contains_key(&resource.url) {
            return false;
        }
        self.entries.insert(resource.url.clone(), resource);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the registry and resets derived counts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot of all entries in insertion order.
    pub fn snapshot(&self) -> Vec<CapturedResource> {
        self.entries.values().cloned().collect()
    }

    pub fn get(&self, url: &str) -> Option<&CapturedResource> {
        self.entries.get(url)
    }

    /// Repopulates from a persisted list (restoration). Existing entries are
    /// dropped; the persisted order becomes the insertion order.
    pub fn replace_all(&mut self, resources: Vec<CapturedResource>) {
        self.entries.clear();
        for resource in resources {
            self.entries.insert(resource.url.clone(), resource);
        }
    }
}
