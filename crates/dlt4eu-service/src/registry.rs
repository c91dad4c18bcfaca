use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::model::Identifier;

/// Concurrent-safe store mapping identifier strings to identifier records.
///
/// A single mutual-exclusion lock serializes both operations; the lock is
/// held only for the map insert/lookup, never across a cryptographic call.
/// Entries live for the lifetime of the process — no TTL, no eviction.
#[derive(Default)]
pub struct IdentifierRegistry {
    entries: Mutex<HashMap<String, Arc<Identifier>>>,
}

impl IdentifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier, overwriting any previous record with the
    /// same id.
    pub fn add(&self, identifier: Arc<Identifier>) {
        let mut entries = self.lock();
        entries.insert(identifier.id().to_string(), identifier);
    }

    /// Look up an identifier by id.
    pub fn get(&self, id: &str) -> Option<Arc<Identifier>> {
        let entries = self.lock();
        entries.get(id).cloned()
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Identifier>>> {
        // A poisoned lock only means another worker panicked mid-insert;
        // the map itself is still structurally sound.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
