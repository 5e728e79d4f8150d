//! Instance cache for shared services.

use crate::blueprint::AnyArc;
use crate::internal::sync::Mutex;
use crate::internal::Map;

/// Name-keyed cache of built shared instances.
///
/// Entries appear on first successful build and live until explicit
/// invalidation (re-registration of the name) or container teardown. There
/// is no eviction policy. Transient services never appear here.
pub(crate) struct InstanceCache {
    entries: Mutex<Map<String, AnyArc>>,
}

impl InstanceCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Map::default()),
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<AnyArc> {
        self.entries.lock().get(name).cloned()
    }

    /// Stores `value` under `name` and returns the canonical instance.
    ///
    /// Double-checked: if a concurrent build of the same name landed first,
    /// that instance wins and is returned instead, so every caller converges
    /// on one identity.
    pub(crate) fn put(&self, name: &str, value: AnyArc) -> AnyArc {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(name) {
            return existing.clone();
        }
        entries.insert(name.to_string(), value.clone());
        value
    }

    pub(crate) fn invalidate(&self, name: &str) {
        self.entries.lock().remove(name);
    }

    pub(crate) fn clear(&self) {
        self.entries.lock().clear();
    }

    #[cfg(feature = "graph-export")]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }
}
