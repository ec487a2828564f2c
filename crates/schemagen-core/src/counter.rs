//! Per-run named counters exposed to templates.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable handle to a map of named counters.
///
/// Clones share state, so the handle given to each template helper sees the
/// same values. A fresh `Counter` starts empty; nothing is shared between
/// runs.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    values: Arc<Mutex<HashMap<String, i64>>>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `key` and return the new value. Unknown keys start at 0.
    pub fn increment(&self, key: &str) -> i64 {
        let mut values = self.values.lock();
        let value = values.entry(key.to_string()).or_insert(0);
        *value += 1;
        *value
    }

    /// Current value of `key`, 0 if never incremented.
    pub fn get(&self, key: &str) -> i64 {
        self.values.lock().get(key).copied().unwrap_or(0)
    }

    /// Forget `key`.
    pub fn reset(&self, key: &str) {
        self.values.lock().remove(key);
    }

    /// Forget every key.
    pub fn clear(&self) {
        self.values.lock().clear();
    }
}
