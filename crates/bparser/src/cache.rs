//! Append-only memo tables used by the parser

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Hit/miss counters for one memo table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the table
    pub hits: u64,
    /// Lookups that fell through
    pub misses: u64,
    /// Number of stored entries
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Miss rate as a percentage (0.0 to 100.0)
    pub fn miss_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            100.0 - self.hit_rate()
        }
    }
}

/// String to string memo table
///
/// Entries are never evicted. Disabling the table makes lookups miss and
/// stores do nothing, but keeps what was already stored.
#[derive(Debug, Clone)]
pub struct MemoCache {
    entries: HashMap<String, String>,
    enabled: bool,
    hits: u64,
    misses: u64,
}

impl MemoCache {
    /// Create an empty table
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: HashMap::new(),
            enabled,
            hits: 0,
            misses: 0,
        }
    }

    /// Whether lookups and stores are active
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn lookups and stores on or off without touching stored entries
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Look up a key, recording a hit or miss
    pub fn get(&mut self, key: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a value; a no-op while disabled
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.enabled {
            self.entries.insert(key.into(), value.into());
        }
    }

    /// Whether a key is stored, regardless of the enabled flag
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(true)
    }
}
