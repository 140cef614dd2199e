//! In-memory TTL cache for API responses.
//!
//! Caches raw JSON payloads keyed by request identity. Only reads go
//! through the cache; query execution and mutations never do, since
//! their results are time-sensitive.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Five minutes, matching how often project metadata tends to change.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Thread-safe response cache. Expired entries are dropped on read.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// A still-fresh payload for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a payload under `key` for the configured TTL.
    pub fn set(&self, key: &str, value: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    expires_at: Instant::now() + self.ttl,
                },
            );
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}
