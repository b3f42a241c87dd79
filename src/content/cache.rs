use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use tracing::warn;

/// Memoizing loader for structured-data (JSON) files.
///
/// The first load of a path parses the file and stores the result; later
/// loads return the cached value without touching the filesystem. A read or
/// parse failure is cached as a "no value" sentinel: it is logged once, never
/// retried, and never surfaces as an error. Callers must treat the sentinel
/// as "no information available".
#[derive(Debug, Default)]
pub struct DataCache {
    entries: HashMap<String, Option<Value>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and memoize the parsed value for a path
    pub fn load(&mut self, path: &str) -> Option<&Value> {
        if !self.entries.contains_key(path) {
            let parsed = match fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!("Error parsing {}: {}", path, e);
                        None
                    }
                },
                Err(e) => {
                    warn!("Error loading {}: {}", path, e);
                    None
                }
            };
            self.entries.insert(path.to_string(), parsed);
        }
        self.entries.get(path).and_then(|v| v.as_ref())
    }

    /// Number of memoized paths, including failure sentinels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
