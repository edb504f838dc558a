// ABOUTME: Write-once keyed value store for passing data between tasks
// ABOUTME: Entries are addressed by (producer task id, key) and live for one run

use serde_json::Value;
use std::collections::HashMap;

use super::error::{ExecutionError, Result};

/// In-memory store mapping `(producer_id, key)` to a value. Written once per
/// run by the producing task, read by tasks that declare the producer as an
/// upstream dependency. No schema validation: value shape is the contract
/// between producer and consumer.
#[derive(Debug, Default)]
pub struct Exchange {
    entries: HashMap<(String, String), Value>,
}

impl Exchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `(producer_id, key)`. A second write to the same
    /// cell in the same run is an error, not a silent overwrite.
    pub fn publish(&mut self, producer_id: &str, key: &str, value: Value) -> Result<()> {
        let cell = (producer_id.to_string(), key.to_string());
        if self.entries.contains_key(&cell) {
            return Err(ExecutionError::DuplicateKey {
                producer_id: producer_id.to_string(),
                key: key.to_string(),
            });
        }
        self.entries.insert(cell, value);
        Ok(())
    }

    /// Look up `key` for each producer in `producer_ids`, returning the values
    /// positionally aligned with the requested ids. A missing cell signals
    /// either a skipped upstream task or a logic error in the caller.
    pub fn fetch(&self, key: &str, producer_ids: &[String]) -> Result<Vec<Value>> {
        producer_ids
            .iter()
            .map(|producer_id| {
                self.entries
                    .get(&(producer_id.clone(), key.to_string()))
                    .cloned()
                    .ok_or_else(|| ExecutionError::MissingKey {
                        producer_id: producer_id.clone(),
                        key: key.to_string(),
                    })
            })
            .collect()
    }

    /// All keys a producer has published so far, sorted for determinism.
    pub fn published_keys(&self, producer_id: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .filter(|(producer, _)| producer == producer_id)
            .map(|(_, key)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
