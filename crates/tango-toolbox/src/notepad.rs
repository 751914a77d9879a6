use std::sync::Arc;

use tango_core::{KeyValueStore, StorageError};

/// A single free-text note
pub struct Notepad {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl Notepad {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn save(&self, text: &str) -> Result<(), StorageError> {
        self.backend.set(&self.key, &serde_json::to_string(text)?)
    }

    /// Empty when nothing was saved or the slot is unreadable
    pub fn load(&self) -> String {
        match self.backend.get(&self.key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Saved note is malformed: {}", e);
                String::new()
            }),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved note: {}", e);
                String::new()
            }
        }
    }
}
