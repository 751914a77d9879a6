use std::env;

use serde::{Deserialize, Serialize};

fn default_vocabulary_key() -> String {
    "vocabulary".to_string()
}

fn default_note_key() -> String {
    "saved_note".to_string()
}

fn default_todo_key() -> String {
    "todos".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key/value files. Platform data dir when unset.
    pub data_dir: Option<String>,
    #[serde(default = "default_vocabulary_key")]
    pub vocabulary_key: String,
    #[serde(default = "default_note_key")]
    pub note_key: String,
    #[serde(default = "default_todo_key")]
    pub todo_key: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        Self {
            data_dir: env::var("TANGO_DATA_DIR").ok(),
            ..Self::default()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            vocabulary_key: default_vocabulary_key(),
            note_key: default_note_key(),
            todo_key: default_todo_key(),
        }
    }
}
