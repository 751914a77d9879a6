use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    /// Base URL of the shortener service
    pub base_url: String,
}

impl ShortenerConfig {
    pub fn new() -> Self {
        let base_url = env::var("TANGO_SHORTENER_URL")
            .unwrap_or_else(|_| "http://localhost:5003".to_string());

        Self { base_url }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/shorten", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::new()
    }
}
