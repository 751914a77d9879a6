use std::env;

use serde::{Deserialize, Serialize};

use self::ocr::OcrConfig;
use self::shortener::ShortenerConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod ocr;
pub mod shortener;
pub mod storage;
pub mod ui;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub storage: StorageConfig,
    pub shortener: ShortenerConfig,
    pub ui: UiConfig,

    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
    /// Capacity of the app -> UI channel
    pub ui_channel_capacity: usize,
    /// Capacity of the UI -> app channel
    pub app_channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let log_json = env::var("TANGO_LOG_JSON")
            .ok()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let ui_channel_capacity = env::var("TANGO_UI_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(256);

        let app_channel_capacity = env::var("TANGO_APP_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Config {
            ocr: OcrConfig::new(),
            storage: StorageConfig::new(),
            shortener: ShortenerConfig::new(),
            ui: UiConfig::default(),

            log_json,
            ui_channel_capacity,
            app_channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
