use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "jpn".to_string()
}

fn default_tesseract_path() -> String {
    "tesseract".to_string()
}

fn default_confidence_threshold() -> f32 {
    30.0
}

fn default_preview_max_width() -> u32 {
    800
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language model, e.g. "jpn" or "jpn+eng"
    #[serde(default = "default_language")]
    pub language: String,
    /// Path or name of the tesseract executable
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,
    /// Lines must score strictly above this to be shown
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Previews wider than this are scaled down for display
    #[serde(default = "default_preview_max_width")]
    pub preview_max_width: u32,
}

impl OcrConfig {
    pub fn new() -> Self {
        let language = env::var("TANGO_OCR_LANGUAGE").unwrap_or_else(|_| default_language());
        let tesseract_path =
            env::var("TANGO_TESSERACT_PATH").unwrap_or_else(|_| default_tesseract_path());

        Self {
            language,
            tesseract_path,
            ..Self::default()
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tesseract_path: default_tesseract_path(),
            confidence_threshold: default_confidence_threshold(),
            preview_max_width: default_preview_max_width(),
        }
    }
}
