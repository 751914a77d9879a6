use async_trait::async_trait;
use tango_types::RecognizedLine;

use crate::datauri::DataUri;
use crate::error::OcrError;

/// Status the adapter forwards to the progress indicator
pub const RECOGNIZING_TEXT: &str = "recognizing text";

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub status: String,
    /// 0.0-1.0
    pub progress: f32,
}

impl Progress {
    pub fn new(status: impl Into<String>, progress: f32) -> Self {
        Self {
            status: status.into(),
            progress,
        }
    }
}

pub type ProgressFn = dyn Fn(Progress) + Send + Sync;

#[derive(Debug, Clone, Default)]
pub struct RecognitionOutput {
    pub lines: Vec<RecognizedLine>,
    /// Full recognized text
    pub text: String,
}

/// A stateful text recognition engine.
///
/// Setup runs once, in order: `load`, `load_language`, `initialize`.
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Engine identifier (e.g. "tesseract")
    fn name(&self) -> &str;

    async fn load(&mut self) -> Result<(), OcrError>;

    async fn load_language(&mut self, language: &str) -> Result<(), OcrError>;

    async fn initialize(&mut self, language: &str) -> Result<(), OcrError>;

    async fn recognize(
        &self,
        image: &DataUri,
        progress: &ProgressFn,
    ) -> Result<RecognitionOutput, OcrError>;
}
