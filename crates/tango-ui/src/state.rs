use tango_types::{RecognizedLine, WordForm};

use crate::view::WordCard;

/// UI-side state: what is on screen, never the source of truth
#[derive(Debug, Default)]
pub struct UiState {
    pub lines: Vec<RecognizedLine>,
    pub cards: Vec<WordCard>,
    pub form: WordForm,
    pub last_short_url: Option<String>,
    pub ocr_running: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
