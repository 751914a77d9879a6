use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> app
    LoadImage(PathBuf),
    PasteImage,
    StartOcr,
    ParseText(String),
    AddWord(WordForm),
    DeleteWord(u64),
    ListWords,
    Shorten(String),
    CopyShortUrl,
    Calculate(String),
    SaveNote(String),
    ShowNote,
    AddTodo(String),
    ToggleTodo(String),
    RemoveTodo(String),
    ListTodos,
    ToggleStopwatch,
    StartTimer(String),
    ShowClock,
    Quit,

    // App -> UI
    Alert(String),
    PreviewUpdated(PreviewInfo),
    OcrStatusUpdate {
        status: String,
        running: bool,
    },
    ShowLines(Vec<RecognizedLine>),
    NoResults,
    FillForm {
        japanese: String,
        meaning: String,
        focus: FormFocus,
    },
    WordAdded(u64),
    ShowVocabulary(Vec<VocabularyEntry>),
    ShortUrl(String),
    ShortenFailed(String),
    CopyFallback(String),
    CalcResult(String),
    Note(String),
    ShowTodos(Vec<TodoItem>),
    StopwatchTick(String),
    StopwatchStopped(String),
    Clock {
        date: String,
        time: String,
    },
}

/// A stored vocabulary word.
///
/// `reading` is optional so records written without one still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: u64,
    pub japanese: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default)]
    pub meaning: String,
}

/// Raw form fields as the user typed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordForm {
    pub japanese: String,
    pub reading: String,
    pub meaning: String,
}

/// One line of OCR output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedLine {
    pub text: String,
    /// 0-100
    pub confidence: f32,
}

/// Which form field the user should look at after a line was used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Meaning,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub source: ImageOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    File,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}
