use std::sync::Arc;

use anyhow::Context;
use kanal::AsyncSender;
use tango_core::{KeyValueStore, LineParser, VocabularyStore};
use tango_io::ShortenerClient;
use tango_ocr::{ImageIntake, OcrAdapter, RecognitionEngine};
use tango_toolbox::{Notepad, Stopwatch, TodoList};
use tango_types::AppEvent;

use crate::state::AppState;

/// Everything the event loop owns.
///
/// Only the event loop task touches these, so none of them need locking.
pub struct AppContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub parser: Arc<dyn LineParser>,
    pub adapter: OcrAdapter,
    pub intake: ImageIntake,
    pub store: VocabularyStore,
    pub notepad: Notepad,
    pub todos: TodoList,
    pub shortener: ShortenerClient,
    pub stopwatch: Stopwatch,
    pub last_short_url: Option<String>,
}

impl AppContext {
    /// Starts OCR engine setup in the background
    pub async fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        parser: Arc<dyn LineParser>,
        engine: Box<dyn RecognitionEngine>,
        backend: Arc<dyn KeyValueStore>,
    ) -> Self {
        let config = state.config.read().await.clone();

        let adapter = OcrAdapter::start(
            engine,
            config.ocr.language.clone(),
            config.ocr.confidence_threshold,
        );
        let store = VocabularyStore::open(backend.clone(), config.storage.vocabulary_key.clone());

        Self {
            state,
            event_tx,
            parser,
            adapter,
            intake: ImageIntake::new(config.ocr.preview_max_width),
            store,
            notepad: Notepad::new(backend.clone(), config.storage.note_key.clone()),
            todos: TodoList::open(backend, config.storage.todo_key.clone()),
            shortener: ShortenerClient::new(config.shortener.endpoint()),
            stopwatch: Stopwatch::new(),
            last_short_url: None,
        }
    }

    /// Post an event to the UI
    pub async fn send(&self, event: AppEvent) -> anyhow::Result<()> {
        self.event_tx
            .send(event)
            .await
            .context("UI channel closed")
    }

    pub async fn alert(&self, message: impl Into<String>) -> anyhow::Result<()> {
        self.send(AppEvent::Alert(message.into())).await
    }
}
