use std::sync::Arc;

use tango_types::RecognizedLine;
use tokio::sync::{Mutex, watch};

use crate::datauri::DataUri;
use crate::engine::{Progress, RECOGNIZING_TEXT, RecognitionEngine};
use crate::error::OcrError;

#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutcome {
    Lines(Vec<RecognizedLine>),
    /// Nothing scored above the threshold
    NoResults,
}

/// Owns the single engine instance.
///
/// Setup starts in the background as soon as the adapter is created and every
/// `recognize` call waits for it. Calls are serialized on the engine lock.
pub struct OcrAdapter {
    engine: Arc<Mutex<Box<dyn RecognitionEngine>>>,
    readiness: watch::Receiver<Readiness>,
    progress: Arc<watch::Sender<f32>>,
    threshold: f32,
}

impl OcrAdapter {
    /// Must be called from inside a tokio runtime
    pub fn start(
        engine: Box<dyn RecognitionEngine>,
        language: impl Into<String>,
        threshold: f32,
    ) -> Self {
        let language = language.into();
        let engine = Arc::new(Mutex::new(engine));
        let (ready_tx, readiness) = watch::channel(Readiness::Pending);
        let (progress, _) = watch::channel(0.0_f32);

        let init_engine = engine.clone();
        tokio::spawn(async move {
            let mut engine = init_engine.lock().await;
            tracing::info!("Initializing OCR engine '{}' ({})", engine.name(), language);

            let state = match setup(&mut **engine, &language).await {
                Ok(()) => {
                    tracing::info!("OCR engine ready");
                    Readiness::Ready
                }
                Err(e) => {
                    tracing::error!("OCR engine setup failed: {}", e);
                    Readiness::Failed(e.to_string())
                }
            };
            let _ = ready_tx.send(state);
        });

        Self {
            engine,
            readiness,
            progress: Arc::new(progress),
            threshold,
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness.borrow().clone()
    }

    /// Resolves once setup finished
    pub async fn ready(&self) -> Result<(), OcrError> {
        let mut rx = self.readiness.clone();
        let state = rx
            .wait_for(|s| *s != Readiness::Pending)
            .await
            .map_err(|_| OcrError::InitFailure("setup task ended unexpectedly".to_string()))?;

        match &*state {
            Readiness::Failed(reason) => Err(OcrError::InitFailure(reason.clone())),
            _ => Ok(()),
        }
    }

    /// Fraction of the current recognition, for progress indicators
    pub fn progress(&self) -> watch::Receiver<f32> {
        self.progress.subscribe()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub async fn recognize(&self, image: &DataUri) -> Result<RecognitionOutcome, OcrError> {
        self.ready()
            .await
            .map_err(|e| OcrError::RecognitionFailure(e.to_string()))?;

        let engine = self.engine.lock().await;
        self.progress.send_replace(0.0);

        let progress = self.progress.clone();
        let on_progress = move |p: Progress| {
            if p.status != RECOGNIZING_TEXT {
                return;
            }
            let value = p.progress.clamp(0.0, 1.0);
            progress.send_if_modified(|current| {
                if value > *current {
                    *current = value;
                    true
                } else {
                    false
                }
            });
        };

        let output = engine
            .recognize(image, &on_progress)
            .await
            .map_err(|e| match e {
                OcrError::RecognitionFailure(_) => e,
                other => OcrError::RecognitionFailure(other.to_string()),
            })?;
        drop(engine);

        tracing::debug!(
            "Engine returned {} lines ({} chars)",
            output.lines.len(),
            output.text.chars().count()
        );

        let lines = filter_confident(output.lines, self.threshold);
        if lines.is_empty() {
            Ok(RecognitionOutcome::NoResults)
        } else {
            Ok(RecognitionOutcome::Lines(lines))
        }
    }
}

async fn setup(engine: &mut dyn RecognitionEngine, language: &str) -> Result<(), OcrError> {
    engine.load().await?;
    engine.load_language(language).await?;
    engine.initialize(language).await?;
    Ok(())
}

/// Keep lines scoring strictly above `threshold`
pub fn filter_confident(lines: Vec<RecognizedLine>, threshold: f32) -> Vec<RecognizedLine> {
    lines
        .into_iter()
        .filter(|line| line.confidence > threshold)
        .collect()
}
