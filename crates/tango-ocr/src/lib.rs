mod adapter;
mod datauri;
mod engine;
mod error;
mod intake;
mod tesseract;

pub use adapter::{OcrAdapter, Readiness, RecognitionOutcome, filter_confident};
pub use datauri::DataUri;
pub use engine::{Progress, ProgressFn, RECOGNIZING_TEXT, RecognitionEngine, RecognitionOutput};
pub use error::{IntakeError, OcrError};
pub use intake::{ImageIntake, ImageSource, Preview, declared_type_for_path};
pub use tesseract::{TesseractEngine, parse_tsv};
