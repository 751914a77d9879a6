#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OcrError {
    #[error("Recognition failed: {0}")]
    RecognitionFailure(String),

    #[error("OCR engine failed to initialize: {0}")]
    InitFailure(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("Please provide a valid image file (got {0})")]
    InvalidInput(String),

    #[error("Failed to read image: {0}")]
    ReadFailure(String),
}
