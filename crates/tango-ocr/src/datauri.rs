use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::OcrError;

/// `data:<mime>;base64,<payload>`
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn parse(uri: &str) -> Result<Self, OcrError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| OcrError::InvalidDataUri("missing data: scheme".to_string()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| OcrError::InvalidDataUri("missing payload".to_string()))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| OcrError::InvalidDataUri("only base64 payloads are supported".to_string()))?;

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| OcrError::InvalidDataUri(e.to_string()))?;

        Ok(Self::new(mime, bytes))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

// Payloads are large, keep logs readable
impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUri")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}
