use tango_types::WordForm;

use crate::error::EntryError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// A validated entry waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub japanese: String,
    pub reading: Option<String>,
    pub meaning: String,
}

impl NewEntry {
    pub fn new(japanese: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            japanese: japanese.into(),
            reading: None,
            meaning: meaning.into(),
        }
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = Some(reading.into());
        self
    }

    /// Headword and meaning are required, reading is not
    pub fn from_form(form: &WordForm) -> Result<Self, EntryError> {
        let pre = DefaultPreprocessor;
        let japanese = pre.process(&form.japanese);
        let reading = pre.process(&form.reading);
        let meaning = pre.process(&form.meaning);

        if japanese.is_empty() || meaning.is_empty() {
            return Err(EntryError::Incomplete);
        }

        Ok(Self {
            japanese,
            reading: (!reading.is_empty()).then_some(reading),
            meaning,
        })
    }
}
