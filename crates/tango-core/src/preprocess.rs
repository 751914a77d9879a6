use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default form field cleanup
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFC only: NFKC would fold full-width forms the user typed on purpose
        let text: String = text.nfc().collect();

        text.replace(['\n', '\r'], " ").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
