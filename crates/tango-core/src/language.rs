/// Splits one recognized line into a headword and its meaning
pub trait LineParser: Send + Sync {
    /// Language identifier (ISO 639-1 code: "ja", "zh", "ko", etc.)
    fn language_code(&self) -> &str;

    fn parse(&self, raw_line: &str) -> ParsedLine;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    pub japanese: String,
    pub meaning: String,
}
