use std::fmt;

use tango_types::{AppEvent, VocabularyEntry};

/// One vocabulary card as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCard {
    pub id: u64,
    pub japanese: String,
    pub reading: Option<String>,
    pub meaning: String,
}

impl WordCard {
    /// Event the card's delete control sends
    pub fn delete_action(&self) -> AppEvent {
        AppEvent::DeleteWord(self.id)
    }
}

impl fmt::Display for WordCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.japanese)?;
        if let Some(reading) = &self.reading {
            write!(f, " ({reading})")?;
        }
        writeln!(f)?;
        writeln!(f, "    {}", self.meaning)?;
        write!(f, "    delete {}", self.id)
    }
}

/// Full redraw, in store order
pub fn render(entries: &[VocabularyEntry]) -> Vec<WordCard> {
    entries
        .iter()
        .map(|entry| WordCard {
            id: entry.id,
            japanese: entry.japanese.clone(),
            reading: entry.reading.clone(),
            meaning: entry.meaning.clone(),
        })
        .collect()
}

pub fn render_text(cards: &[WordCard]) -> String {
    if cards.is_empty() {
        return "Vocabulary is empty".to_string();
    }

    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
