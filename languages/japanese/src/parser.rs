use tango_core::language::{LineParser, ParsedLine};
use tango_types::FormFocus;

/// Pitch accent glyphs printed after headwords in textbooks (drop positions 0-4)
const ACCENT_MARKS: [char; 5] = ['⓪', '①', '②', '③', '④'];

/// Line parser for "headword  meaning" style vocabulary lists
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseLineParser;

impl LineParser for JapaneseLineParser {
    fn language_code(&self) -> &str {
        "ja"
    }

    fn parse(&self, raw_line: &str) -> ParsedLine {
        parse_line(raw_line)
    }
}

/// Split one OCR line into headword and meaning.
///
/// Splitting is whitespace only: a headword glued to its meaning stays in
/// `japanese` and `meaning` comes back empty.
pub fn parse_line(raw_line: &str) -> ParsedLine {
    let text = strip_ordinal(raw_line);
    let text: String = text.chars().filter(|c| !ACCENT_MARKS.contains(c)).collect();
    let text = strip_annotations(&text);

    let parts: Vec<&str> = text
        .split(char::is_whitespace)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() >= 2 {
        ParsedLine {
            japanese: parts[0].to_string(),
            meaning: parts[1..].join(" "),
        }
    } else {
        ParsedLine {
            japanese: text.trim().to_string(),
            meaning: String::new(),
        }
    }
}

/// Where the form should send the user after a line was used
pub fn focus_hint(parsed: &ParsedLine) -> FormFocus {
    if parsed.meaning.is_empty() {
        FormFocus::Meaning
    } else {
        FormFocus::Confirm
    }
}

/// Drop a leading "12." style number and the whitespace after it
fn strip_ordinal(text: &str) -> &str {
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return text;
    }

    match text[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}

/// Remove every non-empty `[...]`, shortest match first. Nesting is not understood.
fn strip_annotations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            Some(_) => {
                // "[]" is left alone
                out.push_str(&rest[..=open]);
                rest = after;
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
