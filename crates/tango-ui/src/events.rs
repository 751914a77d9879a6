use std::io::{self, Write};

use tango_types::{AppEvent, FormFocus, ImageOrigin, TodoItem};

use crate::state::UiState;
use crate::view;

/// Apply one app event to the screen and UI state
pub fn handle_events<W: Write>(event: AppEvent, state: &mut UiState, out: &mut W) -> io::Result<()> {
    match event {
        AppEvent::Alert(message) => {
            writeln!(out, "{message}")?;
        }
        AppEvent::PreviewUpdated(info) => {
            if info.source == ImageOrigin::Clipboard {
                writeln!(out, "Image pasted successfully!")?;
            }
            writeln!(
                out,
                "Preview: {} {}x{} (shown at {}x{})",
                info.mime, info.width, info.height, info.display_width, info.display_height
            )?;
        }
        AppEvent::OcrStatusUpdate { status, running } => {
            if state.ocr_running && !running {
                // End the progress line
                writeln!(out)?;
            }
            state.ocr_running = running;
            tracing::debug!("[UI] OCR status: {} (running: {})", status, running);
            writeln!(out, "{status}")?;
        }
        AppEvent::ShowLines(lines) => {
            for (i, line) in lines.iter().enumerate() {
                writeln!(out, "{:>3}. {}  ({:.0}%)", i + 1, line.text, line.confidence)?;
            }
            writeln!(out, "Type use <n> to fill the form from a line")?;
            state.lines = lines;
        }
        AppEvent::NoResults => {
            state.lines.clear();
            writeln!(
                out,
                "No usable text was recognized. Try adjusting the image or uploading another one."
            )?;
        }
        AppEvent::FillForm {
            japanese,
            meaning,
            focus,
        } => {
            state.form.japanese = japanese;
            state.form.reading.clear();
            state.form.meaning = meaning;
            write_form(state, out)?;
            match focus {
                FormFocus::Meaning => writeln!(out, "Add a meaning with: set meaning <text>")?,
                FormFocus::Confirm => writeln!(out, "Type add to save the word")?,
            }
        }
        AppEvent::WordAdded(id) => {
            state.form = Default::default();
            writeln!(out, "Added word {id}")?;
        }
        AppEvent::ShowVocabulary(entries) => {
            state.cards = view::render(&entries);
            writeln!(out, "{}", view::render_text(&state.cards))?;
        }
        AppEvent::ShortUrl(url) => {
            writeln!(out, "Short URL: {url}")?;
            state.last_short_url = Some(url);
        }
        AppEvent::ShortenFailed(message) => {
            writeln!(out, "{message}")?;
        }
        AppEvent::CopyFallback(text) => {
            writeln!(out, "Clipboard unavailable, copy it manually:")?;
            writeln!(out, "{text}")?;
        }
        AppEvent::CalcResult(result) => {
            writeln!(out, "{result}")?;
        }
        AppEvent::Note(text) => {
            if text.is_empty() {
                writeln!(out, "(empty note)")?;
            } else {
                writeln!(out, "{text}")?;
            }
        }
        AppEvent::ShowTodos(items) => write_todos(&items, out)?,
        AppEvent::StopwatchTick(elapsed) => {
            writeln!(out, "Stopwatch: {elapsed}")?;
        }
        AppEvent::StopwatchStopped(elapsed) => {
            writeln!(out, "Stopwatch stopped at {elapsed}")?;
        }
        AppEvent::Clock { date, time } => {
            writeln!(out, "{date}  {time}")?;
        }
        other => {
            tracing::debug!("[UI] Ignoring request event {:?}", other);
        }
    }

    out.flush()
}

pub fn write_form<W: Write>(state: &UiState, out: &mut W) -> io::Result<()> {
    let form = &state.form;
    writeln!(out, "  japanese: {}", form.japanese)?;
    writeln!(out, "  reading:  {}", form.reading)?;
    writeln!(out, "  meaning:  {}", form.meaning)
}

fn write_todos<W: Write>(items: &[TodoItem], out: &mut W) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No todos");
    }
    for item in items {
        let mark = if item.done { 'x' } else { ' ' };
        let short: String = item.id.chars().take(8).collect();
        writeln!(out, "[{mark}] {}  ({short})", item.text)?;
    }
    Ok(())
}
