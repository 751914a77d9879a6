use tango_core::{LineParser, NewEntry};
use tango_lang_japanese::focus_hint;
use tango_types::{AppEvent, WordForm};

use crate::context::AppContext;

/// Fill the form from one recognized (or typed) line
pub async fn handle_parse_text(ctx: &mut AppContext, text: &str) -> anyhow::Result<()> {
    let parsed = ctx.parser.parse(text);
    let focus = focus_hint(&parsed);

    ctx.send(AppEvent::FillForm {
        japanese: parsed.japanese,
        meaning: parsed.meaning,
        focus,
    })
    .await
}

pub async fn handle_add_word(ctx: &mut AppContext, form: &WordForm) -> anyhow::Result<()> {
    let entry = match NewEntry::from_form(form) {
        Ok(entry) => entry,
        Err(e) => return ctx.alert(e.to_string()).await,
    };

    let id = ctx.store.append(entry);
    tracing::info!("Added word {} ({} total)", id, ctx.store.len());

    ctx.send(AppEvent::WordAdded(id)).await?;
    handle_list_words(ctx).await
}

pub async fn handle_delete_word(ctx: &mut AppContext, id: u64) -> anyhow::Result<()> {
    ctx.store.remove(id);
    handle_list_words(ctx).await
}

pub async fn handle_list_words(ctx: &mut AppContext) -> anyhow::Result<()> {
    let entries = ctx.store.entries().to_vec();
    ctx.send(AppEvent::ShowVocabulary(entries)).await
}
