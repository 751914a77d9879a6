use kanal::AsyncReceiver;
use tango_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

pub mod image_input;
pub mod shorten;
pub mod toolbox;
pub mod trigger_ocr;
pub mod vocabulary;

use image_input::{handle_image_load, handle_image_paste};
use shorten::{handle_copy_short_url, handle_shorten};
use trigger_ocr::handle_ocr_trigger;
use vocabulary::{handle_add_word, handle_delete_word, handle_list_words, handle_parse_text};

/// App's main loop. Returns after acknowledging `Quit`, when the UI goes away,
/// or on cancellation.
pub async fn event_loop(
    mut ctx: AppContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let received = tokio::select! {
            biased;
            received = ui_to_app_rx.recv() => received,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
        };
        let Ok(event) = received else {
            tracing::info!("[EVENT_LOOP] UI channel closed");
            break;
        };

        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );

        if let AppEvent::Quit = event {
            ctx.stopwatch.stop();
            // Everything sent before this has already been queued for the UI
            ctx.send(AppEvent::Quit).await?;
            break;
        }

        handle_events(&mut ctx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

async fn handle_events(ctx: &mut AppContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::LoadImage(path) => handle_image_load(ctx, path).await?,
        AppEvent::PasteImage => handle_image_paste(ctx).await?,
        AppEvent::StartOcr => {
            tracing::debug!(">>> [OCR] Triggered");
            handle_ocr_trigger(ctx).await?;
        }
        AppEvent::ParseText(text) => handle_parse_text(ctx, &text).await?,
        AppEvent::AddWord(form) => handle_add_word(ctx, &form).await?,
        AppEvent::DeleteWord(id) => handle_delete_word(ctx, id).await?,
        AppEvent::ListWords => handle_list_words(ctx).await?,
        AppEvent::Shorten(url) => handle_shorten(ctx, &url).await?,
        AppEvent::CopyShortUrl => handle_copy_short_url(ctx).await?,
        AppEvent::Calculate(expr) => toolbox::handle_calculate(ctx, &expr).await?,
        AppEvent::SaveNote(text) => toolbox::handle_save_note(ctx, &text).await?,
        AppEvent::ShowNote => toolbox::handle_show_note(ctx).await?,
        AppEvent::AddTodo(text) => toolbox::handle_add_todo(ctx, &text).await?,
        AppEvent::ToggleTodo(id) => toolbox::handle_toggle_todo(ctx, &id).await?,
        AppEvent::RemoveTodo(id) => toolbox::handle_remove_todo(ctx, &id).await?,
        AppEvent::ListTodos => toolbox::handle_list_todos(ctx).await?,
        AppEvent::ToggleStopwatch => toolbox::handle_stopwatch_toggle(ctx).await?,
        AppEvent::StartTimer(minutes) => toolbox::handle_timer_start(ctx, &minutes).await?,
        AppEvent::ShowClock => toolbox::handle_clock(ctx).await?,
        AppEvent::Quit => {}
        other => {
            // UI-only event, ignore in backend
            tracing::debug!("[EVENT_LOOP] Ignoring display event {:?}", other);
        }
    }

    Ok(())
}
