use tango_io::CopyOutcome;
use tango_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_shorten(ctx: &mut AppContext, url: &str) -> anyhow::Result<()> {
    match ctx.shortener.shorten(url).await {
        Ok(short_url) => {
            tracing::debug!("Shortened {} -> {}", url, short_url);
            ctx.last_short_url = Some(short_url.clone());
            ctx.send(AppEvent::ShortUrl(short_url)).await
        }
        Err(e) => {
            ctx.last_short_url = None;
            ctx.send(AppEvent::ShortenFailed(e.to_string())).await
        }
    }
}

pub async fn handle_copy_short_url(ctx: &mut AppContext) -> anyhow::Result<()> {
    let Some(short_url) = ctx.last_short_url.clone() else {
        return ctx.alert("Nothing to copy yet").await;
    };

    let outcome = tokio::task::spawn_blocking(move || tango_io::copy_text(&short_url)).await?;
    match outcome {
        CopyOutcome::Copied => ctx.alert("Copied to clipboard!").await,
        CopyOutcome::Manual(text) => ctx.send(AppEvent::CopyFallback(text)).await,
    }
}
