use std::path::PathBuf;

use anyhow::Context;
use tango_ocr::{ImageSource, IntakeError};
use tango_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_image_load(ctx: &mut AppContext, path: PathBuf) -> anyhow::Result<()> {
    tracing::debug!("Loading image {}", path.display());
    accept(ctx, ImageSource::Path(path)).await
}

pub async fn handle_image_paste(ctx: &mut AppContext) -> anyhow::Result<()> {
    let pasted = tokio::task::spawn_blocking(tango_io::read_image_png)
        .await
        .context("Clipboard task panicked")?;

    match pasted {
        Ok(Some(bytes)) => {
            let source = ImageSource::Pasted {
                mime: "image/png".to_string(),
                bytes,
            };
            accept(ctx, source).await
        }
        Ok(None) => ctx.alert("Please paste an image file.").await,
        Err(e) => {
            tracing::warn!("Clipboard read failed: {:#}", e);
            ctx.alert(format!("Could not read the clipboard: {e}")).await
        }
    }
}

async fn accept(ctx: &mut AppContext, source: ImageSource) -> anyhow::Result<()> {
    match ctx.intake.accept(source).await {
        Ok(preview) => {
            let info = preview.info();
            ctx.send(AppEvent::PreviewUpdated(info)).await
        }
        Err(IntakeError::InvalidInput(mime)) => {
            tracing::debug!("Rejected non-image input ({})", mime);
            ctx.alert("Please upload an image file.").await
        }
        Err(e) => {
            tracing::warn!("Image intake failed: {}", e);
            ctx.alert(e.to_string()).await
        }
    }
}
