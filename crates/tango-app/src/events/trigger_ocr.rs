use tango_ocr::RecognitionOutcome;
use tango_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_ocr_trigger(ctx: &mut AppContext) -> anyhow::Result<()> {
    let Some(preview) = ctx.intake.current() else {
        return ctx.alert("Please upload an image first").await;
    };
    let image = preview.data_uri.clone();

    ctx.send(AppEvent::OcrStatusUpdate {
        status: "Recognizing text...".to_string(),
        running: true,
    })
    .await?;

    let result = ctx.adapter.recognize(&image).await;

    ctx.send(AppEvent::OcrStatusUpdate {
        status: "Done".to_string(),
        running: false,
    })
    .await?;

    match result {
        Ok(RecognitionOutcome::Lines(lines)) => {
            tracing::debug!(">>> [OCR] Got {} lines", lines.len());
            ctx.send(AppEvent::ShowLines(lines)).await
        }
        Ok(RecognitionOutcome::NoResults) => {
            tracing::debug!(">>> [OCR] Nothing above the confidence threshold");
            ctx.send(AppEvent::NoResults).await
        }
        Err(e) => {
            tracing::error!(">>> [OCR] Failed: {}", e);
            ctx.alert("Error processing image. Please try again.").await
        }
    }
}
