use std::io::Cursor;

use anyhow::{Context, Result};
use arboard::Clipboard;
use image::{DynamicImage, ImageFormat, RgbaImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// No usable clipboard: show the text so the user can copy it by hand
    Manual(String),
}

/// Put text on the system clipboard, falling back to manual copy
pub fn copy_text(text: &str) -> CopyOutcome {
    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string()));

    match result {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            tracing::warn!("Clipboard unavailable, falling back to manual copy: {}", e);
            CopyOutcome::Manual(text.to_string())
        }
    }
}

/// Current clipboard image encoded as PNG, `None` when the clipboard holds no image
pub fn read_image_png() -> Result<Option<Vec<u8>>> {
    let mut clipboard = Clipboard::new().context("Failed to open clipboard")?;

    let image = match clipboard.get_image() {
        Ok(image) => image,
        Err(arboard::Error::ContentNotAvailable) => return Ok(None),
        Err(e) => return Err(e).context("Failed to read clipboard image"),
    };

    let png = encode_png(image.width as u32, image.height as u32, image.bytes.into_owned())?;
    Ok(Some(png))
}

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<u8>> {
    let buffer = RgbaImage::from_raw(width, height, rgba)
        .context("Clipboard image size does not match its pixel data")?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("Failed to encode clipboard image")?;
    Ok(png)
}
