use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader};
use tango_types::{ImageOrigin, PreviewInfo};

use crate::datauri::DataUri;
use crate::error::IntakeError;

/// Where an image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Dropped or picked file
    Path(PathBuf),
    /// Clipboard paste
    Pasted { mime: String, bytes: Vec<u8> },
}

impl ImageSource {
    /// Content type as declared by the source, not sniffed from the bytes
    pub fn declared_type(&self) -> String {
        match self {
            ImageSource::Path(path) => declared_type_for_path(path),
            ImageSource::Pasted { mime, .. } => mime.clone(),
        }
    }

    pub fn origin(&self) -> ImageOrigin {
        match self {
            ImageSource::Path(_) => ImageOrigin::File,
            ImageSource::Pasted { .. } => ImageOrigin::Clipboard,
        }
    }
}

pub fn declared_type_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub data_uri: DataUri,
    pub origin: ImageOrigin,
    pub width: u32,
    pub height: u32,
    pub display_width: u32,
    pub display_height: u32,
}

impl Preview {
    pub fn info(&self) -> PreviewInfo {
        PreviewInfo {
            mime: self.data_uri.mime().to_string(),
            width: self.width,
            height: self.height,
            display_width: self.display_width,
            display_height: self.display_height,
            source: self.origin,
        }
    }
}

/// Holds the current preview. A rejected or unreadable image leaves it as is.
pub struct ImageIntake {
    max_width: u32,
    current: Option<Preview>,
}

impl ImageIntake {
    pub fn new(max_width: u32) -> Self {
        Self {
            max_width,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Preview> {
        self.current.as_ref()
    }

    pub async fn accept(&mut self, source: ImageSource) -> Result<&Preview, IntakeError> {
        let mime = source.declared_type();
        if !mime.starts_with("image/") {
            return Err(IntakeError::InvalidInput(mime));
        }

        let origin = source.origin();
        let bytes = match source {
            ImageSource::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|e| IntakeError::ReadFailure(format!("{}: {e}", path.display())))?,
            ImageSource::Pasted { bytes, .. } => bytes,
        };

        let (width, height) = probe_dimensions(&bytes)?;
        let (display_width, display_height) = fit_width(width, height, self.max_width);

        tracing::debug!(
            "Accepted {} image {}x{} (shown at {}x{})",
            mime,
            width,
            height,
            display_width,
            display_height
        );

        let preview = Preview {
            data_uri: DataUri::new(mime, bytes),
            origin,
            width,
            height,
            display_width,
            display_height,
        };
        Ok(self.current.insert(preview))
    }
}

fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), IntakeError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| IntakeError::ReadFailure(e.to_string()))?
        .into_dimensions()
        .map_err(|e| IntakeError::ReadFailure(e.to_string()))
}

/// Scale down to `max_width` keeping the aspect ratio. Never scales up.
fn fit_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled = (height as u64 * max_width as u64 + width as u64 / 2) / width as u64;
    (max_width, scaled as u32)
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn wide_file_is_scaled_for_display() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, png_bytes(1000, 500)).unwrap();

        let mut intake = ImageIntake::new(800);
        let preview = intake.accept(ImageSource::Path(path)).await.unwrap();

        assert_eq!((preview.width, preview.height), (1000, 500));
        assert_eq!((preview.display_width, preview.display_height), (800, 400));
        assert_eq!(preview.origin, ImageOrigin::File);
        assert!(
            preview
                .data_uri
                .to_string()
                .starts_with("data:image/png;base64,")
        );
        assert!(!preview.data_uri.is_empty());
    }

    #[tokio::test]
    async fn pasted_image_keeps_its_size() {
        let mut intake = ImageIntake::new(800);
        let preview = intake
            .accept(ImageSource::Pasted {
                mime: "image/png".to_string(),
                bytes: png_bytes(10, 20),
            })
            .await
            .unwrap();

        assert_eq!((preview.display_width, preview.display_height), (10, 20));
        assert_eq!(preview.info().source, ImageOrigin::Clipboard);
    }

    #[tokio::test]
    async fn non_image_is_rejected_and_preview_kept() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();

        let mut intake = ImageIntake::new(800);
        intake
            .accept(ImageSource::Pasted {
                mime: "image/png".to_string(),
                bytes: png_bytes(4, 4),
            })
            .await
            .unwrap();
        let before = intake.current().cloned();

        let err = intake.accept(ImageSource::Path(notes)).await.unwrap_err();
        assert!(matches!(err, IntakeError::InvalidInput(_)));
        assert_eq!(intake.current().cloned(), before);
    }

    #[tokio::test]
    async fn unreadable_images_are_read_failures() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, "definitely not a png").unwrap();

        let mut intake = ImageIntake::new(800);

        let missing = intake
            .accept(ImageSource::Path(dir.path().join("missing.png")))
            .await;
        assert!(matches!(missing, Err(IntakeError::ReadFailure(_))));

        let corrupt = intake.accept(ImageSource::Path(broken)).await;
        assert!(matches!(corrupt, Err(IntakeError::ReadFailure(_))));
        assert!(intake.current().is_none());
    }

    #[test]
    fn declared_type_comes_from_extension() {
        assert_eq!(declared_type_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(
            declared_type_for_path(Path::new("a.pdf")),
            "application/octet-stream"
        );
    }

    #[test]
    fn fit_width_rounds() {
        assert_eq!(fit_width(1200, 1001, 800), (800, 667));
        assert_eq!(fit_width(800, 600, 800), (800, 600));
    }
}
