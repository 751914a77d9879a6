pub mod clipboard;
pub mod shortener;

pub use clipboard::{CopyOutcome, copy_text, read_image_png};
pub use shortener::{ShortenError, ShortenerClient};
