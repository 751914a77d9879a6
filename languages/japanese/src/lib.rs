pub mod parser;

pub use parser::{JapaneseLineParser, focus_hint, parse_line};
