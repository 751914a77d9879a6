pub mod calculator;
pub mod clock;
pub mod error;
pub mod notepad;
pub mod stopwatch;
pub mod timer;
pub mod todo;

pub use calculator::{evaluate, format_number};
pub use clock::ClockReading;
pub use error::{CalcError, TimerError};
pub use notepad::Notepad;
pub use stopwatch::{Stopwatch, format_elapsed};
pub use timer::parse_minutes;
pub use todo::TodoList;
