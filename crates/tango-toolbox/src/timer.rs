use std::time::Duration;

use crate::error::TimerError;

/// Parse a user-entered minute count, fractions allowed
pub fn parse_minutes(input: &str) -> Result<Duration, TimerError> {
    let minutes: f64 = input.trim().parse().map_err(|_| TimerError::NotANumber)?;

    if !minutes.is_finite() {
        return Err(TimerError::NotANumber);
    }
    if minutes <= 0.0 {
        return Err(TimerError::NotPositive);
    }

    Duration::try_from_secs_f64(minutes * 60.0).map_err(|_| TimerError::TooLong)
}
