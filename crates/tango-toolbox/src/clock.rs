use chrono::{DateTime, Local, TimeZone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    pub date: String,
    pub time: String,
}

impl ClockReading {
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            date: moment.format("%Y-%m-%d").to_string(),
            time: moment.format("%H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn formats_date_and_time() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
        let reading = ClockReading::at(&moment);
        assert_eq!(reading.date, "2024-03-09");
        assert_eq!(reading.time, "07:05:03");
    }
}
