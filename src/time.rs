use chrono::{Datelike, NaiveDate, Timelike, Weekday};

/// How the host wants the time of day rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockStyle {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

/// Broken-down wall-clock time delivered with every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchTime {
    pub hour: u8,
    pub minute: u8,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day_of_month: u8,
    /// 1..=366
    pub day_of_year: u16,
    pub weekday: Weekday,
}

impl WatchTime {
    pub fn from_datetime<T: Datelike + Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            month: t.month() as u8,
            day_of_month: t.day() as u8,
            day_of_year: t.ordinal() as u16,
            weekday: t.weekday(),
        }
    }

    /// Convenience constructor; `None` for an impossible date or time.
    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let dt = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
        Some(Self::from_datetime(&dt))
    }

    /// Minute of the day, used to detect minute boundaries.
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}
