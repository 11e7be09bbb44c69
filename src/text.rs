use core::fmt::Write;

use heapless::String;

use crate::error::WatchError;
use crate::host::TextField;
use crate::time::{ClockStyle, WatchTime};

pub const TIME_CAPACITY: usize = 8; // "00:00 XX"
pub const DATE_CAPACITY: usize = 6; // "XXX 00"
pub const DAY_CAPACITY: usize = 3;  // "XXX"

pub type TimeText = String<TIME_CAPACITY>;
pub type DateText = String<DATE_CAPACITY>;
pub type DayText = String<DAY_CAPACITY>;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn overflow(field: TextField, capacity: usize) -> impl FnOnce(core::fmt::Error) -> WatchError {
    move |_| WatchError::TextOverflow { field, capacity }
}

/// `"09:41 AM"` in 12-hour style, `"21:41   "` in 24-hour style.
/// Both styles are padded to the same width.
pub fn format_time(now: &WatchTime, style: ClockStyle) -> Result<TimeText, WatchError> {
    let mut out = TimeText::new();
    match style {
        ClockStyle::TwelveHour => {
            let hour = match now.hour % 12 {
                0 => 12,
                h => h,
            };
            let marker = if now.hour < 12 { "AM" } else { "PM" };
            write!(out, "{:02}:{:02} {}", hour, now.minute, marker)
        }
        ClockStyle::TwentyFourHour => write!(out, "{:02}:{:02}   ", now.hour, now.minute),
    }
    .map_err(overflow(TextField::Time, TIME_CAPACITY))?;
    Ok(out)
}

/// Abbreviated month and space-padded day of month, e.g. `"Oct  5"`.
pub fn format_date(now: &WatchTime) -> Result<DateText, WatchError> {
    let mut out = DateText::new();
    let month = MONTHS[(now.month as usize + 11) % 12];
    write!(out, "{} {:>2}", month, now.day_of_month)
        .map_err(overflow(TextField::Date, DATE_CAPACITY))?;
    Ok(out)
}

/// Abbreviated weekday, e.g. `"Sat"`.
pub fn format_day(now: &WatchTime) -> Result<DayText, WatchError> {
    let mut out = DayText::new();
    out.push_str(WEEKDAYS[now.weekday.num_days_from_sunday() as usize])
        .map_err(|_| WatchError::TextOverflow { field: TextField::Day, capacity: DAY_CAPACITY })?;
    Ok(out)
}

/// Strings currently on screen, plus the day they were computed for.
#[derive(Debug, Clone, Default)]
pub struct TextState {
    last_shown_day_of_year: Option<u16>,
    time: TimeText,
    date: DateText,
    day: DayText,
}

impl TextState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_shown_day_of_year(&self) -> Option<u16> {
        self.last_shown_day_of_year
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    /// Recomputes date and day on every call but only stores them when the day
    /// of year differs from the one last shown. Returns whether they changed.
    pub fn refresh_date(&mut self, now: &WatchTime) -> Result<bool, WatchError> {
        let date = format_date(now)?;
        let day = format_day(now)?;
        if self.last_shown_day_of_year == Some(now.day_of_year) {
            return Ok(false);
        }
        self.last_shown_day_of_year = Some(now.day_of_year);
        self.date = date;
        self.day = day;
        Ok(true)
    }

    pub fn refresh_time(&mut self, now: &WatchTime, style: ClockStyle) -> Result<&str, WatchError> {
        self.time = format_time(now, style)?;
        Ok(self.time.as_str())
    }
}
