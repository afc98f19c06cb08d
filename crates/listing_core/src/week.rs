//! Monday–Sunday windows relative to the week containing today.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::domain::DateRange;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn start_iso(&self) -> String {
        self.start.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(7)
    }

    pub fn as_range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// `None` when the offset lands outside the calendar chrono can represent.
pub fn week_range(offset: i64) -> Option<WeekWindow> {
    week_range_from(local_today(), offset)
}

pub fn week_range_from(today: NaiveDate, offset: i64) -> Option<WeekWindow> {
    let shift = offset.checked_mul(7)?;
    let anchor = if shift >= 0 {
        today.checked_add_days(Days::new(shift.unsigned_abs()))?
    } else {
        today.checked_sub_days(Days::new(shift.unsigned_abs()))?
    };
    // Sunday is index 0 and belongs to the week that started six days earlier.
    let back = match anchor.weekday().num_days_from_sunday() {
        0 => 6,
        day => u64::from(day) - 1,
    };
    let start = anchor.checked_sub_days(Days::new(back))?;
    Some(WeekWindow {
        start,
        end: start.checked_add_days(Days::new(6))?,
    })
}

pub fn today_window(today: NaiveDate) -> DateRange {
    DateRange::single_day(today)
}

#[cfg(test)]
#[path = "tests/week_tests.rs"]
mod tests;
