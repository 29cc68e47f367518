//! Weekly advance trigger.
//!
//! The engine never advances on its own; a periodic caller polls a
//! `WeeklySchedule` with the local time and advances when it answers yes.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Fires once per local date inside a weekly window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Day of the week the window opens.
    pub weekday: Weekday,
    /// Local hour the window opens.
    pub hour: u32,
    /// Length of the window in minutes, counted from the top of `hour`.
    pub window_minutes: u32,
    last_run: Option<NaiveDate>,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::new(Weekday::Thu, 10, 59)
    }
}

impl WeeklySchedule {
    /// Create a schedule that has never fired.
    pub fn new(weekday: Weekday, hour: u32, window_minutes: u32) -> Self {
        Self {
            weekday,
            hour,
            window_minutes,
            last_run: None,
        }
    }

    /// Local date of the last firing.
    pub fn last_run(&self) -> Option<NaiveDate> {
        self.last_run
    }

    /// Whether `local` falls inside the window.
    pub fn in_window(&self, local: NaiveDateTime) -> bool {
        local.weekday() == self.weekday
            && local.hour() == self.hour
            && local.minute() < self.window_minutes
    }

    /// Returns true, and remembers the date, the first time `local` is inside
    /// the window on a given date.
    pub fn poll(&mut self, local: NaiveDateTime) -> bool {
        if !self.in_window(local) || self.last_run == Some(local.date()) {
            return false;
        }
        self.last_run = Some(local.date());
        true
    }
}
