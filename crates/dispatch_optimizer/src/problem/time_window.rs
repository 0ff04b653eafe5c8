use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OptimizerError;

pub const LAST_MINUTE_OF_DAY: u32 = 24 * 60 - 1;

/// Closed interval `[start, end]` in minutes of day during which service must
/// begin.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: u32,
    end: u32,
}

impl TimeWindow {
    pub fn new(start: u32, end: u32) -> Result<Self, OptimizerError> {
        let time_window = TimeWindow { start, end };
        time_window.validate(|| format!("time window [{start}, {end}]"))?;
        Ok(time_window)
    }

    /// The whole day.
    pub const fn all_day() -> Self {
        TimeWindow {
            start: 0,
            end: LAST_MINUTE_OF_DAY,
        }
    }

    /// Builds a window from whole hours, e.g. `(8, 12)` for 08:00 to 12:00.
    /// An end hour of 24 is clamped to the last minute of the day.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> Result<Self, OptimizerError> {
        TimeWindow::new(
            start_hour * 60,
            (end_hour * 60).min(LAST_MINUTE_OF_DAY.max(start_hour * 60)),
        )
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn contains(&self, minute: u32) -> bool {
        self.start <= minute && minute <= self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end && self.end <= LAST_MINUTE_OF_DAY
    }

    pub(crate) fn validate(&self, owner: impl FnOnce() -> String) -> Result<(), OptimizerError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(OptimizerError::InvalidTimeWindow {
                owner: owner(),
                start: self.start,
                end: self.end,
            })
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::all_day()
    }
}

/// Formats a minute of day as `HH:MM`.
pub fn format_minute(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
