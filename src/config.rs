use serde::{Deserialize, Serialize};
use std::fmt;

/// Business-hours configuration shared by every scheduling pass.
///
/// All fields are wall-clock hours of day (fractions allowed, so 9.5 is
/// 09:30). The break window is never worked; `max_daily_hours` caps how much
/// work a single day may receive before the rest carries over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start_hour: f64,
    pub end_hour: f64,
    pub break_start: f64,
    pub break_end: f64,
    pub max_daily_hours: f64,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9.0,
            end_hour: 18.0,
            break_start: 12.0,
            break_end: 13.0,
            max_daily_hours: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusinessHoursError {
    WindowInverted { start: f64, end: f64 },
    BreakInverted { start: f64, end: f64 },
    BreakOutsideWindow { break_start: f64, break_end: f64 },
    NonPositiveDailyCap { cap: f64 },
    DailyCapExceedsWindow { cap: f64, window: f64 },
}

impl fmt::Display for BusinessHoursError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessHoursError::WindowInverted { start, end } => {
                write!(f, "business hours start {start} must be before end {end}")
            }
            BusinessHoursError::BreakInverted { start, end } => {
                write!(f, "break start {start} must not be after break end {end}")
            }
            BusinessHoursError::BreakOutsideWindow {
                break_start,
                break_end,
            } => write!(
                f,
                "break window {break_start}..{break_end} must lie inside business hours"
            ),
            BusinessHoursError::NonPositiveDailyCap { cap } => {
                write!(f, "max daily hours must be positive, got {cap}")
            }
            BusinessHoursError::DailyCapExceedsWindow { cap, window } => write!(
                f,
                "max daily hours {cap} does not fit the {window}h working window"
            ),
        }
    }
}

impl std::error::Error for BusinessHoursError {}

impl BusinessHours {
    pub fn validate(&self) -> Result<(), BusinessHoursError> {
        if self.start_hour >= self.end_hour {
            return Err(BusinessHoursError::WindowInverted {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.break_start > self.break_end {
            return Err(BusinessHoursError::BreakInverted {
                start: self.break_start,
                end: self.break_end,
            });
        }
        if self.break_start < self.start_hour || self.break_end > self.end_hour {
            return Err(BusinessHoursError::BreakOutsideWindow {
                break_start: self.break_start,
                break_end: self.break_end,
            });
        }
        if self.max_daily_hours <= 0.0 {
            return Err(BusinessHoursError::NonPositiveDailyCap {
                cap: self.max_daily_hours,
            });
        }
        let window = self.working_window_hours();
        if self.max_daily_hours > window {
            return Err(BusinessHoursError::DailyCapExceedsWindow {
                cap: self.max_daily_hours,
                window,
            });
        }
        Ok(())
    }

    /// Hours available for work in one day: the business window minus the break.
    pub fn working_window_hours(&self) -> f64 {
        (self.end_hour - self.start_hour) - self.break_hours()
    }

    pub fn break_hours(&self) -> f64 {
        self.break_end - self.break_start
    }
}

/// Ratio with a guarded denominator: a non-positive capacity yields 0 rather
/// than NaN or infinity.
pub fn utilization(value: f64, capacity: f64) -> f64 {
    if capacity <= 0.0 { 0.0 } else { value / capacity }
}
