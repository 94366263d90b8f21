use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;
use chrono::NaiveTime;

/// Lunch deduction and regular-day length used to split worked/overtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftRules {
    pub lunch_minutes: i64,
    pub regular_minutes: i64,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            lunch_minutes: 60,
            regular_minutes: 8 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftHours {
    pub worked_hours: f64,
    pub overtime_hours: f64,
}

impl ShiftHours {
    pub fn zero() -> Self {
        Self {
            worked_hours: 0.0,
            overtime_hours: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftClose {
    Complete(ShiftHours),
    /// Exit without a recorded entry: stored with zero hours.
    IncompleteShift,
}

impl ShiftClose {
    pub fn hours(&self) -> ShiftHours {
        match self {
            ShiftClose::Complete(h) => *h,
            ShiftClose::IncompleteShift => ShiftHours::zero(),
        }
    }
}

/// Close a day from "HH:MM" strings with the default rules
/// (1h unpaid lunch, 8h regular day).
pub fn close_day(entry: Option<&str>, exit: &str) -> AppResult<ShiftClose> {
    let exit_t = parse_time(exit).ok_or_else(|| AppError::InvalidTime(exit.to_string()))?;
    let entry_t = match entry.map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?),
    };
    Ok(close_day_with(entry_t, exit_t, ShiftRules::default()))
}

/// An exit earlier than the entry is taken as crossing midnight.
pub fn close_day_with(entry: Option<NaiveTime>, exit: NaiveTime, rules: ShiftRules) -> ShiftClose {
    let Some(entry) = entry else {
        return ShiftClose::IncompleteShift;
    };

    let mut elapsed = (exit - entry).num_minutes();
    if elapsed < 0 {
        elapsed += 24 * 60;
    }

    let worked = (elapsed - rules.lunch_minutes).max(0);
    let overtime = (worked - rules.regular_minutes).max(0);

    ShiftClose::Complete(ShiftHours {
        worked_hours: minutes_to_hours(worked),
        overtime_hours: minutes_to_hours(overtime),
    })
}

/// Hours rounded to two decimals.
fn minutes_to_hours(mins: i64) -> f64 {
    (mins as f64 / 60.0 * 100.0).round() / 100.0
}
