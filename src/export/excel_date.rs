// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret a cell as a date or a time of day, returning the Excel serial
/// and the number format to display it with.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(("yyyy-mm-dd", date_to_excel_serial(d)?));
    }

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            let seconds = t.num_seconds_from_midnight() as f64;
            return Some(("hh:mm", seconds / 86400.0));
        }
    }

    None
}

fn date_to_excel_serial(d: NaiveDate) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - excel_epoch).num_days() as f64)
}
