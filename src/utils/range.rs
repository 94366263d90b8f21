use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::NaiveDate;

/// Parse a period (year / month / day / interval) into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{r}: start and end must have same format"
            )));
        }

        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;

        if d1 > d2 {
            return Err(AppError::InvalidDate(format!("{r}: start is after end")));
        }
        Ok((d1, d2))
    } else {
        period_bounds(r.trim())
    }
}

/// `None` for a missing range or "all".
pub fn parse_optional_range(r: &Option<String>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match r {
        None => Ok(None),
        Some(r) if r.eq_ignore_ascii_case("all") => Ok(None),
        Some(r) => Ok(Some(parse_range(r)?)),
    }
}

fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p[0..4].parse().map_err(|_| invalid())?;
            let m: u32 = p[5..7].parse().map_err(|_| invalid())?;
            let last = month_last_day(y, m).ok_or_else(invalid)?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}
