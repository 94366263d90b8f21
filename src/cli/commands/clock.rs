use crate::cli::commands::{load_roster, open_pool};
use crate::cli::parser::{ClockAction, Commands};
use crate::config::Config;
use crate::core::calculator::shift::ShiftClose;
use crate::core::clock::ClockLogic;
use crate::errors::{AppError, AppResult};
use crate::models::clock::GeoPoint;
use crate::ui::messages::{success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::date;
use crate::utils::range::parse_optional_range;
use crate::utils::table::Table;
use crate::utils::time::{format_time, hours2readable, parse_optional_time};
use chrono::{Local, NaiveTime, Timelike};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock { action } = cmd {
        match action {
            ClockAction::In {
                pin,
                time,
                lat,
                lon,
            } => {
                let roster = load_roster(cfg)?;
                let worker = roster.authenticate(pin)?;
                let at = time_or_now(time)?;

                let mut pool = open_pool(cfg)?;
                let ev = ClockLogic::clock_in(
                    &mut pool,
                    worker,
                    date::today(),
                    at,
                    GeoPoint::from_parts(*lat, *lon),
                    cfg.shift_rules(),
                )?;

                success(format!(
                    "{} clocked in at {} on {}",
                    ev.worker_name,
                    format_time(ev.entry_time),
                    ev.date
                ));
            }

            ClockAction::Out {
                pin,
                time,
                lat,
                lon,
            } => {
                let roster = load_roster(cfg)?;
                let worker = roster.authenticate(pin)?;
                let at = time_or_now(time)?;

                let mut pool = open_pool(cfg)?;
                let (ev, outcome) = ClockLogic::clock_out(
                    &mut pool,
                    worker,
                    date::today(),
                    at,
                    GeoPoint::from_parts(*lat, *lon),
                    cfg.shift_rules(),
                )?;

                match outcome {
                    ShiftClose::Complete(h) => success(format!(
                        "{} clocked out at {}: worked {}, overtime {}",
                        ev.worker_name,
                        format_time(ev.exit_time),
                        hours2readable(h.worked_hours),
                        hours2readable(h.overtime_hours)
                    )),
                    ShiftClose::IncompleteShift => {
                        warning(AppError::IncompleteShift(ev.date.to_string()));
                        warning("Exit recorded with zero hours.");
                    }
                }
            }

            ClockAction::List { worker, range } => {
                let bounds = parse_optional_range(range)?;
                let mut pool = open_pool(cfg)?;
                let rows = ClockLogic::list(&mut pool, worker.as_deref(), bounds)?;

                if rows.is_empty() {
                    warning("No clock rows for the selected filters.");
                    return Ok(());
                }

                let mut table = Table::with_headers(&[
                    "ID", "DATE", "WORKER", "IN", "OUT", "WORKED", "OVERTIME",
                ]);
                for r in &rows {
                    table.add_row(vec![
                        r.id.to_string(),
                        r.date.to_string(),
                        r.worker_name.clone(),
                        colorize_optional(&format_time(r.entry_time)),
                        colorize_optional(&format_time(r.exit_time)),
                        format!("{:.2}", r.worked_hours),
                        format!("{:.2}", r.overtime_hours),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}

/// Explicit `--time` or the current minute.
fn time_or_now(time: &Option<String>) -> AppResult<NaiveTime> {
    match parse_optional_time(time.as_ref())? {
        Some(t) => Ok(t),
        None => {
            let now = Local::now().time();
            NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
                .ok_or_else(|| AppError::InvalidTime(now.to_string()))
        }
    }
}
