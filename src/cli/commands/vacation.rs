use crate::cli::commands::{load_roster, open_pool};
use crate::cli::parser::{Commands, VacationAction};
use crate::config::Config;
use crate::core::vacation::VacationLogic;
use crate::errors::{AppError, AppResult};
use crate::models::vacation::VacationStatus;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{GREEN, RED, RESET, YELLOW};
use crate::utils::date::parse_date;
use crate::utils::table::Table;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Vacation { action } = cmd {
        match action {
            VacationAction::Request { pin, from, to } => {
                let roster = load_roster(cfg)?;
                let worker = roster.authenticate(pin)?;

                let mut pool = open_pool(cfg)?;
                let req =
                    VacationLogic::request(&mut pool, worker, to_date(from)?, to_date(to)?)?;

                success(format!(
                    "Vacation request #{} created: {} → {} ({} day(s)), pending approval",
                    req.id,
                    req.start_date,
                    req.end_date,
                    req.days()
                ));
            }

            VacationAction::Decide {
                pin,
                id,
                approve,
                deny: _,
                comment,
            } => {
                let roster = load_roster(cfg)?;
                let supervisor = roster.require_supervisor(pin, "decide vacation requests")?;

                let mut pool = open_pool(cfg)?;
                let req =
                    VacationLogic::decide(&mut pool, supervisor, *id, *approve, comment.clone())?;

                success(format!(
                    "Vacation request #{} of {} {}",
                    req.id,
                    req.worker_name,
                    req.status.to_db_str()
                ));
            }

            VacationAction::List { status, worker } => {
                let mut pool = open_pool(cfg)?;
                let rows = VacationLogic::list(&mut pool, *status, worker.as_deref())?;

                if rows.is_empty() {
                    warning("No vacation requests for the selected filters.");
                    return Ok(());
                }

                let mut table = Table::with_headers(&[
                    "ID", "WORKER", "FROM", "TO", "DAYS", "STATUS", "DECIDED BY", "COMMENT",
                ]);
                for r in &rows {
                    table.add_row(vec![
                        r.id.to_string(),
                        r.worker_name.clone(),
                        r.start_date.to_string(),
                        r.end_date.to_string(),
                        r.days().to_string(),
                        colorize_vacation(r.status),
                        r.decided_by.clone().unwrap_or_default(),
                        r.admin_comment.clone(),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        }
    }

    Ok(())
}

fn to_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

fn colorize_vacation(status: VacationStatus) -> String {
    let color = match status {
        VacationStatus::Pending => YELLOW,
        VacationStatus::Approved => GREEN,
        VacationStatus::Denied => RED,
    };
    format!("{color}{}{RESET}", status.to_db_str())
}
