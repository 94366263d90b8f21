use crate::cli::commands::{build_filter, load_roster, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        pin,
        ct,
        worker,
        range,
    } = cmd
    {
        let roster = load_roster(cfg)?;
        roster.require_supervisor(pin, "view reports")?;

        let filter = build_filter(ct, worker, range)?;
        let mut pool = open_pool(cfg)?;

        let tables = ReportLogic::build(&mut pool, &filter)?;
        ReportLogic::print_report(&tables, &filter, &cfg.separator_char);
    }
    Ok(())
}
