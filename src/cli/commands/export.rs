use crate::cli::commands::{build_filter, load_roster, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        pin,
        file,
        format,
        what,
        ct,
        worker,
        range,
        force,
    } = cmd
    {
        let roster = load_roster(cfg)?;
        roster.require_supervisor(pin, "export data")?;

        let filter = build_filter(ct, worker, range)?;
        let mut pool = open_pool(cfg)?;
        ExportLogic::export(&mut pool, *format, *what, file, &filter, *force)?;
    }
    Ok(())
}
