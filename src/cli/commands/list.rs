use crate::cli::commands::{build_filter, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { ct, worker, range } = cmd {
        let filter = build_filter(ct, worker, range)?;
        let mut pool = open_pool(cfg)?;

        let rows = ReportLogic::load_filtered(&mut pool, &filter)?;
        ReportLogic::print_list(&rows, &cfg.separator_char);
    }
    Ok(())
}
