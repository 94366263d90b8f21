use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut pool = open_pool(cfg)?;
        let summary = ImportLogic::import_csv(&mut pool, Path::new(file))?;

        success(format!("Imported {} row(s) from {}", summary.imported, file));
        if summary.skipped > 0 {
            warning(format!("Skipped {} invalid row(s)", summary.skipped));
        }
    }
    Ok(())
}
