pub mod backup;
pub mod clock;
pub mod config;
pub mod db;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod register;
pub mod report;
pub mod roster;
pub mod vacation;

use crate::config::Config;
use crate::core::aggregator::ReportFilter;
use crate::core::roster::Roster;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use crate::utils::range::parse_optional_range;

/// Open the configured database with the schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open_ready(&cfg.database)
}

/// Roster is read fresh for every command that needs it.
pub(crate) fn load_roster(cfg: &Config) -> AppResult<Roster> {
    Roster::load(&expand_tilde(&cfg.roster_file))
}

pub(crate) fn build_filter(
    ct: &Option<u32>,
    worker: &Option<String>,
    range: &Option<String>,
) -> AppResult<ReportFilter> {
    Ok(ReportFilter {
        ct: *ct,
        worker_name: worker.clone(),
        date_bounds: parse_optional_range(range)?,
    })
}
