//! Whole-table persistence contract.
//!
//! Every operation loads the full table, works in memory and writes the
//! full table back. `save_all` replaces the table inside one transaction,
//! so a single save is atomic; two concurrent writers still resolve as
//! last-write-wins.

use crate::errors::AppResult;

pub trait Repository<T> {
    fn load_all(&mut self) -> AppResult<Vec<T>>;
    fn save_all(&mut self, rows: &[T]) -> AppResult<()>;
}

/// `Some(id)` for stored rows, `None` so SQLite assigns one to new rows.
pub(crate) fn id_param(id: i64) -> Option<i64> {
    if id > 0 { Some(id) } else { None }
}
