//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Open and bring the schema up to date in one go.
    pub fn open_ready(path: &str) -> crate::errors::AppResult<Self> {
        let pool = Self::new(path)?;
        crate::db::initialize::init_db(&pool.conn)?;
        Ok(pool)
    }
}
