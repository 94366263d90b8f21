use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_soft;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::Connection;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped with `--test`), the
/// SQLite database and its schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rMontaje…");

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));

    ttlog_soft(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rMontaje initialization completed!");
    Ok(())
}
