use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c?.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn create_structures_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS structures (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id         INTEGER NOT NULL,
            worker_name       TEXT NOT NULL DEFAULT '',
            date              TEXT,
            start_time        TEXT,
            end_time          TEXT,
            ct                INTEGER NOT NULL,
            field             INTEGER NOT NULL,
            table_no          INTEGER NOT NULL,
            torque_status     TEXT,
            checklist_status  TEXT,
            notes             TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_structures_key ON structures(ct, field, table_no);
        CREATE INDEX IF NOT EXISTS idx_structures_date ON structures(date);
        "#,
    )?;
    Ok(())
}

fn create_clock_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS clock_events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id       INTEGER NOT NULL,
            worker_name     TEXT NOT NULL DEFAULT '',
            date            TEXT NOT NULL,
            entry_time      TEXT,
            exit_time       TEXT,
            entry_lat       REAL,
            entry_lon       REAL,
            exit_lat        REAL,
            exit_lon        REAL,
            worked_hours    REAL NOT NULL DEFAULT 0,
            overtime_hours  REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_clock_worker_date ON clock_events(worker_id, date);
        "#,
    )?;
    Ok(())
}

fn create_vacations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS vacations (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id      INTEGER NOT NULL,
            worker_name    TEXT NOT NULL DEFAULT '',
            start_date     TEXT NOT NULL,
            end_date       TEXT NOT NULL,
            status         TEXT NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending','approved','denied')),
            admin_comment  TEXT NOT NULL DEFAULT '',
            decided_by     TEXT,
            created_at     TEXT NOT NULL,
            decided_at     TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Older databases stored the checklist result in a `ppi` column.
fn migrate_ppi_to_checklist(conn: &Connection) -> Result<()> {
    let version = "20250310_0002_rename_ppi_to_checklist";

    if !table_has_column(conn, "structures", "ppi")? {
        return Ok(());
    }

    if migration_applied(conn, version)? {
        return Ok(());
    }

    warning("Legacy 'ppi' column detected, creating safety backup before migration...");

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if !db_path.is_empty() {
        backup_before_migration(&db_path)?;
    } else {
        warning("Could not determine DB path, backup skipped.");
    }

    if table_has_column(conn, "structures", "checklist_status")? {
        // Both present: fill gaps from the legacy column, then drop it.
        conn.execute_batch(
            r#"
            UPDATE structures SET checklist_status = ppi
             WHERE checklist_status IS NULL OR checklist_status = '';
            ALTER TABLE structures DROP COLUMN ppi;
            "#,
        )?;
    } else {
        conn.execute_batch("ALTER TABLE structures RENAME COLUMN ppi TO checklist_status;")?;
    }

    mark_applied(conn, version, "Renamed legacy ppi column to checklist_status")?;

    success(format!(
        "Migration applied: {} → 'ppi' is now 'checklist_status'",
        version
    ));

    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_checklist.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let wrap = |stage: &str, e: &dyn std::fmt::Display| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({stage}): {e}"
        ))))
    };

    let file = File::create(&backup_path).map_err(|e| wrap("create", &e))?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| wrap("start_file", &e))?;

    let db_content = fs::read(db_path).map_err(|e| wrap("read", &e))?;

    zip.write_all(&db_content)
        .map_err(|e| wrap("write_all", &e))?;

    zip.finish().map_err(|e| wrap("finish", &e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "structures")? {
        create_structures_table(conn)?;
        success("Created structures table.");
    } else {
        migrate_ppi_to_checklist(conn)?;
        create_structures_table(conn)?; // indexes only
    }

    if !table_exists(conn, "clock_events")? {
        create_clock_table(conn)?;
        success("Created clock_events table.");
    }

    if !table_exists(conn, "vacations")? {
        create_vacations_table(conn)?;
        success("Created vacations table.");
    }

    Ok(())
}
