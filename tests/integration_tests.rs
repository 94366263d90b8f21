mod common;
use common::{LUIS_PIN, init_env, register, rmo, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;
use std::path::Path;

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");

    rmo()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    for table in ["structures", "clock_events", "vacations", "log"] {
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(n, 1, "missing table {table}");
    }
}

#[test]
fn test_config_print_shows_overrides() {
    let db_path = setup_test_db("config_print");

    rmo()
        .args(["--db", &db_path, "--roster", "/tmp/crew.csv", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("duplicate_policy: strict"))
        .stdout(contains("/tmp/crew.csv"))
        .stdout(contains(db_path.as_str()));
}

#[test]
fn test_db_info_check_vacuum() {
    let (db, roster) = init_env("db_maint");
    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "OK", "OK").success();

    rmo()
        .args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Structures:"))
        .stdout(contains("Average structures/day"));

    rmo()
        .args(["--db", &db, "db", "--check", "--vacuum", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let (db, roster) = init_env("backup");
    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "OK", "OK").success();

    let plain = temp_out("backup_plain", "sqlite");
    rmo()
        .args(["--db", &db, "backup", "--file", &plain])
        .assert()
        .success();
    assert!(Path::new(&plain).exists());

    let target = temp_out("backup_zip", "sqlite");
    let zipped = temp_out("backup_zip", "zip");
    rmo()
        .args(["--db", &db, "backup", "--file", &target, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&zipped).exists());
    assert!(!Path::new(&target).exists());
    assert!(fs::read(&zipped).unwrap().starts_with(b"PK"));

    rmo()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("backup"))
        .stdout(contains("register"));
}

#[test]
fn test_legacy_ppi_column_is_migrated() {
    let db_path = setup_test_db("legacy_ppi");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE structures (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                worker_id INTEGER NOT NULL,
                worker_name TEXT NOT NULL,
                date TEXT,
                start_time TEXT,
                end_time TEXT,
                ct INTEGER NOT NULL,
                field INTEGER NOT NULL,
                table_no INTEGER NOT NULL,
                torque_status TEXT,
                ppi TEXT,
                notes TEXT NOT NULL DEFAULT ''
            );
            INSERT INTO structures (worker_id, worker_name, date, ct, field, table_no, torque_status, ppi)
            VALUES (10, 'Luis Perez', '2024-10-01', 2, 3, 4, 'OK', 'NOT_OK');",
        )
        .unwrap();
    }

    rmo()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Luis Perez"))
        .stdout(contains("NOT_OK"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let status: String = conn
        .query_row("SELECT checklist_status FROM structures WHERE id = 1", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(status, "NOT_OK");
}

#[test]
fn test_unreadable_keys_are_skipped_and_preserved() {
    use rmontaje::core::aggregator::{Groupings, ReportFilter, aggregate};
    use rmontaje::db::pool::DbPool;
    use rmontaje::db::repository::Repository;
    use rmontaje::db::structures::StructureStore;

    let db_path = setup_test_db("legacy_loose_keys");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE structures (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                worker_id INTEGER,
                worker_name TEXT,
                date TEXT,
                start_time TEXT,
                end_time TEXT,
                ct,
                field,
                table_no,
                torque_status TEXT,
                checklist_status TEXT,
                notes TEXT
            );
            INSERT INTO structures (worker_id, worker_name, date, ct, field, table_no, torque_status, checklist_status, notes)
            VALUES (10, 'Luis Perez', '2025-03-01', 5.0, '12', 3, 'OK', 'OK', ''),
                   (11, 'Marta Ruiz', '2025-03-01', NULL, 12, 4, 'OK', 'OK', ''),
                   (10, 'Luis Perez', '2025-03-02', 7, 1, 2.5, 'OK', 'NOT_OK', '');",
        )
        .unwrap();
    }

    let mut pool = DbPool::open_ready(&db_path).unwrap();
    {
        let mut store = StructureStore::new(&mut pool.conn);
        let rows = store.load_all().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].ct, rows[0].field, rows[0].table_no), (5, 12, 3));
        assert_eq!(store.unreadable_ids(), &[2, 3]);

        let t = aggregate(&rows, Groupings::all(), &ReportFilter::default());
        assert_eq!(t.total_rows, 1);
        assert_eq!(t.ct_progress.len(), 1);

        store.save_all(&rows).unwrap();
    }

    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM structures", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 3);

    rmo()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Luis Perez"));
}
