mod common;
use common::{ADMIN_PIN, init_env, rmo, temp_out};
use predicates::str::contains;
use rmontaje::core::import::ImportLogic;
use rmontaje::db::pool::DbPool;
use rmontaje::db::repository::Repository;
use rmontaje::db::structures::StructureStore;
use rmontaje::models::status::CheckStatus;
use std::fs;
use std::path::Path;

const LEGACY_SHEET: &str = "\
Trabajador,Nombre,Fecha,Hora inicio,Hora fin,CT,Campo/Área,Nº Mesa,Par de apriete,PPI,Observaciones
10.0,Luis Perez,2024-11-04,08:00,08:45,3.0,40,7,OK,OK,
10,Luis Perez,04/11/2024,09:00,,3,40,8,OK,NO OK,tornillo flojo
11,Marta Ruiz,2024-11-05 00:00:00,,,3,41,1,NOT OK,OK,
11,Marta Ruiz,2024-11-05,,,abc,41,2,OK,OK,
";

#[test]
fn test_import_legacy_sheet() {
    let (db, _) = init_env("import_legacy");
    let sheet = temp_out("import_legacy_sheet", "csv");
    fs::write(&sheet, LEGACY_SHEET).unwrap();

    let mut pool = DbPool::open_ready(&db).unwrap();
    let summary = ImportLogic::import_csv(&mut pool, Path::new(&sheet)).unwrap();

    assert_eq!(summary.imported, 3);
    assert_eq!(summary.skipped, 1);

    let rows = StructureStore::new(&mut pool.conn).load_all().unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].worker_id, 10);
    assert_eq!((rows[0].ct, rows[0].field, rows[0].table_no), (3, 40, 7));
    assert_eq!(rows[0].start_time.as_deref(), Some("08:00"));

    assert_eq!(rows[1].date_str(), "2024-11-04");
    assert_eq!(rows[1].checklist_status, Some(CheckStatus::NotOk));
    assert_eq!(rows[1].notes, "tornillo flojo");

    assert_eq!(rows[2].date_str(), "2024-11-05");
    assert_eq!(rows[2].torque_status, Some(CheckStatus::NotOk));
}

#[test]
fn test_import_cli_then_report_by_range() {
    let (db, roster) = init_env("import_cli");
    let sheet = temp_out("import_cli_sheet", "csv");
    fs::write(&sheet, LEGACY_SHEET).unwrap();

    rmo()
        .args(["--db", &db, "import", "--file", &sheet])
        .assert()
        .success()
        .stdout(contains("Imported 3 row(s)"))
        .stdout(contains("Skipped 1 invalid row(s)"));

    rmo()
        .args(["--db", &db, "list", "--range", "2024-11-05"])
        .assert()
        .success()
        .stdout(contains("1 structure(s)"))
        .stdout(contains("Marta Ruiz"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "report", "--pin", ADMIN_PIN, "--range", "2024-11",
        ])
        .assert()
        .success()
        .stdout(contains("2024-11-04"))
        .stdout(contains("2024-11-05"));
}

#[test]
fn test_import_without_key_columns_fails() {
    let (db, _) = init_env("import_bad_header");
    let sheet = temp_out("import_bad_header_sheet", "csv");
    fs::write(&sheet, "Nombre,Fecha\nLuis Perez,2024-11-04\n").unwrap();

    rmo()
        .args(["--db", &db, "import", "--file", &sheet])
        .assert()
        .failure()
        .stderr(contains("missing column 'ct'"));
}
