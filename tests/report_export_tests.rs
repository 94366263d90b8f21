mod common;
use common::{ADMIN_PIN, JEFE_PIN, LUIS_PIN, MARTA_PIN, init_env, register, rmo, temp_out};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

fn seed(name: &str) -> (String, String) {
    let (db, roster) = init_env(name);
    register(&db, &roster, LUIS_PIN, ("5", "12", "1"), "OK", "OK").success();
    register(&db, &roster, LUIS_PIN, ("5", "12", "2"), "OK", "NOT_OK").success();
    register(&db, &roster, MARTA_PIN, ("7", "1", "1"), "OK", "OK").success();
    (db, roster)
}

#[test]
fn test_report_requires_supervisor() {
    let (db, roster) = seed("report_perm");

    rmo()
        .args(["--db", &db, "--roster", &roster, "report", "--pin", LUIS_PIN])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rmo()
        .args(["--db", &db, "--roster", &roster, "report", "--pin", JEFE_PIN])
        .assert()
        .success()
        .stdout(contains("Total structures"))
        .stdout(contains("Progress per CT"))
        .stdout(contains("Structures per worker"));
}

#[test]
fn test_report_filtered_by_ct() {
    let (db, roster) = seed("report_ct");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "report", "--pin", ADMIN_PIN, "--ct", "5",
        ])
        .assert()
        .success()
        .stdout(contains("Filtered report"))
        .stdout(contains("50.0"))
        .stdout(contains("Marta Ruiz").not());
}

#[test]
fn test_report_empty_filter_is_not_an_error() {
    let (db, roster) = seed("report_empty");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "report", "--pin", ADMIN_PIN, "--worker", "Nobody",
        ])
        .assert()
        .success()
        .stdout(contains("No structures match"));
}

#[test]
fn test_export_records_csv_column_order() {
    let (db, roster) = seed("export_records_csv");
    let out = temp_out("export_records_csv", "csv");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--format", "csv",
            "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let header = content.lines().next().unwrap();
    assert_eq!(
        header,
        "id,worker_id,worker_name,date,start_time,end_time,ct,field,table_no,torque_status,checklist_status,notes"
    );
    assert_eq!(content.lines().count(), 4);
    assert!(content.contains("Marta Ruiz"));
}

#[test]
fn test_export_records_json_filtered_by_worker() {
    let (db, roster) = seed("export_records_json");
    let out = temp_out("export_records_json", "json");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--format", "json",
            "--file", &out, "--worker", "Luis Perez",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["worker_name"] == "Luis Perez"));
    assert_eq!(rows[1]["checklist_status"], "NOT_OK");
}

#[test]
fn test_export_report_json_and_xlsx() {
    let (db, roster) = seed("export_report");
    let json = temp_out("export_report", "json");
    let xlsx = temp_out("export_report", "xlsx");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--format", "json",
            "--what", "report", "--file", &json,
        ])
        .assert()
        .success();

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(v["total_rows"], 3);
    assert_eq!(v["ct_progress"][0]["ct"], 5);
    assert_eq!(v["ct_progress"][0]["percentage"], 50.0);
    assert_eq!(v["status_split"]["checklist"]["ok"], 2);

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--what", "report",
            "--file", &xlsx,
        ])
        .assert()
        .success();

    let bytes = fs::read(&xlsx).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let (db, roster) = seed("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").unwrap();

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--format", "csv",
            "--file", &out,
        ])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--format", "csv",
            "--file", &out, "--force",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("id,"));
}

#[test]
fn test_export_relative_path_rejected() {
    let (db, roster) = seed("export_relative");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "export", "--pin", ADMIN_PIN, "--file",
            "relative.xlsx",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}
