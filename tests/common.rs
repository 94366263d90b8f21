#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rmontaje::models::status::CheckStatus;
use rmontaje::models::structure::StructureRecord;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN_PIN: &str = "9999";
pub const JEFE_PIN: &str = "8888";
pub const LUIS_PIN: &str = "1111";
pub const MARTA_PIN: &str = "2222";

pub fn rmo() -> Command {
    cargo_bin_cmd!("rmontaje")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rmontaje.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a small roster: one admin, one site manager, two workers.
/// Luis's PIN is stored as a spreadsheet float on purpose.
pub fn write_roster(name: &str) -> String {
    let path = temp_out(&format!("{name}_roster"), "csv");
    fs::write(
        &path,
        "NOMBRE,ID,PIN,ROL\n\
         Ana Admin,1,9999,admin\n\
         Jose Jefe,2,8888,jefe_obra\n\
         Luis Perez,10,1111.0,trabajador\n\
         Marta Ruiz,11,2222,trabajador\n",
    )
    .expect("write roster");
    path
}

/// Fresh database plus roster; returns (db, roster) paths.
pub fn init_env(name: &str) -> (String, String) {
    let db_path = setup_test_db(name);
    let roster = write_roster(name);

    rmo()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    (db_path, roster)
}

/// `register` through the binary with the given PIN, key and statuses.
pub fn register(
    db: &str,
    roster: &str,
    pin: &str,
    key: (&str, &str, &str),
    torque: &str,
    checklist: &str,
) -> assert_cmd::assert::Assert {
    rmo()
        .args([
            "--db", db, "--roster", roster, "register", "--pin", pin, "--ct", key.0, "--field",
            key.1, "--table", key.2, "--torque", torque, "--checklist", checklist,
        ])
        .assert()
}

/// In-memory row for library tests.
pub fn record(
    worker: &str,
    date: Option<&str>,
    key: (u32, u32, u32),
    torque: Option<CheckStatus>,
    checklist: Option<CheckStatus>,
) -> StructureRecord {
    StructureRecord {
        id: 0,
        worker_id: match worker {
            "Luis Perez" => 10,
            "Marta Ruiz" => 20,
            _ => 30,
        },
        worker_name: worker.to_string(),
        date: date.and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        start_time: None,
        end_time: None,
        ct: key.0,
        field: key.1,
        table_no: key.2,
        torque_status: torque,
        checklist_status: checklist,
        notes: String::new(),
    }
}
