mod common;
use common::{rmo, write_roster};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rmontaje::core::roster::{Roster, normalize_pin};
use rmontaje::errors::AppError;
use rmontaje::models::worker::Role;
use std::fs;
use std::path::Path;

#[test]
fn test_normalize_pin() {
    assert_eq!(normalize_pin(" 1111 "), "1111");
    assert_eq!(normalize_pin("1111.0"), "1111");
    assert_eq!(normalize_pin("0420"), "0420");
}

#[test]
fn test_load_and_authenticate() {
    let path = write_roster("roster_load");
    let roster = Roster::load(Path::new(&path)).unwrap();

    assert_eq!(roster.len(), 4);

    let luis = roster.authenticate("1111").unwrap();
    assert_eq!(luis.name, "Luis Perez");
    assert_eq!(luis.id, 10);
    assert_eq!(luis.role, Role::Trabajador);

    assert!(matches!(roster.authenticate("0000"), Err(AppError::UnknownPin)));
}

#[test]
fn test_supervisor_roles() {
    let path = write_roster("roster_roles");
    let roster = Roster::load(Path::new(&path)).unwrap();

    assert!(roster.require_supervisor("9999", "view reports").is_ok());
    assert!(roster.require_supervisor("8888", "view reports").is_ok());
    assert!(matches!(
        roster.require_supervisor("2222", "view reports"),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn test_bad_rows_are_skipped() {
    let path = std::env::temp_dir().join("roster_bad_rows.csv");
    fs::write(
        &path,
        "nombre,id,pin,rol\n\
         Sin Pin,3,,trabajador\n\
         Nan Pin,4,nan,trabajador\n\
         Bad Id,x,5555,trabajador\n\
         Float Id,6.0,6666,capataz\n",
    )
    .unwrap();

    let roster = Roster::load(&path).unwrap();

    assert_eq!(roster.len(), 1);
    let w = roster.authenticate("6666").unwrap();
    assert_eq!(w.id, 6);
    assert_eq!(w.role, Role::Trabajador);
}

#[test]
fn test_missing_roster_file_is_error() {
    let missing = std::env::temp_dir().join("no_such_roster_rmontaje.csv");
    fs::remove_file(&missing).ok();
    assert!(matches!(Roster::load(&missing), Err(AppError::Roster(_))));
}

#[test]
fn test_roster_cli_masks_pins() {
    let path = write_roster("roster_cli");

    rmo()
        .args(["--roster", &path, "roster", "--list"])
        .assert()
        .success()
        .stdout(contains("Ana Admin"))
        .stdout(contains("jefe_obra"))
        .stdout(contains("***9"))
        .stdout(contains("9999").not());

    rmo()
        .args(["--roster", &path, "roster", "--check-pin", "1111"])
        .assert()
        .success()
        .stdout(contains("Luis Perez"));

    rmo()
        .args(["--roster", &path, "roster", "--check-pin", "4321"])
        .assert()
        .failure()
        .stderr(contains("Unknown PIN"));
}
