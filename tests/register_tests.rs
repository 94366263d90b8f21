mod common;
use common::{ADMIN_PIN, LUIS_PIN, MARTA_PIN, init_env, register, rmo};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

#[test]
fn test_register_then_duplicate_is_rejected() {
    let (db, roster) = init_env("register_strict");

    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "OK", "OK")
        .success()
        .stdout(contains("Registered CT 5 / field 12 / table 3"));

    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "OK", "OK")
        .failure()
        .stderr(contains("already registered"));

    // strict: a different status is still a duplicate
    register(&db, &roster, MARTA_PIN, ("5", "12", "3"), "NOT_OK", "OK")
        .failure()
        .stderr(contains("already registered"));

    rmo()
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("1 structure(s)"));
}

#[test]
fn test_lenient_policy_accepts_status_correction() {
    let (db, roster) = init_env("register_lenient");

    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "OK", "OK").success();

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "register", "--pin", LUIS_PIN, "--ct", "5",
            "--field", "12", "--table", "3", "--torque", "OK", "--checklist", "OK", "--policy",
            "lenient",
        ])
        .assert()
        .failure()
        .stderr(contains("already registered"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "register", "--pin", LUIS_PIN, "--ct", "5",
            "--field", "12", "--table", "3", "--torque", "NOT_OK", "--checklist", "OK",
            "--policy", "lenient",
        ])
        .assert()
        .success();

    rmo()
        .args(["--db", &db, "list", "--ct", "5"])
        .assert()
        .success()
        .stdout(contains("2 structure(s)"));
}

#[test]
fn test_invalid_key_is_rejected_without_write() {
    let (db, roster) = init_env("register_invalid");

    register(&db, &roster, LUIS_PIN, ("abc", "12", "3"), "OK", "OK")
        .failure()
        .stderr(contains("Invalid input"));

    register(&db, &roster, LUIS_PIN, ("101", "12", "3"), "OK", "OK")
        .failure()
        .stderr(contains("between 1 and 100"));

    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "MAYBE", "OK")
        .failure()
        .stderr(contains("Invalid status"));

    rmo()
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("No structures registered"));
}

#[test]
fn test_legacy_status_spellings_and_float_pin() {
    let (db, roster) = init_env("register_legacy");

    register(&db, &roster, "1111.0", ("7", "1", "1"), "not ok", "no ok")
        .success()
        .stdout(contains("Luis Perez"));

    rmo()
        .args(["--db", &db, "list", "--worker", "Luis Perez"])
        .assert()
        .success()
        .stdout(contains("NOT_OK"));
}

#[test]
fn test_unknown_pin_cannot_register() {
    let (db, roster) = init_env("register_unknown_pin");

    register(&db, &roster, "0000", ("5", "12", "3"), "OK", "OK")
        .failure()
        .stderr(contains("Unknown PIN"));
}

#[test]
fn test_supervisor_edit_is_audited() {
    let (db, roster) = init_env("register_edit");

    register(&db, &roster, LUIS_PIN, ("5", "12", "3"), "OK", "OK").success();

    // workers cannot edit
    rmo()
        .args([
            "--db", &db, "--roster", &roster, "edit", "--pin", MARTA_PIN, "--id", "1",
            "--torque", "NOT_OK",
        ])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "edit", "--pin", ADMIN_PIN, "--id", "1",
            "--torque", "NOT_OK", "--notes", "bolt missing",
        ])
        .assert()
        .success()
        .stdout(contains("torque_status: OK -> NOT_OK"));

    rmo()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("torque_status: OK -> NOT_OK by Ana Admin (admin)"))
        .stdout(contains("CT 5 / field 12 / table 3"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "edit", "--pin", ADMIN_PIN, "--id", "42",
            "--torque", "OK",
        ])
        .assert()
        .failure()
        .stderr(contains("not found"));

    rmo()
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("bolt missing"))
        .stdout(contains("NOT_OK").and(contains("Luis Perez")));
}
