mod common;
use chrono::{NaiveDate, NaiveTime};
use common::{LUIS_PIN, MARTA_PIN, init_env, rmo, setup_test_db};
use predicates::str::contains;
use rmontaje::core::calculator::shift::{ShiftClose, ShiftRules};
use rmontaje::core::clock::ClockLogic;
use rmontaje::db::pool::DbPool;
use rmontaje::errors::AppError;
use rmontaje::models::worker::{Role, Worker};

fn luis() -> Worker {
    Worker {
        id: 10,
        name: "Luis Perez".into(),
        role: Role::Trabajador,
        pin: "1111".into(),
    }
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_clock_in_out_cli() {
    let (db, roster) = init_env("clock_cli");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "clock", "in", "--pin", LUIS_PIN, "--time", "09:00",
            "--lat", "37.38", "--lon", "-5.98",
        ])
        .assert()
        .success()
        .stdout(contains("clocked in at 09:00"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "clock", "in", "--pin", LUIS_PIN, "--time", "09:05",
        ])
        .assert()
        .failure()
        .stderr(contains("Already clocked in"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "clock", "out", "--pin", LUIS_PIN, "--time",
            "17:30",
        ])
        .assert()
        .success()
        .stdout(contains("worked 07h 30m"));

    rmo()
        .args(["--db", &db, "clock", "list", "--worker", "Luis Perez"])
        .assert()
        .success()
        .stdout(contains("7.50"));
}

#[test]
fn test_clock_out_without_entry_is_incomplete() {
    let (db, roster) = init_env("clock_incomplete");

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "clock", "out", "--pin", MARTA_PIN, "--time",
            "18:00",
        ])
        .assert()
        .success()
        .stdout(contains("Incomplete shift"));

    rmo()
        .args([
            "--db", &db, "--roster", &roster, "clock", "out", "--pin", MARTA_PIN, "--time",
            "18:10",
        ])
        .assert()
        .failure()
        .stderr(contains("Already clocked out"));
}

#[test]
fn test_overnight_shift_closes_previous_day() {
    let db = setup_test_db("clock_overnight");
    let mut pool = DbPool::open_ready(&db).unwrap();
    let w = luis();

    ClockLogic::clock_in(&mut pool, &w, d("2025-03-01"), t("22:00"), None, ShiftRules::default())
        .unwrap();

    let (ev, outcome) = ClockLogic::clock_out(
        &mut pool,
        &w,
        d("2025-03-02"),
        t("06:00"),
        None,
        ShiftRules::default(),
    )
    .unwrap();

    assert_eq!(ev.date, d("2025-03-01"));
    assert_eq!(outcome.hours().worked_hours, 7.0);

    let rows = ClockLogic::list(&mut pool, Some("Luis Perez"), None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].exit_time, Some(t("06:00")));
}

#[test]
fn test_overtime_with_configured_rules() {
    let db = setup_test_db("clock_overtime");
    let mut pool = DbPool::open_ready(&db).unwrap();
    let w = luis();

    ClockLogic::clock_in(&mut pool, &w, d("2025-03-03"), t("08:00"), None, ShiftRules::default())
        .unwrap();
    let (_, outcome) = ClockLogic::clock_out(
        &mut pool,
        &w,
        d("2025-03-03"),
        t("19:00"),
        None,
        ShiftRules::default(),
    )
    .unwrap();

    match outcome {
        ShiftClose::Complete(h) => {
            assert_eq!(h.worked_hours, 10.0);
            assert_eq!(h.overtime_hours, 2.0);
        }
        ShiftClose::IncompleteShift => panic!("expected complete shift"),
    }

    let in_range = ClockLogic::list(&mut pool, None, Some((d("2025-03-03"), d("2025-03-03"))))
        .unwrap();
    assert_eq!(in_range.len(), 1);
    assert!(!in_range[0].is_open());

    let err = ClockLogic::clock_in(
        &mut pool,
        &w,
        d("2025-03-03"),
        t("20:00"),
        None,
        ShiftRules::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::AlreadyClockedIn(_)));
}

#[test]
fn test_clock_in_completes_earlier_exit_only_row() {
    let db = setup_test_db("clock_orphan_fill");
    let mut pool = DbPool::open_ready(&db).unwrap();
    let w = luis();
    let day = d("2025-03-04");

    let (_, outcome) =
        ClockLogic::clock_out(&mut pool, &w, day, t("18:00"), None, ShiftRules::default())
            .unwrap();
    assert_eq!(outcome, ShiftClose::IncompleteShift);

    let ev = ClockLogic::clock_in(&mut pool, &w, day, t("09:00"), None, ShiftRules::default())
        .unwrap();
    assert_eq!(ev.entry_time, Some(t("09:00")));
    assert_eq!(ev.exit_time, Some(t("18:00")));
    assert_eq!(ev.worked_hours, 8.0);
    assert_eq!(ev.overtime_hours, 0.0);

    let err = ClockLogic::clock_out(&mut pool, &w, day, t("19:00"), None, ShiftRules::default())
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyClockedOut(_)));

    let rows = ClockLogic::list(&mut pool, None, Some((day, day))).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_open());
}

#[test]
fn test_clock_in_after_same_day_exit_is_rejected() {
    let db = setup_test_db("clock_orphan_late_in");
    let mut pool = DbPool::open_ready(&db).unwrap();
    let w = luis();
    let day = d("2025-03-05");

    ClockLogic::clock_out(&mut pool, &w, day, t("07:00"), None, ShiftRules::default()).unwrap();

    let err = ClockLogic::clock_in(&mut pool, &w, day, t("08:00"), None, ShiftRules::default())
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyClockedOut(_)));

    let err = ClockLogic::clock_out(&mut pool, &w, day, t("17:00"), None, ShiftRules::default())
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyClockedOut(_)));

    let rows = ClockLogic::list(&mut pool, None, Some((day, day))).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entry_time, None);
}
