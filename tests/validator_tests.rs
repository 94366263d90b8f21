mod common;
use common::record;
use rmontaje::core::validator::{Decision, DuplicatePolicy, RejectReason, can_register};
use rmontaje::models::status::CheckStatus::{NotOk, Ok as OK};

#[test]
fn test_new_key_is_allowed_under_both_policies() {
    let existing = vec![record("Luis Perez", Some("2025-03-01"), (5, 12, 3), Some(OK), Some(OK))];

    for policy in [DuplicatePolicy::Strict, DuplicatePolicy::Lenient] {
        assert_eq!(
            can_register(&existing, "5", "12", "4", OK, OK, policy),
            Decision::Allowed
        );
    }
}

#[test]
fn test_identical_resubmission_is_rejected_under_both_policies() {
    let existing = vec![record("Luis Perez", Some("2025-03-01"), (5, 12, 3), Some(OK), Some(OK))];

    for policy in [DuplicatePolicy::Strict, DuplicatePolicy::Lenient] {
        assert_eq!(
            can_register(&existing, "5", "12", "3", OK, OK, policy),
            Decision::Rejected(RejectReason::Duplicate)
        );
    }
}

#[test]
fn test_status_correction_only_allowed_when_lenient() {
    let existing = vec![record("Luis Perez", Some("2025-03-01"), (5, 12, 3), Some(OK), Some(OK))];

    assert_eq!(
        can_register(&existing, "5", "12", "3", NotOk, OK, DuplicatePolicy::Strict),
        Decision::Rejected(RejectReason::Duplicate)
    );
    assert!(
        can_register(&existing, "5", "12", "3", NotOk, OK, DuplicatePolicy::Lenient).is_allowed()
    );
}

#[test]
fn test_malformed_key_is_invalid_input_before_duplicate_check() {
    let existing = vec![record("Luis Perez", Some("2025-03-01"), (5, 12, 3), Some(OK), Some(OK))];

    for (ct, field, table) in [("abc", "12", "3"), ("5", "", "3"), ("0", "12", "3"), ("101", "12", "3"), ("5", "10001", "3"), ("5", "12", "3.5")] {
        let d = can_register(&existing, ct, field, table, OK, OK, DuplicatePolicy::Strict);
        assert!(
            matches!(d, Decision::Rejected(RejectReason::InvalidInput(_))),
            "{ct}/{field}/{table} gave {d:?}"
        );
    }
}

#[test]
fn test_bounds_are_inclusive() {
    assert!(can_register(&[], "100", "10000", "10000", OK, OK, DuplicatePolicy::Strict).is_allowed());
    assert!(can_register(&[], "1", "1", "1", OK, OK, DuplicatePolicy::Strict).is_allowed());
}

#[test]
fn test_duplicate_maps_to_duplicate_error() {
    let existing = vec![record("Luis Perez", None, (5, 12, 3), Some(OK), Some(OK))];
    let err = can_register(&existing, "5", "12", "3", OK, OK, DuplicatePolicy::Strict)
        .into_result(rmontaje::models::structure::StructureKey::parse("5", "12", "3").unwrap())
        .unwrap_err();

    assert!(matches!(
        err,
        rmontaje::errors::AppError::Duplicate {
            ct: 5,
            field: 12,
            table_no: 3
        }
    ));
}
