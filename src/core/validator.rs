//! Registration validator: decides whether a (CT, field, table) may be
//! registered given the rows already stored. Pure, no side effects.

use crate::errors::AppError;
use crate::models::status::CheckStatus;
use crate::models::structure::{StructureKey, StructureRecord};
use serde::{Deserialize, Serialize};

/// How an already-registered key is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Any existing row with the same key rejects the submission.
    #[default]
    Strict,
    /// Only a row with the same key AND the same torque/checklist statuses
    /// rejects; a differing status is accepted as a correction.
    Lenient,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Strict => "strict",
            DuplicatePolicy::Lenient => "lenient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Duplicate,
    InvalidInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// Turn a rejection into the matching application error.
    pub fn into_result(self, key: StructureKey) -> Result<(), AppError> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Rejected(RejectReason::InvalidInput(msg)) => Err(AppError::InvalidInput(msg)),
            Decision::Rejected(RejectReason::Duplicate) => Err(AppError::Duplicate {
                ct: key.ct,
                field: key.field,
                table_no: key.table_no,
            }),
        }
    }
}

/// Raw-string entry point: the key is parsed (and bounds-checked) before
/// the duplicate scan runs.
pub fn can_register(
    existing: &[StructureRecord],
    ct: &str,
    field: &str,
    table_no: &str,
    torque_status: CheckStatus,
    checklist_status: CheckStatus,
    policy: DuplicatePolicy,
) -> Decision {
    match StructureKey::parse(ct, field, table_no) {
        Ok(key) => check_key(existing, key, torque_status, checklist_status, policy),
        Err(AppError::InvalidInput(msg)) => Decision::Rejected(RejectReason::InvalidInput(msg)),
        Err(other) => Decision::Rejected(RejectReason::InvalidInput(other.to_string())),
    }
}

/// Duplicate scan for an already-parsed key.
pub fn check_key(
    existing: &[StructureRecord],
    key: StructureKey,
    torque_status: CheckStatus,
    checklist_status: CheckStatus,
    policy: DuplicatePolicy,
) -> Decision {
    let mut matches = existing.iter().filter(|r| r.key() == key).peekable();

    let duplicate = match policy {
        DuplicatePolicy::Strict => matches.peek().is_some(),
        DuplicatePolicy::Lenient => matches.any(|r| {
            r.torque_status == Some(torque_status) && r.checklist_status == Some(checklist_status)
        }),
    };

    if duplicate {
        Decision::Rejected(RejectReason::Duplicate)
    } else {
        Decision::Allowed
    }
}
