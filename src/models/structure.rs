use super::status::CheckStatus;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

pub const MAX_CT: u32 = 100;
pub const MAX_FIELD: u32 = 10_000;
pub const MAX_TABLE: u32 = 10_000;

/// One installed table/structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureRecord {
    pub id: i64,                                // ⇔ structures.id (0 = not yet stored)
    pub worker_id: i64,                         // ⇔ structures.worker_id
    pub worker_name: String,                    // ⇔ structures.worker_name
    pub date: Option<NaiveDate>,                // ⇔ structures.date (None if missing/malformed)
    pub start_time: Option<String>,             // ⇔ structures.start_time (free text)
    pub end_time: Option<String>,               // ⇔ structures.end_time (free text)
    pub ct: u32,                                // ⇔ structures.ct
    pub field: u32,                             // ⇔ structures.field
    pub table_no: u32,                          // ⇔ structures.table_no
    pub torque_status: Option<CheckStatus>,     // ⇔ structures.torque_status
    pub checklist_status: Option<CheckStatus>,  // ⇔ structures.checklist_status (legacy "PPI")
    pub notes: String,                          // ⇔ structures.notes
}

impl StructureRecord {
    pub fn key(&self) -> StructureKey {
        StructureKey {
            ct: self.ct,
            field: self.field,
            table_no: self.table_no,
        }
    }

    /// Both torque and checklist are OK.
    pub fn is_complete(&self) -> bool {
        self.torque_status == Some(CheckStatus::Ok)
            && self.checklist_status == Some(CheckStatus::Ok)
    }

    pub fn date_str(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Physical identity of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureKey {
    pub ct: u32,
    pub field: u32,
    pub table_no: u32,
}

impl StructureKey {
    /// Parse the three raw form values, enforcing the bounds
    /// 1..=100 / 1..=10000 / 1..=10000.
    pub fn parse(ct: &str, field: &str, table_no: &str) -> AppResult<Self> {
        Ok(Self {
            ct: parse_bounded("CT", ct, MAX_CT)?,
            field: parse_bounded("field", field, MAX_FIELD)?,
            table_no: parse_bounded("table", table_no, MAX_TABLE)?,
        })
    }

    pub fn label(&self) -> String {
        format!("CT {} / field {} / table {}", self.ct, self.field, self.table_no)
    }
}

fn parse_bounded(name: &str, raw: &str, max: u32) -> AppResult<u32> {
    let v: i64 = raw.trim().parse().map_err(|_| {
        AppError::InvalidInput(format!("{name} must be a whole number, got '{raw}'"))
    })?;

    if v < 1 || v > max as i64 {
        return Err(AppError::InvalidInput(format!(
            "{name} must be between 1 and {max}, got {v}"
        )));
    }

    Ok(v as u32)
}

/// Raw values as they arrive from the form / command line.
#[derive(Debug, Clone, Default)]
pub struct StructureForm {
    pub ct: String,
    pub field: String,
    pub table_no: String,
    pub torque_status: String,
    pub checklist_status: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
}

/// A form that passed boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedStructure {
    pub key: StructureKey,
    pub torque_status: CheckStatus,
    pub checklist_status: CheckStatus,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: String,
}

impl StructureForm {
    pub fn validate(&self) -> AppResult<ValidatedStructure> {
        let key = StructureKey::parse(&self.ct, &self.field, &self.table_no)?;
        let torque_status = CheckStatus::parse(&self.torque_status)?;
        let checklist_status = CheckStatus::parse(&self.checklist_status)?;

        Ok(ValidatedStructure {
            key,
            torque_status,
            checklist_status,
            start_time: clean_time(self.start_time.as_deref()),
            end_time: clean_time(self.end_time.as_deref()),
            notes: self.notes.clone().unwrap_or_default().trim().to_string(),
        })
    }
}

/// Start/end times are optional free text; HH:MM values are normalized.
fn clean_time(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(t) => Some(
            NaiveTime::parse_from_str(t, "%H:%M")
                .map(|parsed| parsed.format("%H:%M").to_string())
                .unwrap_or_else(|_| t.to_string()),
        ),
    }
}
