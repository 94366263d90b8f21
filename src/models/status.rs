use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pass/fail value used for both the torque and the checklist fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOT_OK")]
    NotOk,
}

impl CheckStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::NotOk => "NOT_OK",
        }
    }

    /// Lenient parser: accepts the legacy spreadsheet spellings too
    /// ("NO OK", "NOT OK", "NO_OK").
    pub fn from_db_str(s: &str) -> Option<Self> {
        let norm = s.trim().to_uppercase().replace([' ', '-'], "_");
        match norm.as_str() {
            "OK" => Some(CheckStatus::Ok),
            "NOT_OK" | "NO_OK" | "NOK" => Some(CheckStatus::NotOk),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// Display helper for nullable status columns.
pub fn status_label(status: Option<CheckStatus>) -> &'static str {
    status.map(|s| s.to_db_str()).unwrap_or("")
}
