use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VacationStatus {
    Pending,
    Approved,
    Denied,
}

impl VacationStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "pending",
            VacationStatus::Approved => "approved",
            VacationStatus::Denied => "denied",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VacationStatus::Pending),
            "approved" => Some(VacationStatus::Approved),
            "denied" => Some(VacationStatus::Denied),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacationRequest {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VacationStatus,
    pub admin_comment: String,
    pub decided_by: Option<String>,
    pub created_at: String,
    pub decided_at: Option<String>,
}

impl VacationRequest {
    /// Requested days, both ends included.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
