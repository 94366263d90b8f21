use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    JefeObra,
    Trabajador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::JefeObra => "jefe_obra",
            Role::Trabajador => "trabajador",
        }
    }

    /// Unknown roles degrade to a plain worker.
    pub fn from_roster(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "jefe_obra" | "jefe obra" => Role::JefeObra,
            _ => Role::Trabajador,
        }
    }

    /// Admins and site managers may see reports, edit rows and decide vacations.
    pub fn is_supervisor(&self) -> bool {
        matches!(self, Role::Admin | Role::JefeObra)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub pin: String,
}
