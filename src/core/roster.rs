//! Read-only worker roster loaded from a CSV sheet (NOMBRE, ID, PIN, ROL).
//!
//! The roster is built once per command and passed explicitly to whoever
//! needs it; nothing here is global.

use crate::errors::{AppError, AppResult};
use crate::models::worker::{Role, Worker};
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    by_pin: HashMap<String, Worker>,
}

impl Roster {
    pub fn from_workers(workers: Vec<Worker>) -> Self {
        let mut by_pin = HashMap::new();
        for mut w in workers {
            w.pin = normalize_pin(&w.pin);
            if w.pin.is_empty() {
                continue;
            }
            by_pin.insert(w.pin.clone(), w);
        }
        Self { by_pin }
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Roster(format!(
                "roster file not found: {}",
                path.display()
            )));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| AppError::Roster(format!("cannot open roster: {e}")))?;

        let headers = rdr
            .headers()
            .map_err(|e| AppError::Roster(format!("cannot read roster header: {e}")))?
            .clone();

        let col = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };

        let (Some(c_name), Some(c_id), Some(c_pin)) = (
            col(&["NOMBRE", "name"]),
            col(&["ID"]),
            col(&["PIN"]),
        ) else {
            return Err(AppError::Roster(
                "roster must have NOMBRE, ID and PIN columns".into(),
            ));
        };
        let c_role = col(&["ROL", "role"]);

        let mut workers = Vec::new();

        for (line, rec) in rdr.records().enumerate() {
            let rec = match rec {
                Ok(r) => r,
                Err(e) => {
                    warning(format!("Skipping roster row {}: {e}", line + 2));
                    continue;
                }
            };

            let pin = normalize_pin(rec.get(c_pin).unwrap_or(""));
            if pin.is_empty() || pin.eq_ignore_ascii_case("nan") {
                continue;
            }

            let raw_id = rec.get(c_id).unwrap_or("");
            let Some(id) = parse_id(raw_id) else {
                warning(format!(
                    "Skipping roster row {}: invalid ID '{raw_id}'",
                    line + 2
                ));
                continue;
            };

            workers.push(Worker {
                id,
                name: rec.get(c_name).unwrap_or("").to_string(),
                role: Role::from_roster(c_role.and_then(|c| rec.get(c)).unwrap_or("")),
                pin,
            });
        }

        Ok(Self::from_workers(workers))
    }

    pub fn find_by_pin(&self, pin: &str) -> Option<&Worker> {
        self.by_pin.get(&normalize_pin(pin))
    }

    /// Resolve a PIN or fail with `UnknownPin`.
    pub fn authenticate(&self, pin: &str) -> AppResult<&Worker> {
        self.find_by_pin(pin).ok_or(AppError::UnknownPin)
    }

    /// Resolve a PIN and require a supervisor role.
    pub fn require_supervisor(&self, pin: &str, action: &str) -> AppResult<&Worker> {
        let w = self.authenticate(pin)?;
        if !w.role.is_supervisor() {
            return Err(AppError::Unauthorized(format!(
                "{} ({}) cannot {action}",
                w.name,
                w.role.as_str()
            )));
        }
        Ok(w)
    }

    /// Workers sorted by id.
    pub fn workers(&self) -> Vec<&Worker> {
        let mut v: Vec<&Worker> = self.by_pin.values().collect();
        v.sort_by_key(|w| w.id);
        v
    }

    pub fn len(&self) -> usize {
        self.by_pin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pin.is_empty()
    }
}

/// Trim, and turn spreadsheet floats such as "1111.0" back into "1111".
pub fn normalize_pin(raw: &str) -> String {
    let pin = raw.trim();
    if let Some((int_part, frac)) = pin.split_once('.')
        && !int_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac.chars().all(|c| c == '0')
    {
        return int_part.to_string();
    }
    pin.to_string()
}

fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| match raw.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 => Some(f as i64),
            _ => None,
        })
}
