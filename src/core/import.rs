//! Import of rows exported from the legacy assembly spreadsheet.

use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::db::structures::{StructureStore, parse_stored_date};
use crate::errors::{AppError, AppResult};
use crate::models::status::CheckStatus;
use crate::models::structure::{StructureKey, StructureRecord};
use crate::ui::messages::warning;
use std::path::Path;

/// Accepted header spellings per column, legacy names first.
const COLUMNS: [(&str, &[&str]); 11] = [
    ("worker_id", &["Trabajador", "worker_id"]),
    ("worker_name", &["Nombre", "worker_name"]),
    ("date", &["Fecha", "date"]),
    ("start_time", &["Hora inicio", "start_time"]),
    ("end_time", &["Hora fin", "end_time"]),
    ("ct", &["CT", "ct"]),
    ("field", &["Campo/Área", "Campo/Area", "Campo", "field"]),
    ("table_no", &["Nº Mesa", "N° Mesa", "Mesa", "table_no"]),
    ("torque_status", &["Par de apriete", "torque_status"]),
    ("checklist_status", &["CHECK LIST", "PPI", "checklist_status"]),
    ("notes", &["Observaciones", "notes"]),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Append every row with a valid key. Legacy data is taken as-is:
    /// no duplicate check runs on import.
    pub fn import_csv(pool: &mut DbPool, path: &Path) -> AppResult<ImportSummary> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| AppError::Import(format!("cannot open {}: {e}", path.display())))?;

        let headers = rdr
            .headers()
            .map_err(|e| AppError::Import(format!("cannot read header: {e}")))?
            .clone();

        let index: Vec<Option<usize>> = COLUMNS
            .iter()
            .map(|(_, aliases)| {
                headers
                    .iter()
                    .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
            })
            .collect();

        // ct, field, table_no are mandatory
        for (i, (name, _)) in COLUMNS.iter().enumerate().skip(5).take(3) {
            if index[i].is_none() {
                return Err(AppError::Import(format!("missing column '{name}'")));
            }
        }

        let mut summary = ImportSummary::default();
        let mut new_rows = Vec::new();

        for (line, rec) in rdr.records().enumerate() {
            let rec = match rec {
                Ok(r) => r,
                Err(e) => {
                    warning(format!("Skipping line {}: {e}", line + 2));
                    summary.skipped += 1;
                    continue;
                }
            };

            let get = |i: usize| index[i].and_then(|c| rec.get(c)).unwrap_or("").trim();
            let opt = |i: usize| Some(get(i).to_string()).filter(|s| !s.is_empty());

            let key = match StructureKey::parse(
                &integer_text(get(5)),
                &integer_text(get(6)),
                &integer_text(get(7)),
            ) {
                Ok(k) => k,
                Err(e) => {
                    warning(format!("Skipping line {}: {e}", line + 2));
                    summary.skipped += 1;
                    continue;
                }
            };

            new_rows.push(StructureRecord {
                id: 0,
                worker_id: integer_text(get(0)).parse().unwrap_or(0),
                worker_name: get(1).to_string(),
                date: parse_stored_date(get(2)),
                start_time: opt(3),
                end_time: opt(4),
                ct: key.ct,
                field: key.field,
                table_no: key.table_no,
                torque_status: CheckStatus::from_db_str(get(8)),
                checklist_status: CheckStatus::from_db_str(get(9)),
                notes: get(10).to_string(),
            });
            summary.imported += 1;
        }

        if !new_rows.is_empty() {
            let mut store = StructureStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;
            rows.extend(new_rows);
            store.save_all(&rows)?;
        }

        ttlog_soft(
            &pool.conn,
            "import",
            &path.to_string_lossy(),
            &format!(
                "Imported {} rows, skipped {}",
                summary.imported, summary.skipped
            ),
        );

        Ok(summary)
    }
}

/// Spreadsheets hand integers back as "12.0".
fn integer_text(s: &str) -> String {
    match s.split_once('.') {
        Some((int, frac)) if frac.chars().all(|c| c == '0') => int.to_string(),
        _ => s.to_string(),
    }
}
