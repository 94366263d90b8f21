use crate::db::repository::{Repository, id_param};
use crate::errors::AppResult;
use crate::models::status::CheckStatus;
use crate::models::structure::StructureRecord;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params, params_from_iter};

pub struct StructureStore<'a> {
    conn: &'a mut Connection,
    /// Ids of stored rows whose key could not be read. They are left in
    /// the table untouched by `save_all`.
    unreadable: Vec<i64>,
}

impl<'a> StructureStore<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self {
            conn,
            unreadable: Vec::new(),
        }
    }

    pub fn unreadable_ids(&self) -> &[i64] {
        &self.unreadable
    }
}

impl Repository<StructureRecord> for StructureStore<'_> {
    fn load_all(&mut self) -> AppResult<Vec<StructureRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, worker_id, worker_name, date, start_time, end_time,
                    ct, field, table_no, torque_status, checklist_status, notes
             FROM structures
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], map_row)?;

        let mut out = Vec::new();
        self.unreadable.clear();
        for r in rows {
            match r? {
                Ok(record) => out.push(record),
                Err(id) => self.unreadable.push(id),
            }
        }
        Ok(out)
    }

    fn save_all(&mut self, rows: &[StructureRecord]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        if self.unreadable.is_empty() {
            tx.execute("DELETE FROM structures", [])?;
        } else {
            let marks = vec!["?"; self.unreadable.len()].join(",");
            tx.execute(
                &format!("DELETE FROM structures WHERE id NOT IN ({marks})"),
                params_from_iter(self.unreadable.iter()),
            )?;
        }
        {
            let mut stmt = tx.prepare(
                "INSERT INTO structures (id, worker_id, worker_name, date, start_time, end_time,
                                         ct, field, table_no, torque_status, checklist_status, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;

            for r in rows {
                stmt.execute(params![
                    id_param(r.id),
                    r.worker_id,
                    r.worker_name,
                    r.date.map(|d| d.format("%Y-%m-%d").to_string()),
                    r.start_time,
                    r.end_time,
                    r.ct,
                    r.field,
                    r.table_no,
                    r.torque_status.map(|s| s.to_db_str()),
                    r.checklist_status.map(|s| s.to_db_str()),
                    r.notes,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

/// Mapping DB → StructureRecord. Malformed dates/statuses become `None`
/// instead of failing the whole load. A row whose key cannot be read as
/// whole numbers yields `Err(id)`.
fn map_row(row: &Row) -> rusqlite::Result<Result<StructureRecord, i64>> {
    let id: i64 = row.get("id")?;
    let date: Option<String> = row.get("date")?;
    let torque: Option<String> = row.get("torque_status")?;
    let checklist: Option<String> = row.get("checklist_status")?;

    let (Some(ct), Some(field), Some(table_no)) = (
        key_part(row.get("ct")?),
        key_part(row.get("field")?),
        key_part(row.get("table_no")?),
    ) else {
        return Ok(Err(id));
    };

    Ok(Ok(StructureRecord {
        id,
        worker_id: row.get::<_, Option<i64>>("worker_id")?.unwrap_or(0),
        worker_name: row.get::<_, Option<String>>("worker_name")?.unwrap_or_default(),
        date: date.as_deref().and_then(parse_stored_date),
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        ct,
        field,
        table_no,
        torque_status: torque.as_deref().and_then(CheckStatus::from_db_str),
        checklist_status: checklist.as_deref().and_then(CheckStatus::from_db_str),
        notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
    }))
}

/// Key columns may hold spreadsheet leftovers such as `12.0` or `"12"`.
fn key_part(v: Value) -> Option<u32> {
    let n = match v {
        Value::Integer(i) => i,
        Value::Real(f) if f.fract() == 0.0 => f as i64,
        Value::Text(t) => {
            let t = t.trim();
            match t.parse::<i64>() {
                Ok(i) => i,
                Err(_) => {
                    let f = t.parse::<f64>().ok()?;
                    if f.fract() != 0.0 {
                        return None;
                    }
                    f as i64
                }
            }
        }
        _ => return None,
    };
    u32::try_from(n).ok()
}

/// Accepts plain dates and spreadsheet-style timestamps ("2025-03-01 00:00:00").
pub fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
        .or_else(|| NaiveDate::parse_from_str(s, "%d/%m/%Y").ok())
}
