use crate::db::repository::{Repository, id_param};
use crate::errors::{AppError, AppResult};
use crate::models::vacation::{VacationRequest, VacationStatus};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

pub struct VacationStore<'a> {
    conn: &'a mut Connection,
}

impl<'a> VacationStore<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }
}

impl Repository<VacationRequest> for VacationStore<'_> {
    fn load_all(&mut self) -> AppResult<Vec<VacationRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, worker_id, worker_name, start_date, end_date, status,
                    admin_comment, decided_by, created_at, decided_at
             FROM vacations
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn save_all(&mut self, rows: &[VacationRequest]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM vacations", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO vacations (id, worker_id, worker_name, start_date, end_date, status,
                                        admin_comment, decided_by, created_at, decided_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;

            for v in rows {
                stmt.execute(params![
                    id_param(v.id),
                    v.worker_id,
                    v.worker_name,
                    v.start_date.format("%Y-%m-%d").to_string(),
                    v.end_date.format("%Y-%m-%d").to_string(),
                    v.status.to_db_str(),
                    v.admin_comment,
                    v.decided_by,
                    v.created_at,
                    v.decided_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn map_row(row: &Row) -> rusqlite::Result<VacationRequest> {
    let conv = |e: AppError| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    };

    let date = |col: &str| -> rusqlite::Result<NaiveDate> {
        let s: String = row.get(col)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| conv(AppError::InvalidDate(s)))
    };

    let status_str: String = row.get("status")?;
    let status = VacationStatus::from_db_str(&status_str)
        .ok_or_else(|| conv(AppError::Other(format!("Invalid vacation status: {status_str}"))))?;

    Ok(VacationRequest {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        worker_name: row.get("worker_name")?,
        start_date: date("start_date")?,
        end_date: date("end_date")?,
        status,
        admin_comment: row.get::<_, Option<String>>("admin_comment")?.unwrap_or_default(),
        decided_by: row.get("decided_by")?,
        created_at: row.get("created_at")?,
        decided_at: row.get("decided_at")?,
    })
}
