use crate::db::repository::{Repository, id_param};
use crate::errors::{AppError, AppResult};
use crate::models::clock::{ClockEvent, GeoPoint};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Row, params};

pub struct ClockStore<'a> {
    conn: &'a mut Connection,
}

impl<'a> ClockStore<'a> {
    pub fn new(conn: &'a mut Connection) -> Self {
        Self { conn }
    }
}

impl Repository<ClockEvent> for ClockStore<'_> {
    fn load_all(&mut self) -> AppResult<Vec<ClockEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, worker_id, worker_name, date, entry_time, exit_time,
                    entry_lat, entry_lon, exit_lat, exit_lon, worked_hours, overtime_hours
             FROM clock_events
             ORDER BY date ASC, id ASC",
        )?;

        let rows = stmt.query_map([], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn save_all(&mut self, rows: &[ClockEvent]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM clock_events", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO clock_events (id, worker_id, worker_name, date, entry_time, exit_time,
                                           entry_lat, entry_lon, exit_lat, exit_lon,
                                           worked_hours, overtime_hours)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;

            for ev in rows {
                stmt.execute(params![
                    id_param(ev.id),
                    ev.worker_id,
                    ev.worker_name,
                    ev.date.format("%Y-%m-%d").to_string(),
                    ev.entry_time.map(|t| t.format("%H:%M").to_string()),
                    ev.exit_time.map(|t| t.format("%H:%M").to_string()),
                    ev.entry_location.map(|p| p.lat),
                    ev.entry_location.map(|p| p.lon),
                    ev.exit_location.map(|p| p.lat),
                    ev.exit_location.map(|p| p.lon),
                    ev.worked_hours,
                    ev.overtime_hours,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn map_row(row: &Row) -> rusqlite::Result<ClockEvent> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = |col: &str| -> rusqlite::Result<Option<NaiveTime>> {
        let raw: Option<String> = row.get(col)?;
        Ok(raw.and_then(|t| NaiveTime::parse_from_str(&t, "%H:%M").ok()))
    };

    Ok(ClockEvent {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        worker_name: row.get("worker_name")?,
        date,
        entry_time: time("entry_time")?,
        exit_time: time("exit_time")?,
        entry_location: GeoPoint::from_parts(row.get("entry_lat")?, row.get("entry_lon")?),
        exit_location: GeoPoint::from_parts(row.get("exit_lat")?, row.get("exit_lon")?),
        worked_hours: row.get("worked_hours")?,
        overtime_hours: row.get("overtime_hours")?,
    })
}
