use crate::core::calculator::shift::{ShiftClose, ShiftRules, close_day_with};
use crate::db::clock::ClockStore;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::clock::{ClockEvent, GeoPoint};
use crate::models::worker::Worker;
use chrono::{Days, NaiveDate, NaiveTime};

pub struct ClockLogic;

impl ClockLogic {
    /// Open the worker's row for `date`. A second clock-in on the same day
    /// is rejected. An exit-only row left by an earlier clock-out is
    /// completed in place, as long as the entry precedes that exit.
    pub fn clock_in(
        pool: &mut DbPool,
        worker: &Worker,
        date: NaiveDate,
        time: NaiveTime,
        location: Option<GeoPoint>,
        rules: ShiftRules,
    ) -> AppResult<ClockEvent> {
        let ev = {
            let mut store = ClockStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;

            if rows
                .iter()
                .any(|r| r.worker_id == worker.id && r.date == date && r.entry_time.is_some())
            {
                return Err(AppError::AlreadyClockedIn(date.to_string()));
            }

            let orphan = rows
                .iter()
                .position(|r| r.worker_id == worker.id && r.date == date && r.exit_time.is_some());

            let ev = match orphan {
                Some(i) => {
                    let row = &mut rows[i];
                    let Some(exit) = row.exit_time.filter(|exit| time <= *exit) else {
                        return Err(AppError::AlreadyClockedOut(date.to_string()));
                    };
                    let hours = close_day_with(Some(time), exit, rules).hours();
                    row.entry_time = Some(time);
                    row.entry_location = location;
                    row.worked_hours = hours.worked_hours;
                    row.overtime_hours = hours.overtime_hours;
                    row.clone()
                }
                None => {
                    let ev = ClockEvent::clock_in(worker.id, &worker.name, date, time, location);
                    rows.push(ev.clone());
                    ev
                }
            };

            store.save_all(&rows)?;
            ev
        };

        let mut ev = ev;
        if ev.id == 0 {
            ev.id = pool.conn.last_insert_rowid();
        }

        ttlog_soft(
            &pool.conn,
            "clock_in",
            &worker.name,
            &format!("Clock-in {} {}", date, time.format("%H:%M")),
        );

        Ok(ev)
    }

    /// Close the worker's open row. Looks at `date` first, then at the
    /// previous day when the exit is earlier than that entry (night shift).
    /// Without an open row the exit is stored alone with zero hours and
    /// `ShiftClose::IncompleteShift` is returned.
    pub fn clock_out(
        pool: &mut DbPool,
        worker: &Worker,
        date: NaiveDate,
        time: NaiveTime,
        location: Option<GeoPoint>,
        rules: ShiftRules,
    ) -> AppResult<(ClockEvent, ShiftClose)> {
        let (ev, outcome) = {
            let mut store = ClockStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;

            let yesterday = date.checked_sub_days(Days::new(1));

            let open_idx = rows
                .iter()
                .position(|r| r.worker_id == worker.id && r.date == date && r.is_open())
                .or_else(|| {
                    rows.iter().position(|r| {
                        r.worker_id == worker.id
                            && Some(r.date) == yesterday
                            && r.is_open()
                            && r.entry_time.is_some_and(|entry| time < entry)
                    })
                });

            let (ev, outcome) = match open_idx {
                Some(i) => {
                    let row = &mut rows[i];
                    let outcome = close_day_with(row.entry_time, time, rules);
                    let hours = outcome.hours();
                    row.exit_time = Some(time);
                    row.exit_location = location;
                    row.worked_hours = hours.worked_hours;
                    row.overtime_hours = hours.overtime_hours;
                    (row.clone(), outcome)
                }
                None => {
                    if rows
                        .iter()
                        .any(|r| r.worker_id == worker.id && r.date == date && r.exit_time.is_some())
                    {
                        return Err(AppError::AlreadyClockedOut(date.to_string()));
                    }

                    let ev = ClockEvent {
                        id: 0,
                        worker_id: worker.id,
                        worker_name: worker.name.clone(),
                        date,
                        entry_time: None,
                        exit_time: Some(time),
                        entry_location: None,
                        exit_location: location,
                        worked_hours: 0.0,
                        overtime_hours: 0.0,
                    };
                    rows.push(ev.clone());
                    (ev, ShiftClose::IncompleteShift)
                }
            };

            store.save_all(&rows)?;
            (ev, outcome)
        };

        let mut ev = ev;
        if ev.id == 0 {
            ev.id = pool.conn.last_insert_rowid();
        }

        let message = match outcome {
            ShiftClose::Complete(h) => format!(
                "Clock-out {} {} worked={:.2}h overtime={:.2}h",
                date,
                time.format("%H:%M"),
                h.worked_hours,
                h.overtime_hours
            ),
            ShiftClose::IncompleteShift => format!(
                "Clock-out {} {} without clock-in (incomplete shift)",
                date,
                time.format("%H:%M")
            ),
        };
        ttlog_soft(&pool.conn, "clock_out", &worker.name, &message);

        Ok((ev, outcome))
    }

    pub fn list(
        pool: &mut DbPool,
        worker_name: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<ClockEvent>> {
        let rows = ClockStore::new(&mut pool.conn).load_all()?;
        Ok(rows
            .into_iter()
            .filter(|r| worker_name.is_none_or(|n| r.worker_name.trim() == n.trim()))
            .filter(|r| bounds.is_none_or(|(from, to)| r.date >= from && r.date <= to))
            .collect())
    }
}
