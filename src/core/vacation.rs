use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::db::vacations::VacationStore;
use crate::errors::{AppError, AppResult};
use crate::models::vacation::{VacationRequest, VacationStatus};
use crate::models::worker::Worker;
use chrono::{Local, NaiveDate};

/// Vacation lifecycle: created pending by a worker, decided once by a
/// supervisor, immutable afterwards.
pub struct VacationLogic;

impl VacationLogic {
    pub fn request(
        pool: &mut DbPool,
        worker: &Worker,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<VacationRequest> {
        if from > to {
            return Err(AppError::InvalidDate(format!(
                "vacation start {from} is after end {to}"
            )));
        }

        let mut req = VacationRequest {
            id: 0,
            worker_id: worker.id,
            worker_name: worker.name.clone(),
            start_date: from,
            end_date: to,
            status: VacationStatus::Pending,
            admin_comment: String::new(),
            decided_by: None,
            created_at: Local::now().to_rfc3339(),
            decided_at: None,
        };

        {
            let mut store = VacationStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;
            rows.push(req.clone());
            store.save_all(&rows)?;
        }

        req.id = pool.conn.last_insert_rowid();

        ttlog_soft(
            &pool.conn,
            "vacation_request",
            &worker.name,
            &format!("Request #{}: {} → {}", req.id, from, to),
        );

        Ok(req)
    }

    pub fn decide(
        pool: &mut DbPool,
        supervisor: &Worker,
        id: i64,
        approve: bool,
        comment: Option<String>,
    ) -> AppResult<VacationRequest> {
        if !supervisor.role.is_supervisor() {
            return Err(AppError::Unauthorized(format!(
                "{} ({}) cannot decide vacation requests",
                supervisor.name,
                supervisor.role.as_str()
            )));
        }

        let decided = {
            let mut store = VacationStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;

            let req = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::NotFound(format!("vacation request #{id}")))?;

            if req.status != VacationStatus::Pending {
                return Err(AppError::VacationAlreadyDecided(id));
            }

            req.status = if approve {
                VacationStatus::Approved
            } else {
                VacationStatus::Denied
            };
            req.admin_comment = comment.unwrap_or_default().trim().to_string();
            req.decided_by = Some(supervisor.name.clone());
            req.decided_at = Some(Local::now().to_rfc3339());

            let decided = req.clone();
            store.save_all(&rows)?;
            decided
        };

        ttlog_soft(
            &pool.conn,
            "vacation_decide",
            &decided.worker_name,
            &format!(
                "Request #{} {} by {}",
                decided.id,
                decided.status.to_db_str(),
                supervisor.name
            ),
        );

        Ok(decided)
    }

    pub fn list(
        pool: &mut DbPool,
        status: Option<VacationStatus>,
        worker_name: Option<&str>,
    ) -> AppResult<Vec<VacationRequest>> {
        let rows = VacationStore::new(&mut pool.conn).load_all()?;
        Ok(rows
            .into_iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| worker_name.is_none_or(|n| r.worker_name.trim() == n.trim()))
            .collect())
    }
}
