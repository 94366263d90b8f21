use crate::core::validator::{DuplicatePolicy, check_key};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::db::structures::StructureStore;
use crate::errors::AppResult;
use crate::models::structure::{StructureForm, StructureRecord};
use crate::models::worker::Worker;
use chrono::NaiveDate;

/// High-level business logic for the `register` command.
pub struct RegisterLogic;

impl RegisterLogic {
    /// Validate the form, run the duplicate check against the full table and
    /// append the new row. Nothing is written when the check fails.
    pub fn apply(
        pool: &mut DbPool,
        worker: &Worker,
        form: &StructureForm,
        policy: DuplicatePolicy,
        date: NaiveDate,
    ) -> AppResult<StructureRecord> {
        let valid = form.validate()?;

        let mut record = StructureRecord {
            id: 0,
            worker_id: worker.id,
            worker_name: worker.name.clone(),
            date: Some(date),
            start_time: valid.start_time,
            end_time: valid.end_time,
            ct: valid.key.ct,
            field: valid.key.field,
            table_no: valid.key.table_no,
            torque_status: Some(valid.torque_status),
            checklist_status: Some(valid.checklist_status),
            notes: valid.notes,
        };

        {
            let mut store = StructureStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;

            check_key(
                &rows,
                valid.key,
                valid.torque_status,
                valid.checklist_status,
                policy,
            )
            .into_result(valid.key)?;

            rows.push(record.clone());
            store.save_all(&rows)?;
        }

        // The new row is the last one inserted by save_all.
        record.id = pool.conn.last_insert_rowid();

        ttlog_soft(
            &pool.conn,
            "register",
            &valid.key.label(),
            &format!(
                "Registered by {} (#{}) torque={} checklist={} policy={}",
                worker.name,
                worker.id,
                valid.torque_status,
                valid.checklist_status,
                policy.as_str()
            ),
        );

        Ok(record)
    }
}
