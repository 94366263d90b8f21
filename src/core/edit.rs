use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::db::structures::StructureStore;
use crate::errors::{AppError, AppResult};
use crate::models::status::{CheckStatus, status_label};
use crate::models::structure::StructureRecord;
use crate::models::worker::Worker;

/// One audited change.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub before: String,
    pub after: String,
}

/// Supervisor corrections of torque / checklist / notes on a stored row.
pub struct EditLogic;

impl EditLogic {
    pub fn apply(
        pool: &mut DbPool,
        editor: &Worker,
        id: i64,
        torque: Option<CheckStatus>,
        checklist: Option<CheckStatus>,
        notes: Option<String>,
    ) -> AppResult<(StructureRecord, Vec<FieldChange>)> {
        if !editor.role.is_supervisor() {
            return Err(AppError::Unauthorized(format!(
                "{} ({}) cannot edit records",
                editor.name,
                editor.role.as_str()
            )));
        }

        let (record, changes) = {
            let mut store = StructureStore::new(&mut pool.conn);
            let mut rows = store.load_all()?;

            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::NotFound(format!("structure #{id}")))?;

            let mut changes = Vec::new();

            if let Some(t) = torque
                && row.torque_status != Some(t)
            {
                changes.push(FieldChange {
                    field: "torque_status",
                    before: status_label(row.torque_status).to_string(),
                    after: t.to_string(),
                });
                row.torque_status = Some(t);
            }

            if let Some(c) = checklist
                && row.checklist_status != Some(c)
            {
                changes.push(FieldChange {
                    field: "checklist_status",
                    before: status_label(row.checklist_status).to_string(),
                    after: c.to_string(),
                });
                row.checklist_status = Some(c);
            }

            if let Some(n) = notes {
                let n = n.trim().to_string();
                if row.notes != n {
                    changes.push(FieldChange {
                        field: "notes",
                        before: row.notes.clone(),
                        after: n.clone(),
                    });
                    row.notes = n;
                }
            }

            let record = row.clone();

            if !changes.is_empty() {
                store.save_all(&rows)?;
            }

            (record, changes)
        };

        let target = record.key().label();
        for ch in &changes {
            ttlog_soft(
                &pool.conn,
                "edit",
                &target,
                &format!(
                    "{}: {} -> {} by {} ({})",
                    ch.field,
                    if ch.before.is_empty() { "--" } else { &ch.before },
                    ch.after,
                    editor.name,
                    editor.role.as_str()
                ),
            );
        }

        Ok((record, changes))
    }
}
