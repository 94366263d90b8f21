// src/export/logic.rs

use crate::core::aggregator::{Groupings, ReportFilter, aggregate};
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::db::structures::StructureStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{
    export_records_csv, export_records_json, export_report_csv, export_report_json,
};
use crate::export::model::{StructureExport, report_sheets};
use crate::export::xlsx::{export_records_xlsx, export_report_xlsx};
use crate::export::{ExportFormat, ExportTarget};
use crate::ui::messages::warning;
use std::path::Path;

/// High level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the rows selected by `filter`, either as records or as the
    /// aggregate report.
    ///
    /// - `file` must be an absolute path
    /// - an existing file is overwritten only with `force` or after confirmation
    /// - an empty selection writes nothing
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        what: ExportTarget,
        file: &str,
        filter: &ReportFilter,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let rows = StructureStore::new(&mut pool.conn).load_all()?;

        match what {
            ExportTarget::Records => {
                let records: Vec<StructureExport> = rows
                    .iter()
                    .filter(|r| filter.matches(r))
                    .map(StructureExport::from)
                    .collect();

                if records.is_empty() {
                    warning("No structures found for the selected filters.");
                    return Ok(());
                }

                ensure_writable(path, force)?;

                match format {
                    ExportFormat::Xlsx => export_records_xlsx(&records, path)?,
                    ExportFormat::Csv => export_records_csv(&records, path)?,
                    ExportFormat::Json => export_records_json(&records, path)?,
                }
            }
            ExportTarget::Report => {
                let tables = aggregate(&rows, Groupings::all(), filter);

                if tables.is_empty() {
                    warning("No structures found for the selected filters.");
                    return Ok(());
                }

                ensure_writable(path, force)?;

                match format {
                    ExportFormat::Xlsx => export_report_xlsx(&report_sheets(&tables), path)?,
                    ExportFormat::Csv => export_report_csv(&tables, path)?,
                    ExportFormat::Json => export_report_json(&tables, path)?,
                }
            }
        }

        Ok(())
    }
}
