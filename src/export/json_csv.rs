// src/export/json_csv.rs

use crate::core::aggregator::ReportTables;
use crate::errors::{AppError, AppResult};
use crate::export::{StructureExport, notify_export_success};
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn write_json<T: Serialize + ?Sized>(data: &T, path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

fn write_csv<T: Serialize>(rows: &[T], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    Ok(())
}

/// Records as a pretty-printed JSON array.
pub(crate) fn export_records_json(records: &[StructureExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));
    write_json(records, path)?;
    notify_export_success("JSON", path);
    Ok(())
}

/// Records as CSV, header row taken from the field names.
pub(crate) fn export_records_csv(records: &[StructureExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));
    write_csv(records, path)?;
    notify_export_success("CSV", path);
    Ok(())
}

/// Every report table in one JSON document.
pub(crate) fn export_report_json(tables: &ReportTables, path: &Path) -> AppResult<()> {
    info(format!("Exporting report to JSON: {}", path.display()));
    write_json(tables, path)?;
    notify_export_success("JSON report", path);
    Ok(())
}

/// CSV holds a single table: the daily count.
pub(crate) fn export_report_csv(tables: &ReportTables, path: &Path) -> AppResult<()> {
    info(format!("Exporting daily counts to CSV: {}", path.display()));
    write_csv(&tables.daily_count, path)?;
    notify_export_success("CSV report", path);
    Ok(())
}
