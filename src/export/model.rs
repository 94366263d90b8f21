// src/export/model.rs

use crate::core::aggregator::ReportTables;
use crate::models::status::status_label;
use crate::models::structure::StructureRecord;
use serde::Serialize;

/// Flat export row. Field order is the column order of every format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct StructureExport {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub ct: u32,
    pub field: u32,
    pub table_no: u32,
    pub torque_status: String,
    pub checklist_status: String,
    pub notes: String,
}

impl From<&StructureRecord> for StructureExport {
    fn from(r: &StructureRecord) -> Self {
        Self {
            id: r.id,
            worker_id: r.worker_id,
            worker_name: r.worker_name.clone(),
            date: r.date_str(),
            start_time: r.start_time.clone().unwrap_or_default(),
            end_time: r.end_time.clone().unwrap_or_default(),
            ct: r.ct,
            field: r.field,
            table_no: r.table_no,
            torque_status: status_label(r.torque_status).to_string(),
            checklist_status: status_label(r.checklist_status).to_string(),
            notes: r.notes.clone(),
        }
    }
}

pub(crate) const RECORD_HEADERS: [&str; 12] = [
    "id",
    "worker_id",
    "worker_name",
    "date",
    "start_time",
    "end_time",
    "ct",
    "field",
    "table_no",
    "torque_status",
    "checklist_status",
    "notes",
];

pub(crate) fn record_to_row(e: &StructureExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.worker_id.to_string(),
        e.worker_name.clone(),
        e.date.clone(),
        e.start_time.clone(),
        e.end_time.clone(),
        e.ct.to_string(),
        e.field.to_string(),
        e.table_no.to_string(),
        e.torque_status.clone(),
        e.checklist_status.clone(),
        e.notes.clone(),
    ]
}

/// One aggregate table laid out as a worksheet.
#[derive(Debug, Clone)]
pub struct ReportSheet {
    /// Worksheet name (at most 31 chars).
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Report tables in display order, one sheet each.
pub fn report_sheets(t: &ReportTables) -> Vec<ReportSheet> {
    let split = &t.status_split;

    vec![
        ReportSheet {
            name: "daily_count",
            headers: vec!["date", "count"],
            rows: t
                .daily_count
                .iter()
                .map(|d| vec![d.date.to_string(), d.count.to_string()])
                .collect(),
        },
        ReportSheet {
            name: "daily_complete",
            headers: vec!["date", "complete"],
            rows: t
                .daily_complete
                .iter()
                .map(|d| vec![d.date.to_string(), d.count.to_string()])
                .collect(),
        },
        ReportSheet {
            name: "ct_progress",
            headers: vec!["ct", "total", "complete", "percentage"],
            rows: t
                .ct_progress
                .iter()
                .map(|c| {
                    vec![
                        c.ct.to_string(),
                        c.total.to_string(),
                        c.complete.to_string(),
                        format!("{:.1}", c.percentage),
                    ]
                })
                .collect(),
        },
        ReportSheet {
            name: "worker_totals",
            headers: vec!["worker_name", "count", "bar_percentage"],
            rows: t
                .worker_totals
                .iter()
                .map(|w| {
                    vec![
                        w.worker_name.clone(),
                        w.count.to_string(),
                        format!("{:.1}", w.bar_percentage),
                    ]
                })
                .collect(),
        },
        ReportSheet {
            name: "status_split",
            headers: vec![
                "check",
                "ok",
                "not_ok",
                "total",
                "ok_percentage",
                "not_ok_percentage",
            ],
            rows: [("torque", &split.torque), ("checklist", &split.checklist)]
                .into_iter()
                .map(|(label, s)| {
                    vec![
                        label.to_string(),
                        s.ok.to_string(),
                        s.not_ok.to_string(),
                        s.total.to_string(),
                        s.ok_percentage.to_string(),
                        s.not_ok_percentage.to_string(),
                    ]
                })
                .collect(),
        },
        ReportSheet {
            name: "daily_status",
            headers: vec![
                "date",
                "total",
                "torque_ok",
                "torque_not_ok",
                "checklist_ok",
                "checklist_not_ok",
            ],
            rows: t
                .daily_status
                .iter()
                .map(|d| {
                    vec![
                        d.date.to_string(),
                        d.total.to_string(),
                        d.torque_ok.to_string(),
                        d.torque_not_ok.to_string(),
                        d.checklist_ok.to_string(),
                        d.checklist_not_ok.to_string(),
                    ]
                })
                .collect(),
        },
        ReportSheet {
            name: "worker_daily",
            headers: vec!["worker_id", "worker_name", "date", "count"],
            rows: t
                .worker_daily
                .iter()
                .map(|w| {
                    vec![
                        w.worker_id.to_string(),
                        w.worker_name.clone(),
                        w.date.to_string(),
                        w.count.to_string(),
                    ]
                })
                .collect(),
        },
        ReportSheet {
            name: "ct_daily",
            headers: vec!["ct", "date", "count"],
            rows: t
                .ct_daily
                .iter()
                .map(|c| vec![c.ct.to_string(), c.date.to_string(), c.count.to_string()])
                .collect(),
        },
    ]
}
