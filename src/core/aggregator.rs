//! Report aggregation over registered structures.
//!
//! Every table is computed against the filtered subset of rows. Group keys
//! are emitted in ascending order. Rows without a usable date are left out
//! of the date-based tables only. Empty input yields empty tables.

use crate::models::status::CheckStatus;
use crate::models::structure::StructureRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Row filters applied before any grouping.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub ct: Option<u32>,
    pub worker_name: Option<String>,
    /// Inclusive date bounds; rows without a date never match a bound.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl ReportFilter {
    pub fn matches(&self, row: &StructureRecord) -> bool {
        if let Some(ct) = self.ct
            && row.ct != ct
        {
            return false;
        }

        if let Some(name) = &self.worker_name
            && row.worker_name.trim() != name.trim()
        {
            return false;
        }

        if let Some((from, to)) = self.date_bounds {
            return matches!(row.date, Some(d) if d >= from && d <= to);
        }

        true
    }

    pub fn is_active(&self) -> bool {
        self.ct.is_some() || self.worker_name.is_some() || self.date_bounds.is_some()
    }
}

/// Which tables to compute. Tables not requested stay empty.
#[derive(Debug, Clone, Copy)]
pub struct Groupings {
    pub daily: bool,
    pub daily_complete: bool,
    pub ct_progress: bool,
    pub worker_totals: bool,
    pub status_split: bool,
    pub daily_status: bool,
    pub worker_daily: bool,
    pub ct_daily: bool,
}

impl Groupings {
    pub fn all() -> Self {
        Self {
            daily: true,
            daily_complete: true,
            ct_progress: true,
            worker_totals: true,
            status_split: true,
            daily_status: true,
            worker_daily: true,
            ct_daily: true,
        }
    }

    pub fn none() -> Self {
        Self {
            daily: false,
            daily_complete: false,
            ct_progress: false,
            worker_totals: false,
            status_split: false,
            daily_status: false,
            worker_daily: false,
            ct_daily: false,
        }
    }
}

impl Default for Groupings {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtProgress {
    pub ct: u32,
    pub total: usize,
    pub complete: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerTotal {
    pub worker_name: String,
    pub count: usize,
    /// Share of the busiest worker's count, for bar widths.
    pub bar_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCount {
    pub ok: usize,
    pub not_ok: usize,
    /// Non-null status values.
    pub total: usize,
    pub ok_percentage: u32,
    pub not_ok_percentage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusSplit {
    pub torque: StatusCount,
    pub checklist: StatusCount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStatus {
    pub date: NaiveDate,
    pub total: usize,
    pub torque_ok: usize,
    pub torque_not_ok: usize,
    pub checklist_ok: usize,
    pub checklist_not_ok: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerDaily {
    pub worker_id: i64,
    pub worker_name: String,
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtDaily {
    pub ct: u32,
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTables {
    /// Rows that passed the filter.
    pub total_rows: usize,
    pub daily_count: Vec<DailyCount>,
    pub daily_complete: Vec<DailyCount>,
    pub ct_progress: Vec<CtProgress>,
    pub worker_totals: Vec<WorkerTotal>,
    pub status_split: StatusSplit,
    pub daily_status: Vec<DailyStatus>,
    pub worker_daily: Vec<WorkerDaily>,
    pub ct_daily: Vec<CtDaily>,
}

impl ReportTables {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

/// Build the report tables. The input slice is never modified.
pub fn aggregate(
    rows: &[StructureRecord],
    groupings: Groupings,
    filter: &ReportFilter,
) -> ReportTables {
    let subset: Vec<&StructureRecord> = rows.iter().filter(|r| filter.matches(r)).collect();

    let mut tables = ReportTables {
        total_rows: subset.len(),
        ..Default::default()
    };

    if groupings.daily {
        tables.daily_count = count_by_date(subset.iter().copied());
    }

    if groupings.daily_complete {
        tables.daily_complete = count_by_date(subset.iter().copied().filter(|r| r.is_complete()));
    }

    if groupings.ct_progress {
        tables.ct_progress = ct_progress(&subset);
    }

    if groupings.worker_totals {
        tables.worker_totals = worker_totals(&subset);
    }

    if groupings.status_split {
        tables.status_split = StatusSplit {
            torque: status_count(subset.iter().map(|r| r.torque_status)),
            checklist: status_count(subset.iter().map(|r| r.checklist_status)),
        };
    }

    if groupings.daily_status {
        tables.daily_status = daily_status(&subset);
    }

    if groupings.worker_daily {
        // Keyed by worker id; the first name seen for an id is shown.
        let mut map: BTreeMap<(i64, NaiveDate), (String, usize)> = BTreeMap::new();
        for r in &subset {
            if let Some(d) = r.date {
                map.entry((r.worker_id, d))
                    .or_insert_with(|| (r.worker_name.clone(), 0))
                    .1 += 1;
            }
        }
        tables.worker_daily = map
            .into_iter()
            .map(|((worker_id, date), (worker_name, count))| WorkerDaily {
                worker_id,
                worker_name,
                date,
                count,
            })
            .collect();
    }

    if groupings.ct_daily {
        let mut map: BTreeMap<(u32, NaiveDate), usize> = BTreeMap::new();
        for r in &subset {
            if let Some(d) = r.date {
                *map.entry((r.ct, d)).or_default() += 1;
            }
        }
        tables.ct_daily = map
            .into_iter()
            .map(|((ct, date), count)| CtDaily { ct, date, count })
            .collect();
    }

    tables
}

fn count_by_date<'a>(rows: impl Iterator<Item = &'a StructureRecord>) -> Vec<DailyCount> {
    let mut map: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in rows {
        if let Some(d) = r.date {
            *map.entry(d).or_default() += 1;
        }
    }
    map.into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

fn ct_progress(rows: &[&StructureRecord]) -> Vec<CtProgress> {
    let mut map: BTreeMap<u32, (usize, usize)> = BTreeMap::new();
    for r in rows {
        let entry = map.entry(r.ct).or_default();
        entry.0 += 1;
        if r.is_complete() {
            entry.1 += 1;
        }
    }

    map.into_iter()
        .map(|(ct, (total, complete))| CtProgress {
            ct,
            total,
            complete,
            percentage: round1(complete as f64 * 100.0 / total as f64),
        })
        .collect()
}

fn worker_totals(rows: &[&StructureRecord]) -> Vec<WorkerTotal> {
    let mut map: BTreeMap<String, usize> = BTreeMap::new();
    for r in rows {
        *map.entry(r.worker_name.clone()).or_default() += 1;
    }

    let max = map.values().copied().max().unwrap_or(0);

    map.into_iter()
        .map(|(worker_name, count)| WorkerTotal {
            worker_name,
            count,
            bar_percentage: if max == 0 {
                0.0
            } else {
                round1(count as f64 * 100.0 / max as f64)
            },
        })
        .collect()
}

fn status_count(values: impl Iterator<Item = Option<CheckStatus>>) -> StatusCount {
    let mut out = StatusCount::default();
    for v in values.flatten() {
        match v {
            CheckStatus::Ok => out.ok += 1,
            CheckStatus::NotOk => out.not_ok += 1,
        }
    }
    out.total = out.ok + out.not_ok;
    out.ok_percentage = percent(out.ok, out.total);
    out.not_ok_percentage = percent(out.not_ok, out.total);
    out
}

fn daily_status(rows: &[&StructureRecord]) -> Vec<DailyStatus> {
    let mut map: BTreeMap<NaiveDate, DailyStatus> = BTreeMap::new();
    for r in rows {
        let Some(date) = r.date else { continue };
        let e = map.entry(date).or_insert(DailyStatus {
            date,
            total: 0,
            torque_ok: 0,
            torque_not_ok: 0,
            checklist_ok: 0,
            checklist_not_ok: 0,
        });
        e.total += 1;
        match r.torque_status {
            Some(CheckStatus::Ok) => e.torque_ok += 1,
            Some(CheckStatus::NotOk) => e.torque_not_ok += 1,
            None => {}
        }
        match r.checklist_status {
            Some(CheckStatus::Ok) => e.checklist_ok += 1,
            Some(CheckStatus::NotOk) => e.checklist_not_ok += 1,
            None => {}
        }
    }
    map.into_values().collect()
}

/// Whole-number percentage, halves rounded to even (12.5 -> 12);
/// 0 when there is nothing to divide by.
fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64).round_ties_even() as u32
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
