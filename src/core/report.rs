//! Console rendering of structure listings and aggregate reports.

use crate::core::aggregator::{Groupings, ReportFilter, ReportTables, aggregate};
use crate::db::pool::DbPool;
use crate::db::repository::Repository;
use crate::db::structures::StructureStore;
use crate::errors::AppResult;
use crate::models::status::status_label;
use crate::models::structure::StructureRecord;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_percentage, colorize_optional, colorize_status};
use crate::utils::formatting::{bar, bold};
use crate::utils::table::Table;

const BAR_WIDTH: usize = 30;

pub struct ReportLogic;

impl ReportLogic {
    /// Rows matching `filter`, in id order.
    pub fn load_filtered(
        pool: &mut DbPool,
        filter: &ReportFilter,
    ) -> AppResult<Vec<StructureRecord>> {
        let rows = StructureStore::new(&mut pool.conn).load_all()?;
        Ok(rows.into_iter().filter(|r| filter.matches(r)).collect())
    }

    pub fn build(pool: &mut DbPool, filter: &ReportFilter) -> AppResult<ReportTables> {
        let rows = StructureStore::new(&mut pool.conn).load_all()?;
        Ok(aggregate(&rows, Groupings::all(), filter))
    }

    pub fn print_list(rows: &[StructureRecord], separator: &str) {
        if rows.is_empty() {
            warning("No structures registered for the selected filters.");
            return;
        }

        let mut table = Table::with_headers(&[
            "ID", "DATE", "WORKER", "CT", "FIELD", "TABLE", "START", "END", "TORQUE",
            "CHECKLIST", "NOTES",
        ]);

        for r in rows {
            table.add_row(vec![
                r.id.to_string(),
                colorize_optional(&r.date_str()),
                r.worker_name.clone(),
                r.ct.to_string(),
                r.field.to_string(),
                r.table_no.to_string(),
                colorize_optional(r.start_time.as_deref().unwrap_or("--:--")),
                colorize_optional(r.end_time.as_deref().unwrap_or("--:--")),
                colorize_status(status_label(r.torque_status)),
                colorize_status(status_label(r.checklist_status)),
                r.notes.clone(),
            ]);
        }

        print!("{}", table.render(separator));
        println!("\n{} structure(s)", rows.len());
    }

    pub fn print_report(tables: &ReportTables, filter: &ReportFilter, separator: &str) {
        if filter.is_active() {
            println!("{}", bold("Filtered report"));
        }

        if tables.is_empty() {
            warning("No structures match the selected filters.");
            return;
        }

        println!("Total structures: {}\n", bold(&tables.total_rows.to_string()));

        header("Structures per day");
        let mut t = Table::with_headers(&["DATE", "COUNT"]);
        for d in &tables.daily_count {
            t.add_row(vec![d.date.to_string(), d.count.to_string()]);
        }
        print!("{}", t.render(separator));

        header("Completed structures per day (torque OK + checklist OK)");
        if tables.daily_complete.is_empty() {
            println!("  none");
        } else {
            let mut t = Table::with_headers(&["DATE", "COMPLETE"]);
            for d in &tables.daily_complete {
                t.add_row(vec![d.date.to_string(), d.count.to_string()]);
            }
            print!("{}", t.render(separator));
        }

        header("Progress per CT");
        let mut t = Table::with_headers(&["CT", "TOTAL", "COMPLETE", "%"]);
        for c in &tables.ct_progress {
            let color = color_for_percentage(c.percentage);
            t.add_row(vec![
                c.ct.to_string(),
                c.total.to_string(),
                c.complete.to_string(),
                format!("{color}{:.1}{RESET}", c.percentage),
            ]);
        }
        print!("{}", t.render(separator));

        header("Structures per worker");
        let mut t = Table::with_headers(&["WORKER", "COUNT", ""]);
        for w in &tables.worker_totals {
            t.add_row(vec![
                w.worker_name.clone(),
                w.count.to_string(),
                bar(w.bar_percentage, BAR_WIDTH),
            ]);
        }
        print!("{}", t.render(separator));

        header("Torque / checklist status");
        let mut t = Table::with_headers(&["CHECK", "OK", "NOT_OK", "TOTAL", "OK %", "NOT_OK %"]);
        for (label, s) in [
            ("torque", &tables.status_split.torque),
            ("checklist", &tables.status_split.checklist),
        ] {
            t.add_row(vec![
                label.to_string(),
                s.ok.to_string(),
                s.not_ok.to_string(),
                s.total.to_string(),
                format!("{}%", s.ok_percentage),
                format!("{}%", s.not_ok_percentage),
            ]);
        }
        print!("{}", t.render(separator));

        header("Daily status breakdown");
        let mut t = Table::with_headers(&[
            "DATE",
            "TOTAL",
            "TORQUE OK",
            "TORQUE NOT_OK",
            "CHECKLIST OK",
            "CHECKLIST NOT_OK",
        ]);
        for d in &tables.daily_status {
            t.add_row(vec![
                d.date.to_string(),
                d.total.to_string(),
                d.torque_ok.to_string(),
                d.torque_not_ok.to_string(),
                d.checklist_ok.to_string(),
                d.checklist_not_ok.to_string(),
            ]);
        }
        print!("{}", t.render(separator));

        header("Structures per worker and day");
        let mut t = Table::with_headers(&["ID", "WORKER", "DATE", "COUNT"]);
        for w in &tables.worker_daily {
            t.add_row(vec![
                w.worker_id.to_string(),
                w.worker_name.clone(),
                w.date.to_string(),
                w.count.to_string(),
            ]);
        }
        print!("{}", t.render(separator));

        header("Structures per CT and day");
        let mut t = Table::with_headers(&["CT", "DATE", "COUNT"]);
        for c in &tables.ct_daily {
            t.add_row(vec![c.ct.to_string(), c.date.to_string(), c.count.to_string()]);
        }
        print!("{}", t.render(separator));
    }
}
