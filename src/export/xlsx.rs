// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{RECORD_HEADERS, ReportSheet, record_to_row};
use crate::export::{StructureExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Records export: a single styled sheet.
pub(crate) fn export_records_xlsx(records: &[StructureExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("structures").map_err(to_app_error)?;

    let rows: Vec<Vec<String>> = records.iter().map(record_to_row).collect();
    write_sheet(worksheet, &RECORD_HEADERS, &rows)?;

    workbook.save(path).map_err(to_app_error)?;
    notify_export_success("XLSX", path);
    Ok(())
}

/// Report export: one sheet per aggregate table.
pub(crate) fn export_report_xlsx(sheets: &[ReportSheet], path: &Path) -> AppResult<()> {
    info(format!("Exporting report to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).map_err(to_app_error)?;
        write_sheet(worksheet, &sheet.headers, &sheet.rows)?;
    }

    workbook.save(path).map_err(to_app_error)?;
    notify_export_success("XLSX report", path);
    Ok(())
}

/// Header row, banded body and auto column width.
fn write_sheet(worksheet: &mut Worksheet, headers: &[&str], rows: &[Vec<String>]) -> AppResult<()> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, value, band_color)?;

            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    Ok(())
}

/// Dates and times become Excel serials, numbers stay numeric, the rest is text.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        worksheet
            .write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(to_app_error)?;
        return Ok(());
    }

    if let Ok(num) = s.parse::<f64>() {
        worksheet
            .write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(to_app_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col, s, &base)
        .map_err(to_app_error)?;

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
