use crate::errors::{AppError, AppResult};
use crate::export::LedgerRow;
use crate::export::model::{get_headers, is_numeric_column};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const BAND_1: u32 = 0xEAF3FB;
const BAND_2: u32 = 0xFFFFFF;

/// Styled sheet: coloured header, frozen first row, banded rows,
/// numbers right-aligned as real numbers, columns sized to content.
pub(crate) fn export_xlsx(rows: &[LedgerRow], sheet_name: &str, path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(to_export_error)?;

    let headers = get_headers();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (row_index, ledger_row) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { BAND_1 } else { BAND_2 };

        for (col, value) in ledger_row.cells().into_iter().enumerate() {
            write_cell(worksheet, row, col, value, Color::RGB(band))?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;
    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: usize, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if is_numeric_column(col)
        && let Ok(num) = s.parse::<f64>()
    {
        let fmt = base.set_align(FormatAlign::Right).set_num_format("0.00");
        ws.write_with_format(row, col as u16, num, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    ws.write_with_format(row, col as u16, s, &base)
        .map_err(to_export_error)?;
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}
