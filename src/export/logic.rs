use crate::core::ledger::LedgerLogic;
use crate::db::weeks::get_week;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::LedgerRow;
use crate::export::xlsx::export_xlsx;
use rusqlite::Connection;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the ledger of `week_id`, one row per rostered labourer.
    /// Returns the number of rows written.
    pub fn export_week(
        conn: &Connection,
        week_id: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let week = get_week(conn, week_id)?;
        let rows: Vec<LedgerRow> = LedgerLogic::week_balances(conn, &week)?
            .iter()
            .map(|b| LedgerRow::from_balance(&week, b))
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &format!("Week {}", week.start_date), path)?,
        }

        tracing::info!(
            week = %week_id,
            format = format.as_str(),
            rows = rows.len(),
            path = %path.display(),
            "week ledger exported"
        );
        Ok(rows.len())
    }
}
