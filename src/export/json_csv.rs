use crate::errors::AppResult;
use crate::export::LedgerRow;
use crate::export::model::get_headers;
use std::fs;
use std::path::Path;

/// Pretty-printed JSON array.
pub(crate) fn export_json(rows: &[LedgerRow], path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json)?;
    Ok(())
}

/// CSV with a header line taken from the field names.
pub(crate) fn export_csv(rows: &[LedgerRow], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        wtr.write_record(get_headers())?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
