//! Column conversion helpers shared by the query modules.
//!
//! Dates are stored as `YYYY-MM-DD` TEXT, decimals as canonical TEXT and
//! booleans as 0/1 INTEGER.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::Row;
use rusqlite::types::Type;
use std::str::FromStr;

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn date_to_db(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn dec_to_db(d: &Decimal) -> String {
    d.normalize().to_string()
}

fn conversion_error(col: &str, value: &str, what: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        Type::Text,
        Box::new(std::io::Error::other(format!(
            "column '{}': invalid {} '{}'",
            col, what, value
        ))),
    )
}

pub fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(col)?;
    NaiveDate::parse_from_str(&s, DATE_FMT).map_err(|_| conversion_error(col, &s, "date"))
}

pub fn get_decimal(row: &Row, col: &str) -> rusqlite::Result<Decimal> {
    let s: String = row.get(col)?;
    Decimal::from_str(&s).map_err(|_| conversion_error(col, &s, "decimal"))
}

/// Like [`get_decimal`] but NULL (e.g. from a LEFT JOIN) becomes `None`.
pub fn get_opt_decimal(row: &Row, col: &str) -> rusqlite::Result<Option<Decimal>> {
    match row.get::<_, Option<String>>(col)? {
        Some(s) => Decimal::from_str(&s)
            .map(Some)
            .map_err(|_| conversion_error(col, &s, "decimal")),
        None => Ok(None),
    }
}

pub fn get_bool(row: &Row, col: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(col)? != 0)
}

/// Parse a coded enum column through its `from_db_str`.
pub fn get_coded<T>(row: &Row, col: &str, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let s: String = row.get(col)?;
    parse(&s).ok_or_else(|| conversion_error(col, &s, "code"))
}

/// `?, ?, ?` for an IN (...) list of `n` items.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
