use crate::db::db_utils::DATE_FMT;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse `YYYY-MM-DD`, or the words `today` / `yesterday`.
pub fn parse_date(field: &str, s: &str) -> AppResult<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today()),
        "yesterday" => today()
            .pred_opt()
            .ok_or_else(|| AppError::validation(field, "date out of range")),
        other => NaiveDate::parse_from_str(other, DATE_FMT).map_err(|_| {
            AppError::validation(field, format!("'{}' is not a YYYY-MM-DD date", s))
        }),
    }
}

/// clap `value_parser` adapter.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date("date", s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_words() {
        assert_eq!(
            parse_date("d", "2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(parse_date("d", "Today").unwrap(), today());
        assert!(parse_date("d", "01/03/2025").is_err());
    }
}
