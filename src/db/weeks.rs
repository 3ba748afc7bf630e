//! Weeks and their daily entries.

use crate::db::db_utils::{date_to_db, get_bool, get_date, new_id};
use crate::errors::{AppError, AppResult};
use crate::models::week::{DailyEntry, Week};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_week(row: &Row) -> Result<Week> {
    Ok(Week {
        id: row.get("id")?,
        site_id: row.get("site_id")?,
        start_date: get_date(row, "start_date")?,
        admin_unlocked: get_bool(row, "admin_unlocked")?,
    })
}

pub fn map_entry(row: &Row) -> Result<DailyEntry> {
    Ok(DailyEntry {
        id: row.get("id")?,
        week_id: row.get("week_id")?,
        date: get_date(row, "date")?,
        admin_unlocked: get_bool(row, "admin_unlocked")?,
        is_saved: get_bool(row, "is_saved")?,
    })
}

pub fn insert_week(conn: &Connection, week: &Week) -> AppResult<()> {
    conn.execute(
        "INSERT INTO weeks (id, site_id, start_date, admin_unlocked)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            week.id,
            week.site_id,
            date_to_db(&week.start_date),
            week.admin_unlocked as i64
        ],
    )?;
    Ok(())
}

/// Insert one daily entry per date; returns them in date order.
pub fn insert_entries(
    conn: &Connection,
    week_id: &str,
    dates: &[NaiveDate],
) -> AppResult<Vec<DailyEntry>> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO daily_entries (id, week_id, date, admin_unlocked, is_saved)
         VALUES (?1, ?2, ?3, 0, 0)",
    )?;

    let mut out = Vec::with_capacity(dates.len());
    for d in dates {
        let entry = DailyEntry {
            id: new_id(),
            week_id: week_id.to_string(),
            date: *d,
            admin_unlocked: false,
            is_saved: false,
        };
        stmt.execute(params![entry.id, entry.week_id, date_to_db(&entry.date)])?;
        out.push(entry);
    }
    Ok(out)
}

pub fn week_exists(conn: &Connection, site_id: &str, start_date: &NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM weeks WHERE site_id = ?1 AND start_date = ?2")?;
    Ok(stmt.exists(params![site_id, date_to_db(start_date)])?)
}

pub fn find_week(conn: &Connection, id: &str) -> AppResult<Option<Week>> {
    let week = conn
        .query_row("SELECT * FROM weeks WHERE id = ?1", [id], map_week)
        .optional()?;
    Ok(week)
}

pub fn get_week(conn: &Connection, id: &str) -> AppResult<Week> {
    find_week(conn, id)?.ok_or_else(|| AppError::not_found("Week", id))
}

pub fn load_weeks(conn: &Connection, site_id: &str) -> AppResult<Vec<Week>> {
    let mut stmt =
        conn.prepare("SELECT * FROM weeks WHERE site_id = ?1 ORDER BY start_date DESC")?;
    let rows = stmt.query_map([site_id], map_week)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_week_unlocked(conn: &Connection, id: &str, unlocked: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE weeks SET admin_unlocked = ?1 WHERE id = ?2",
        params![unlocked as i64, id],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Week", id));
    }
    Ok(())
}

pub fn delete_week(conn: &Connection, id: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM weeks WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Week", id));
    }
    Ok(())
}

pub fn load_entries(conn: &Connection, week_id: &str) -> AppResult<Vec<DailyEntry>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM daily_entries WHERE week_id = ?1 ORDER BY date ASC")?;
    let rows = stmt.query_map([week_id], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_entry(conn: &Connection, id: &str) -> AppResult<Option<DailyEntry>> {
    let entry = conn
        .query_row("SELECT * FROM daily_entries WHERE id = ?1", [id], map_entry)
        .optional()?;
    Ok(entry)
}

pub fn get_entry(conn: &Connection, id: &str) -> AppResult<DailyEntry> {
    find_entry(conn, id)?.ok_or_else(|| AppError::not_found("DailyEntry", id))
}

pub fn find_entry_by_date(
    conn: &Connection,
    week_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<DailyEntry>> {
    let entry = conn
        .query_row(
            "SELECT * FROM daily_entries WHERE week_id = ?1 AND date = ?2",
            params![week_id, date_to_db(date)],
            map_entry,
        )
        .optional()?;
    Ok(entry)
}

pub fn update_entry_state(conn: &Connection, entry: &DailyEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE daily_entries SET admin_unlocked = ?1, is_saved = ?2 WHERE id = ?3",
        params![entry.admin_unlocked as i64, entry.is_saved as i64, entry.id],
    )?;
    Ok(())
}
