use crate::db::attendance::{
    delete_attendance_for_entry, ensure_attendance, insert_attendance, load_assignments,
};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::weeks::{get_entry, get_week, update_entry_state};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceInput;
use crate::models::week::DailyEntry;
use crate::utils::money::{MAX_AMOUNT, check_amount, check_multiplier};
use chrono::NaiveDate;
use std::collections::HashSet;

pub struct AttendanceLogic;

/// Check a submission against the week's roster and normalise amounts.
fn validate_rows(rows: &[AttendanceInput], roster: &HashSet<String>) -> AppResult<Vec<AttendanceInput>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());

    for r in rows {
        if !seen.insert(r.labour_id.as_str()) {
            return Err(AppError::validation(
                "labour_id",
                format!("{} appears more than once", r.labour_id),
            ));
        }
        if !roster.contains(&r.labour_id) {
            return Err(AppError::validation(
                "labour_id",
                format!("{} is not on this week's roster", r.labour_id),
            ));
        }
        let advance_taken = check_amount("advance_taken", r.advance_taken, MAX_AMOUNT)?;
        let multiplier = check_multiplier(r.multiplier)?;

        out.push(AttendanceInput {
            advance_taken,
            multiplier,
            ..r.clone()
        });
    }
    Ok(out)
}

impl AttendanceLogic {
    /// Save (or admin-reopen) one day's attendance.
    ///
    /// A normal save needs the day to be editable today and the week to be
    /// open; it marks the day saved, which closes it. With
    /// `admin_unlocked` both checks are bypassed and the day is left open
    /// for further edits. An empty `rows` slice only changes the day state.
    pub fn submit(
        pool: &mut DbPool,
        entry_id: &str,
        rows: &[AttendanceInput],
        admin_unlocked: bool,
        today: NaiveDate,
    ) -> AppResult<DailyEntry> {
        let tx = pool.write_tx()?;
        let mut entry = get_entry(&tx, entry_id)?;
        let week = get_week(&tx, &entry.week_id)?;

        if !admin_unlocked {
            if !week.is_editable() {
                return Err(AppError::NotEditable(format!(
                    "week starting {} is locked",
                    week.start_date
                )));
            }
            if !entry.is_editable_on(today) {
                return Err(AppError::NotEditable(format!(
                    "{} can no longer be edited",
                    entry.date
                )));
            }
        }

        let mut replaced = 0;
        if !rows.is_empty() {
            let roster: HashSet<String> = load_assignments(&tx, &week.id)?
                .into_iter()
                .map(|a| a.labour_id)
                .collect();
            let rows = validate_rows(rows, &roster)?;

            delete_attendance_for_entry(&tx, &entry.id)?;
            for r in &rows {
                insert_attendance(&tx, &entry.id, r)?;
            }
            replaced = rows.len();

            // rostered but not submitted: back to defaults
            for labour_id in &roster {
                ensure_attendance(&tx, &entry.id, labour_id)?;
            }
        }

        if admin_unlocked {
            entry.admin_unlocked = true;
            entry.is_saved = false;
        } else {
            entry.admin_unlocked = false;
            entry.is_saved = true;
        }
        update_entry_state(&tx, &entry)?;

        let op = if admin_unlocked { "day_unlock" } else { "day_save" };
        audit(
            &tx,
            op,
            &entry.id,
            &format!("{}: {} rows", entry.date, replaced),
        )?;
        tx.commit()?;

        tracing::info!(
            entry = %entry.id,
            date = %entry.date,
            rows = replaced,
            admin_unlocked,
            "attendance submitted"
        );
        Ok(entry)
    }
}
