//! Roster assignments, weekly payouts and attendance rows.

use crate::db::db_utils::{
    date_to_db, dec_to_db, get_bool, get_coded, get_date, get_decimal, get_opt_decimal, new_id,
    placeholders,
};
use crate::errors::{AppError, AppResult};
use crate::models::assignment::{LabourPayment, WeekLabourAssignment};
use crate::models::attendance::{AttendanceInput, LabourAttendance};
use crate::models::ledger::{AttendanceFact, PaymentFact};
use crate::models::payment_type::PaymentType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params, params_from_iter};

// ---------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------

pub fn map_assignment(row: &Row) -> Result<WeekLabourAssignment> {
    Ok(WeekLabourAssignment {
        id: row.get("id")?,
        week_id: row.get("week_id")?,
        labour_id: row.get("labour_id")?,
        weekly_daily_wage: get_decimal(row, "weekly_daily_wage")?,
    })
}

pub fn insert_assignment(
    conn: &Connection,
    week_id: &str,
    labour_id: &str,
    wage: Decimal,
) -> AppResult<WeekLabourAssignment> {
    let a = WeekLabourAssignment {
        id: new_id(),
        week_id: week_id.to_string(),
        labour_id: labour_id.to_string(),
        weekly_daily_wage: wage,
    };
    conn.execute(
        "INSERT INTO week_labour_assignments (id, week_id, labour_id, weekly_daily_wage)
         VALUES (?1, ?2, ?3, ?4)",
        params![a.id, a.week_id, a.labour_id, dec_to_db(&a.weekly_daily_wage)],
    )?;
    Ok(a)
}

pub fn load_assignments(conn: &Connection, week_id: &str) -> AppResult<Vec<WeekLabourAssignment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT a.* FROM week_labour_assignments a
         JOIN labours l ON l.id = a.labour_id
         WHERE a.week_id = ?1
         ORDER BY l.name ASC, a.id ASC",
    )?;
    let rows = stmt.query_map([week_id], map_assignment)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_assignment(
    conn: &Connection,
    week_id: &str,
    labour_id: &str,
) -> AppResult<Option<WeekLabourAssignment>> {
    let a = conn
        .query_row(
            "SELECT * FROM week_labour_assignments WHERE week_id = ?1 AND labour_id = ?2",
            params![week_id, labour_id],
            map_assignment,
        )
        .optional()?;
    Ok(a)
}

pub fn get_assignment(conn: &Connection, id: &str) -> AppResult<WeekLabourAssignment> {
    conn.query_row(
        "SELECT * FROM week_labour_assignments WHERE id = ?1",
        [id],
        map_assignment,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("WeekLabourAssignment", id))
}

pub fn update_assignment_wage(conn: &Connection, id: &str, wage: Decimal) -> AppResult<()> {
    conn.execute(
        "UPDATE week_labour_assignments SET weekly_daily_wage = ?1 WHERE id = ?2",
        params![dec_to_db(&wage), id],
    )?;
    Ok(())
}

pub fn delete_assignment(conn: &Connection, id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM week_labour_assignments WHERE id = ?1", [id])?;
    Ok(())
}

// ---------------------------------------------------------------
// Weekly payouts
// ---------------------------------------------------------------

pub fn map_payment(row: &Row) -> Result<LabourPayment> {
    Ok(LabourPayment {
        id: row.get("id")?,
        assignment_id: row.get("assignment_id")?,
        amount_paid: get_decimal(row, "amount_paid")?,
        payment_type: get_coded(row, "payment_type", PaymentType::from_db_str)?,
    })
}

/// One payout per assignment: a second call replaces amount and type.
pub fn upsert_payment(
    conn: &Connection,
    assignment_id: &str,
    amount: Decimal,
    payment_type: PaymentType,
) -> AppResult<LabourPayment> {
    conn.execute(
        "INSERT INTO labour_payments (id, assignment_id, amount_paid, payment_type)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(assignment_id) DO UPDATE
         SET amount_paid = excluded.amount_paid, payment_type = excluded.payment_type",
        params![
            new_id(),
            assignment_id,
            dec_to_db(&amount),
            payment_type.to_db_str()
        ],
    )?;

    let p = conn.query_row(
        "SELECT * FROM labour_payments WHERE assignment_id = ?1",
        [assignment_id],
        map_payment,
    )?;
    Ok(p)
}

pub fn delete_payment(conn: &Connection, assignment_id: &str) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM labour_payments WHERE assignment_id = ?1",
        [assignment_id],
    )?;
    Ok(n > 0)
}

pub fn load_payments_for_week(conn: &Connection, week_id: &str) -> AppResult<Vec<LabourPayment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT p.* FROM labour_payments p
         JOIN week_labour_assignments a ON a.id = p.assignment_id
         WHERE a.week_id = ?1",
    )?;
    let rows = stmt.query_map([week_id], map_payment)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// Attendance rows
// ---------------------------------------------------------------

pub fn map_attendance(row: &Row) -> Result<LabourAttendance> {
    Ok(LabourAttendance {
        id: row.get("id")?,
        daily_entry_id: row.get("daily_entry_id")?,
        labour_id: row.get("labour_id")?,
        is_present: get_bool(row, "is_present")?,
        advance_taken: get_decimal(row, "advance_taken")?,
        payment_type: get_coded(row, "payment_type", PaymentType::from_db_str)?,
        multiplier: get_decimal(row, "multiplier")?,
    })
}

pub fn load_attendance_for_entry(
    conn: &Connection,
    entry_id: &str,
) -> AppResult<Vec<LabourAttendance>> {
    let mut stmt = conn.prepare_cached(
        "SELECT a.* FROM labour_attendance a
         JOIN labours l ON l.id = a.labour_id
         WHERE a.daily_entry_id = ?1
         ORDER BY l.name ASC, a.labour_id ASC",
    )?;
    let rows = stmt.query_map([entry_id], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Get-or-create a default row for (entry, labour). Returns true if created.
pub fn ensure_attendance(conn: &Connection, entry_id: &str, labour_id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO labour_attendance
            (id, daily_entry_id, labour_id, is_present, advance_taken, payment_type, multiplier)
         VALUES (?1, ?2, ?3, 0, '0', 'bank', '1')",
    )?;
    let n = stmt.execute(params![new_id(), entry_id, labour_id])?;
    Ok(n > 0)
}

pub fn insert_attendance(conn: &Connection, entry_id: &str, row: &AttendanceInput) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO labour_attendance
            (id, daily_entry_id, labour_id, is_present, advance_taken, payment_type, multiplier)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    stmt.execute(params![
        new_id(),
        entry_id,
        row.labour_id,
        row.is_present as i64,
        dec_to_db(&row.advance_taken),
        row.payment_type.to_db_str(),
        dec_to_db(&row.multiplier),
    ])?;
    Ok(())
}

pub fn delete_attendance_for_entry(conn: &Connection, entry_id: &str) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM labour_attendance WHERE daily_entry_id = ?1",
        [entry_id],
    )?;
    Ok(n)
}

/// Drop every attendance row of `labour_ids` across the days of `week_id`.
pub fn delete_attendance_for_labours(
    conn: &Connection,
    week_id: &str,
    labour_ids: &[String],
) -> AppResult<usize> {
    if labour_ids.is_empty() {
        return Ok(0);
    }

    let sql = format!(
        "DELETE FROM labour_attendance
         WHERE daily_entry_id IN (SELECT id FROM daily_entries WHERE week_id = ?)
           AND labour_id IN ({})",
        placeholders(labour_ids.len())
    );

    let mut binds: Vec<&dyn ToSql> = Vec::with_capacity(labour_ids.len() + 1);
    binds.push(&week_id);
    for id in labour_ids {
        binds.push(id);
    }

    let n = conn.execute(&sql, params_from_iter(binds))?;
    Ok(n)
}

/// Number of attendance rows per labourer in a week (used to check the sync invariant).
pub fn count_attendance_by_labour(
    conn: &Connection,
    week_id: &str,
) -> AppResult<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT a.labour_id, COUNT(*) FROM labour_attendance a
         JOIN daily_entries d ON d.id = a.daily_entry_id
         WHERE d.week_id = ?1
         GROUP BY a.labour_id
         ORDER BY a.labour_id",
    )?;
    let rows = stmt.query_map([week_id], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------
// Ledger facts
// ---------------------------------------------------------------

fn map_fact(row: &Row) -> Result<AttendanceFact> {
    Ok(AttendanceFact {
        labour_id: row.get("labour_id")?,
        week_id: row.get("week_id")?,
        date: get_date(row, "date")?,
        is_present: get_bool(row, "is_present")?,
        advance_taken: get_decimal(row, "advance_taken")?,
        multiplier: get_decimal(row, "multiplier")?,
        wage: get_opt_decimal(row, "wage")?,
    })
}

const FACT_SELECT: &str = "
    SELECT a.labour_id, d.week_id, d.date, a.is_present, a.advance_taken, a.multiplier,
           w.weekly_daily_wage AS wage
    FROM labour_attendance a
    JOIN daily_entries d ON d.id = a.daily_entry_id
    LEFT JOIN week_labour_assignments w
           ON w.week_id = d.week_id AND w.labour_id = a.labour_id";

/// Attendance of `labour_ids` on every day strictly before `before`,
/// each row carrying the wage of its own week.
pub fn load_history_facts(
    conn: &Connection,
    labour_ids: &[String],
    before: &NaiveDate,
) -> AppResult<Vec<AttendanceFact>> {
    if labour_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "{FACT_SELECT}
         WHERE d.date < ? AND a.labour_id IN ({})",
        placeholders(labour_ids.len())
    );

    let before_str = date_to_db(before);
    let mut binds: Vec<&dyn ToSql> = Vec::with_capacity(labour_ids.len() + 1);
    binds.push(&before_str);
    for id in labour_ids {
        binds.push(id);
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(binds), map_fact)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Attendance rows of one week.
pub fn load_week_facts(conn: &Connection, week_id: &str) -> AppResult<Vec<AttendanceFact>> {
    let sql = format!("{FACT_SELECT} WHERE d.week_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([week_id], map_fact)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Weekly payouts of `labour_ids` for weeks starting strictly before `before`.
pub fn load_history_payments(
    conn: &Connection,
    labour_ids: &[String],
    before: &NaiveDate,
) -> AppResult<Vec<PaymentFact>> {
    if labour_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT a.labour_id, wk.start_date, p.amount_paid
         FROM labour_payments p
         JOIN week_labour_assignments a ON a.id = p.assignment_id
         JOIN weeks wk ON wk.id = a.week_id
         WHERE wk.start_date < ? AND a.labour_id IN ({})",
        placeholders(labour_ids.len())
    );

    let before_str = date_to_db(before);
    let mut binds: Vec<&dyn ToSql> = Vec::with_capacity(labour_ids.len() + 1);
    binds.push(&before_str);
    for id in labour_ids {
        binds.push(id);
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(binds), |row| {
        Ok(PaymentFact {
            labour_id: row.get("labour_id")?,
            week_start: get_date(row, "start_date")?,
            amount: get_decimal(row, "amount_paid")?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
