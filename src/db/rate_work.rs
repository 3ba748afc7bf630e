//! Piecework jobs and the shared `payments` table.

use crate::db::db_utils::{date_to_db, dec_to_db, get_bool, get_coded, get_date, get_decimal};
use crate::errors::{AppError, AppResult};
use crate::models::rate_work::{Payment, PaymentKind, RateWork};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_rate_work(row: &Row) -> Result<RateWork> {
    Ok(RateWork {
        id: row.get("id")?,
        labour_id: row.get("labour_id")?,
        name: row.get("name")?,
        quantity: get_decimal(row, "quantity")?,
        unit: row.get("unit")?,
        cost_per_unit: get_decimal(row, "cost_per_unit")?,
        is_completed: get_bool(row, "is_completed")?,
        date_created: get_date(row, "date_created")?,
    })
}

pub fn insert_rate_work(conn: &Connection, w: &RateWork) -> AppResult<()> {
    conn.execute(
        "INSERT INTO rate_works (id, labour_id, name, quantity, unit, cost_per_unit,
                                 is_completed, date_created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            w.id,
            w.labour_id,
            w.name,
            dec_to_db(&w.quantity),
            w.unit,
            dec_to_db(&w.cost_per_unit),
            w.is_completed as i64,
            date_to_db(&w.date_created),
        ],
    )?;
    Ok(())
}

pub fn update_rate_work(conn: &Connection, w: &RateWork) -> AppResult<()> {
    conn.execute(
        "UPDATE rate_works
         SET name = ?1, quantity = ?2, unit = ?3, cost_per_unit = ?4, is_completed = ?5
         WHERE id = ?6",
        params![
            w.name,
            dec_to_db(&w.quantity),
            w.unit,
            dec_to_db(&w.cost_per_unit),
            w.is_completed as i64,
            w.id,
        ],
    )?;
    Ok(())
}

pub fn get_rate_work(conn: &Connection, id: &str) -> AppResult<RateWork> {
    conn.query_row("SELECT * FROM rate_works WHERE id = ?1", [id], map_rate_work)
        .optional()?
        .ok_or_else(|| AppError::not_found("RateWork", id))
}

pub fn load_rate_works(conn: &Connection, labour_id: &str) -> AppResult<Vec<RateWork>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM rate_works WHERE labour_id = ?1 ORDER BY date_created ASC, name ASC",
    )?;
    let rows = stmt.query_map([labour_id], map_rate_work)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_rate_work(conn: &Connection, id: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM rate_works WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("RateWork", id));
    }
    Ok(())
}

pub fn map_payment(row: &Row) -> Result<Payment> {
    Ok(Payment {
        id: row.get("id")?,
        kind: get_coded(row, "kind", PaymentKind::from_db_str)?,
        labour_id: row.get("labour_id")?,
        amount: get_decimal(row, "amount")?,
        note: row.get("note")?,
        date_created: get_date(row, "date_created")?,
    })
}

pub fn insert_payment(conn: &Connection, p: &Payment) -> AppResult<()> {
    conn.execute(
        "INSERT INTO payments (id, kind, labour_id, amount, note, date_created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.id,
            p.kind.to_db_str(),
            p.labour_id,
            dec_to_db(&p.amount),
            p.note,
            date_to_db(&p.date_created),
        ],
    )?;
    Ok(())
}

pub fn load_payments(
    conn: &Connection,
    kind: PaymentKind,
    labour_id: &str,
) -> AppResult<Vec<Payment>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM payments WHERE kind = ?1 AND labour_id = ?2
         ORDER BY date_created ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![kind.to_db_str(), labour_id], map_payment)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete a payment only if it belongs to `labour_id`.
pub fn delete_payment(conn: &Connection, labour_id: &str, payment_id: &str) -> AppResult<()> {
    let n = conn.execute(
        "DELETE FROM payments WHERE id = ?1 AND labour_id = ?2",
        params![payment_id, labour_id],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Payment", payment_id));
    }
    Ok(())
}
