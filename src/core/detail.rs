use crate::core::ledger::LedgerLogic;
use crate::core::roster::reconcile;
use crate::db::attendance::load_attendance_for_entry;
use crate::db::pool::DbPool;
use crate::db::weeks::{get_entry, get_week, load_entries};
use crate::errors::AppResult;
use crate::models::week::{DailyEntry, Week};
use crate::models::week_detail::{DayDetail, WeekDetail};
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct DetailLogic;

fn day_of(conn: &Connection, week: &Week, entry: DailyEntry, today: NaiveDate) -> AppResult<DayDetail> {
    let attendance = load_attendance_for_entry(conn, &entry.id)?;
    let is_editable = entry.is_editable_on(today);
    Ok(DayDetail {
        entry,
        is_editable,
        week_locked: !week.is_editable(),
        attendance,
    })
}

impl DetailLogic {
    /// Full read model of a week: days with their attendance and the
    /// ledger of every rostered labourer.
    ///
    /// Missing attendance rows are created first, so this takes the write
    /// lock briefly.
    pub fn week_detail(pool: &mut DbPool, week_id: &str, today: NaiveDate) -> AppResult<WeekDetail> {
        let tx = pool.write_tx()?;
        let week = get_week(&tx, week_id)?;
        reconcile(&tx, week_id)?;

        let mut days = Vec::new();
        for entry in load_entries(&tx, week_id)? {
            days.push(day_of(&tx, &week, entry, today)?);
        }
        let labours = LedgerLogic::week_balances(&tx, &week)?;
        tx.commit()?;

        tracing::debug!(week = %week_id, days = days.len(), labours = labours.len(), "week detail");
        Ok(WeekDetail {
            end_date: week.end_date(),
            week,
            days,
            labours,
        })
    }

    pub fn day_detail(conn: &Connection, entry_id: &str, today: NaiveDate) -> AppResult<DayDetail> {
        let entry = get_entry(conn, entry_id)?;
        let week = get_week(conn, &entry.week_id)?;
        day_of(conn, &week, entry, today)
    }
}
