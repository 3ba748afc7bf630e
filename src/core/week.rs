use crate::db::db_utils::new_id;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::get_site;
use crate::db::weeks::{
    delete_week, get_week, insert_entries, insert_week, load_weeks, set_week_unlocked, week_exists,
};
use crate::errors::{AppError, AppResult};
use crate::models::week::Week;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct WeekLogic;

impl WeekLogic {
    /// Create a week and its seven daily entries in one transaction.
    ///
    /// The start date must be a Saturday and (site, start_date) must be
    /// new. A concurrent writer that slips in between the pre-check and
    /// the insert surfaces as `Conflict` from the unique index.
    pub fn create(pool: &mut DbPool, site_id: &str, start_date: NaiveDate) -> AppResult<Week> {
        Week::check_start_date(start_date)?;

        let tx = pool.write_tx()?;
        get_site(&tx, site_id)?;

        if week_exists(&tx, site_id, &start_date)? {
            return Err(AppError::validation(
                "start_date",
                format!("a week starting {} already exists for this site", start_date),
            ));
        }

        let week = Week {
            id: new_id(),
            site_id: site_id.to_string(),
            start_date,
            admin_unlocked: true,
        };
        insert_week(&tx, &week)?;
        let entries = insert_entries(&tx, &week.id, &Week::days_from(start_date))?;

        audit(
            &tx,
            "week_add",
            &week.id,
            &format!("Week {} → {} ({} days)", start_date, week.end_date(), entries.len()),
        )?;
        tx.commit()?;

        tracing::info!(week = %week.id, site = %site_id, %start_date, "week created");
        Ok(week)
    }

    /// Weeks of a site, newest first.
    pub fn list(conn: &Connection, site_id: &str) -> AppResult<Vec<Week>> {
        get_site(conn, site_id)?;
        load_weeks(conn, site_id)
    }

    pub fn show(conn: &Connection, week_id: &str) -> AppResult<Week> {
        get_week(conn, week_id)
    }

    /// Delete a week; days, roster, attendance and payouts go with it.
    pub fn delete(pool: &mut DbPool, week_id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        let week = get_week(&tx, week_id)?;
        delete_week(&tx, week_id)?;
        audit(
            &tx,
            "week_del",
            week_id,
            &format!("Deleted week starting {}", week.start_date),
        )?;
        tx.commit()?;

        tracing::warn!(week = %week_id, "week deleted");
        Ok(())
    }

    /// Lock (`locked = true`) or reopen a week.
    pub fn set_locked(pool: &mut DbPool, week_id: &str, locked: bool) -> AppResult<Week> {
        let tx = pool.write_tx()?;
        set_week_unlocked(&tx, week_id, !locked)?;
        let op = if locked { "week_lock" } else { "week_unlock" };
        audit(&tx, op, week_id, "")?;
        let week = get_week(&tx, week_id)?;
        tx.commit()?;

        tracing::info!(week = %week_id, locked, "week lock changed");
        Ok(week)
    }
}
