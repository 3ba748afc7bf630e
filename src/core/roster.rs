//! Week rosters and the attendance rows that shadow them.
//!
//! Every assignment of a week owns exactly one attendance row per day of
//! that week. The `sync_*` helpers restore this after a roster change and
//! must run on the same transaction as the change itself.

use crate::db::attendance::{
    delete_assignment, delete_attendance_for_labours, ensure_attendance, find_assignment,
    get_assignment, insert_assignment, load_assignments, update_assignment_wage,
};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::get_labour;
use crate::db::weeks::{get_week, load_entries};
use crate::errors::{AppError, AppResult};
use crate::models::assignment::{RosterEntry, WeekLabourAssignment};
use crate::models::week::Week;
use crate::utils::money::{MAX_AMOUNT, check_amount};
use rust_decimal::Decimal;
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};

pub struct RosterLogic;

/// Get-or-create a default row for every (day, labourer). Returns rows created.
pub fn sync_added(conn: &Connection, week_id: &str, labour_ids: &[String]) -> AppResult<usize> {
    if labour_ids.is_empty() {
        return Ok(0);
    }
    let entries = load_entries(conn, week_id)?;

    let mut created = 0;
    for entry in &entries {
        for labour_id in labour_ids {
            if ensure_attendance(conn, &entry.id, labour_id)? {
                created += 1;
            }
        }
    }
    Ok(created)
}

/// Drop the attendance of `labour_ids` from every day of the week.
pub fn sync_removed(conn: &Connection, week_id: &str, labour_ids: &[String]) -> AppResult<usize> {
    delete_attendance_for_labours(conn, week_id, labour_ids)
}

/// Make sure every current assignment has its rows.
pub fn reconcile(conn: &Connection, week_id: &str) -> AppResult<usize> {
    let ids: Vec<String> = load_assignments(conn, week_id)?
        .into_iter()
        .map(|a| a.labour_id)
        .collect();
    let created = sync_added(conn, week_id, &ids)?;
    if created > 0 {
        tracing::debug!(week = %week_id, created, "reconciled attendance rows");
    }
    Ok(created)
}

fn ensure_unlocked(week: &Week) -> AppResult<()> {
    if !week.is_editable() {
        return Err(AppError::NotEditable(format!(
            "week starting {} is locked",
            week.start_date
        )));
    }
    Ok(())
}

fn check_wage(wage: Decimal) -> AppResult<Decimal> {
    check_amount("weekly_daily_wage", wage, MAX_AMOUNT)
}

/// The labourer must exist and belong to the week's site.
fn check_member(conn: &Connection, week: &Week, labour_id: &str) -> AppResult<()> {
    let labour = get_labour(conn, labour_id)?;
    if labour.site_id != week.site_id {
        return Err(AppError::validation(
            "labour_id",
            format!("{} does not belong to the week's site", labour.name),
        ));
    }
    Ok(())
}

impl RosterLogic {
    /// Replace the whole roster of a week.
    ///
    /// Labourers missing from `entries` are unassigned (their attendance
    /// and payout for the week are dropped), new ones are assigned with
    /// default attendance rows, and kept ones get the new wage.
    pub fn set_roster(
        pool: &mut DbPool,
        week_id: &str,
        entries: &[RosterEntry],
    ) -> AppResult<Vec<WeekLabourAssignment>> {
        let tx = pool.write_tx()?;
        let week = get_week(&tx, week_id)?;
        ensure_unlocked(&week)?;

        let mut wanted: HashMap<&str, Decimal> = HashMap::new();
        for e in entries {
            let wage = check_wage(e.weekly_daily_wage)?;
            if wanted.insert(e.labour_id.as_str(), wage).is_some() {
                return Err(AppError::validation(
                    "labour_id",
                    format!("{} is listed more than once", e.labour_id),
                ));
            }
            check_member(&tx, &week, &e.labour_id)?;
        }

        let current = load_assignments(&tx, week_id)?;
        let current_ids: HashSet<&str> = current.iter().map(|a| a.labour_id.as_str()).collect();

        let mut removed = Vec::new();
        let mut updated = 0;
        for a in &current {
            match wanted.get(a.labour_id.as_str()) {
                None => {
                    delete_assignment(&tx, &a.id)?;
                    removed.push(a.labour_id.clone());
                }
                Some(wage) if *wage != a.weekly_daily_wage => {
                    update_assignment_wage(&tx, &a.id, *wage)?;
                    updated += 1;
                }
                Some(_) => {}
            }
        }

        let mut added = Vec::new();
        for e in entries {
            if !current_ids.contains(e.labour_id.as_str()) {
                insert_assignment(&tx, week_id, &e.labour_id, wanted[e.labour_id.as_str()])?;
                added.push(e.labour_id.clone());
            }
        }

        sync_removed(&tx, week_id, &removed)?;
        sync_added(&tx, week_id, &added)?;

        audit(
            &tx,
            "roster_set",
            week_id,
            &format!(
                "+{} -{} ~{} ({} assigned)",
                added.len(),
                removed.len(),
                updated,
                entries.len()
            ),
        )?;
        let roster = load_assignments(&tx, week_id)?;
        tx.commit()?;

        tracing::info!(
            week = %week_id,
            added = added.len(),
            removed = removed.len(),
            updated,
            "roster replaced"
        );
        Ok(roster)
    }

    /// Add one labourer to a week's roster.
    pub fn assign(
        pool: &mut DbPool,
        week_id: &str,
        labour_id: &str,
        wage: Decimal,
    ) -> AppResult<WeekLabourAssignment> {
        let wage = check_wage(wage)?;

        let tx = pool.write_tx()?;
        let week = get_week(&tx, week_id)?;
        ensure_unlocked(&week)?;
        check_member(&tx, &week, labour_id)?;

        if find_assignment(&tx, week_id, labour_id)?.is_some() {
            return Err(AppError::validation(
                "labour_id",
                format!("{} is already on this week's roster", labour_id),
            ));
        }

        let a = insert_assignment(&tx, week_id, labour_id, wage)?;
        sync_added(&tx, week_id, &[labour_id.to_string()])?;
        audit(&tx, "roster_add", week_id, &format!("{} @ {}", labour_id, wage))?;
        tx.commit()?;

        tracing::info!(week = %week_id, labour = %labour_id, %wage, "labour assigned");
        Ok(a)
    }

    /// Remove one labourer from a week's roster.
    pub fn unassign(pool: &mut DbPool, week_id: &str, labour_id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        let week = get_week(&tx, week_id)?;
        ensure_unlocked(&week)?;

        let a = find_assignment(&tx, week_id, labour_id)?
            .ok_or_else(|| AppError::not_found("WeekLabourAssignment", labour_id))?;

        delete_assignment(&tx, &a.id)?;
        sync_removed(&tx, week_id, &[labour_id.to_string()])?;
        audit(&tx, "roster_del", week_id, labour_id)?;
        tx.commit()?;

        tracing::info!(week = %week_id, labour = %labour_id, "labour unassigned");
        Ok(())
    }

    pub fn update_wage(
        pool: &mut DbPool,
        assignment_id: &str,
        wage: Decimal,
    ) -> AppResult<WeekLabourAssignment> {
        let wage = check_wage(wage)?;

        let tx = pool.write_tx()?;
        let a = get_assignment(&tx, assignment_id)?;
        ensure_unlocked(&get_week(&tx, &a.week_id)?)?;

        update_assignment_wage(&tx, assignment_id, wage)?;
        audit(
            &tx,
            "roster_wage",
            assignment_id,
            &format!("{} → {}", a.weekly_daily_wage, wage),
        )?;
        tx.commit()?;

        tracing::info!(assignment = %assignment_id, %wage, "wage updated");
        Ok(WeekLabourAssignment {
            weekly_daily_wage: wage,
            ..a
        })
    }

    pub fn list(conn: &Connection, week_id: &str) -> AppResult<Vec<WeekLabourAssignment>> {
        get_week(conn, week_id)?;
        load_assignments(conn, week_id)
    }
}
