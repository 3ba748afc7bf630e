use crate::cli::commands::{money, open_pool};
use crate::cli::parser::{Commands, DayCmd, DayTarget};
use crate::config::Config;
use crate::core::attendance::AttendanceLogic;
use crate::core::detail::DetailLogic;
use crate::db::queries::find_labour;
use crate::db::weeks::find_entry_by_date;
use crate::errors::{AppError, AppResult};
use crate::models::week_detail::DayDetail;
use crate::ui::messages::{header, success};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Resolve `--entry` or `--week/--date` to an entry id.
fn resolve(conn: &Connection, t: &DayTarget) -> AppResult<String> {
    match (&t.entry, &t.week, &t.date) {
        (Some(id), _, _) => Ok(id.clone()),
        (None, Some(week), Some(date)) => find_entry_by_date(conn, week, date)?
            .map(|e| e.id)
            .ok_or_else(|| AppError::not_found("DailyEntry", format!("{week} @ {date}"))),
        _ => Err(AppError::validation(
            "entry",
            "give --entry ID or --week ID --date YYYY-MM-DD",
        )),
    }
}

fn print_day(conn: &Connection, cfg: &Config, d: &DayDetail) -> AppResult<()> {
    header(format!(
        "{} ({}){}",
        d.entry.date,
        d.entry.date.format("%A"),
        match (d.is_editable, d.week_locked) {
            (_, true) => " · week locked",
            (false, false) => " · read-only",
            (true, false) => "",
        }
    ));

    let mut t = Table::new(vec![
        Column::left("Labour"),
        Column::left("Present"),
        Column::right("Multiplier"),
        Column::right("Advance"),
        Column::left("Paid by"),
    ]);
    for a in &d.attendance {
        let name = find_labour(conn, &a.labour_id)?
            .map(|l| l.name)
            .unwrap_or_else(|| a.labour_id.clone());
        t.add_row(vec![
            name,
            if a.is_present { "P" } else { "A" }.to_string(),
            a.multiplier.normalize().to_string(),
            money(cfg, a.advance_taken),
            a.payment_type.label().to_string(),
        ]);
    }
    print!("{}", t.render());
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let Commands::Day { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        DayCmd::Show { target } => {
            let id = resolve(&pool.conn, target)?;
            let day = DetailLogic::day_detail(&pool.conn, &id, today)?;
            print_day(&pool.conn, cfg, &day)?;
        }
        DayCmd::Submit {
            target,
            rows,
            admin_unlock,
        } => {
            let id = resolve(&pool.conn, target)?;
            let entry = AttendanceLogic::submit(&mut pool, &id, rows, *admin_unlock, today)?;
            if entry.admin_unlocked {
                success(format!("{} unlocked for editing ({} rows)", entry.date, rows.len()));
            } else {
                success(format!("{} saved ({} rows)", entry.date, rows.len()));
            }
        }
    }
    Ok(())
}
