use crate::cli::commands::{money, open_pool, print_id};
use crate::cli::parser::{Commands, RosterCmd};
use crate::config::Config;
use crate::core::roster::RosterLogic;
use crate::db::queries::find_labour;
use crate::errors::AppResult;
use crate::models::assignment::WeekLabourAssignment;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};
use rusqlite::Connection;

fn print_roster(conn: &Connection, cfg: &Config, roster: &[WeekLabourAssignment]) -> AppResult<()> {
    if roster.is_empty() {
        info("The roster is empty.");
        return Ok(());
    }
    let mut t = Table::new(vec![
        Column::left("Assignment"),
        Column::left("Labour"),
        Column::left("Name"),
        Column::right("Daily wage"),
    ]);
    for a in roster {
        let name = find_labour(conn, &a.labour_id)?
            .map(|l| l.name)
            .unwrap_or_default();
        t.add_row(vec![
            a.id.clone(),
            a.labour_id.clone(),
            name,
            money(cfg, a.weekly_daily_wage),
        ]);
    }
    print!("{}", t.render());
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Roster { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        RosterCmd::Set { week, entries } => {
            let roster = RosterLogic::set_roster(&mut pool, week, entries)?;
            success(format!("Roster saved: {} labourer(s)", roster.len()));
            print_roster(&pool.conn, cfg, &roster)?;
        }
        RosterCmd::Add { week, labour, wage } => {
            let a = RosterLogic::assign(&mut pool, week, labour, *wage)?;
            success(format!("Assigned at {}", money(cfg, a.weekly_daily_wage)));
            print_id(&a.id);
        }
        RosterCmd::Del { week, labour } => {
            RosterLogic::unassign(&mut pool, week, labour)?;
            success(format!("{} removed from the roster", labour));
        }
        RosterCmd::Wage { assignment, wage } => {
            let a = RosterLogic::update_wage(&mut pool, assignment, *wage)?;
            success(format!("Daily wage set to {}", money(cfg, a.weekly_daily_wage)));
        }
        RosterCmd::List { week } => {
            let roster = RosterLogic::list(&pool.conn, week)?;
            header("Roster");
            print_roster(&pool.conn, cfg, &roster)?;
        }
    }
    Ok(())
}
