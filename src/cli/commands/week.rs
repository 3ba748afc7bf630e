use crate::cli::commands::{money, open_pool, print_id};
use crate::cli::parser::{Commands, WeekCmd};
use crate::config::Config;
use crate::core::detail::DetailLogic;
use crate::core::week::WeekLogic;
use crate::errors::AppResult;
use crate::models::week_detail::WeekDetail;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREEN, GREY, RED, RESET, color_for_balance};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

fn yes_no(v: bool) -> String {
    if v {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{GREY}no{RESET}")
    }
}

fn print_detail(cfg: &Config, d: &WeekDetail) {
    header(format!(
        "Week {} → {}{}",
        d.week.start_date,
        d.end_date,
        if d.week.admin_unlocked {
            String::new()
        } else {
            format!(" {RED}(locked){RESET}")
        }
    ));

    let mut days = Table::new(vec![
        Column::left("Date"),
        Column::left("Day"),
        Column::left("Entry"),
        Column::right("Present"),
        Column::left("Saved"),
        Column::left("Editable"),
    ]);
    for day in &d.days {
        let present = day.attendance.iter().filter(|a| a.is_present).count();
        days.add_row(vec![
            day.entry.date.to_string(),
            day.entry.date.format("%a").to_string(),
            day.entry.id.clone(),
            format!("{}/{}", present, day.attendance.len()),
            yes_no(day.entry.is_saved),
            yes_no(day.is_editable),
        ]);
    }
    print!("{}", days.render());
    println!();

    if d.labours.is_empty() {
        info("Nobody is on this week's roster.");
        return;
    }

    let mut ledger = Table::new(vec![
        Column::left("Labour"),
        Column::left("Assignment"),
        Column::right("Wage"),
        Column::right("Opening"),
        Column::right("Days"),
        Column::right("Earned"),
        Column::right("Advance"),
        Column::right("Net"),
        Column::right("Total due"),
        Column::right("Paid"),
        Column::right("Balance"),
    ]);
    for b in &d.labours {
        let total = money(cfg, b.total_due_to_date);
        let balance = money(cfg, b.balance_after_payment);
        ledger.add_row(vec![
            b.name.clone(),
            b.assignment_id.clone(),
            money(cfg, b.weekly_daily_wage),
            money(cfg, b.opening_balance),
            b.days_present.normalize().to_string(),
            money(cfg, b.current_earned),
            money(cfg, b.current_advance),
            money(cfg, b.current_week_net),
            format!("{}{}{}", color_for_balance(b.total_due_to_date), total, RESET),
            money(cfg, b.amount_paid),
            format!("{}{}{}", color_for_balance(b.balance_after_payment), balance, RESET),
        ]);
    }
    print!("{}", ledger.render());
}

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let Commands::Week { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        WeekCmd::Add { site, start } => {
            let week = WeekLogic::create(&mut pool, site, *start)?;
            success(format!("Week {} → {} created", week.start_date, week.end_date()));
            print_id(&week.id);
        }
        WeekCmd::List { site } => {
            let weeks = WeekLogic::list(&pool.conn, site)?;
            if weeks.is_empty() {
                info("No weeks.");
                return Ok(());
            }
            header("Weeks");
            let mut t = Table::new(vec![
                Column::left("ID"),
                Column::left("Start"),
                Column::left("End"),
                Column::left("Locked"),
            ]);
            for w in &weeks {
                t.add_row(vec![
                    w.id.clone(),
                    w.start_date.to_string(),
                    w.end_date().to_string(),
                    yes_no(!w.admin_unlocked),
                ]);
            }
            print!("{}", t.render());
        }
        WeekCmd::Show { id, json } => {
            let detail = DetailLogic::week_detail(&mut pool, id, today)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_detail(cfg, &detail);
            }
        }
        WeekCmd::Lock { id } => {
            let w = WeekLogic::set_locked(&mut pool, id, true)?;
            success(format!("Week {} locked", w.start_date));
        }
        WeekCmd::Unlock { id } => {
            let w = WeekLogic::set_locked(&mut pool, id, false)?;
            success(format!("Week {} unlocked", w.start_date));
        }
        WeekCmd::Del { id } => {
            WeekLogic::delete(&mut pool, id)?;
            warning(format!("Week {} deleted with its days, roster and payouts", id));
        }
    }
    Ok(())
}
