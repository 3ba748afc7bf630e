use crate::cli::commands::{money, open_pool, print_id};
use crate::cli::parser::{Commands, RateWorkArgs, RateWorkCmd};
use crate::config::Config;
use crate::core::rate_work::RateWorkLogic;
use crate::errors::AppResult;
use crate::models::rate_work::{Payment, RateWork, RateWorkFields};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::color_for_balance;
use crate::utils::colors::RESET;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

fn to_fields(name: Option<String>, a: &RateWorkArgs) -> RateWorkFields {
    RateWorkFields {
        name,
        quantity: a.quantity,
        unit: a.unit.clone(),
        cost_per_unit: a.cost_per_unit,
        is_completed: None,
    }
}

fn works_table(cfg: &Config, works: &[RateWork]) -> String {
    let mut t = Table::new(vec![
        Column::left("ID"),
        Column::left("Job"),
        Column::right("Qty"),
        Column::left("Unit"),
        Column::right("Rate"),
        Column::right("Total"),
        Column::left("Done"),
    ]);
    for w in works {
        t.add_row(vec![
            w.id.clone(),
            w.name.clone(),
            w.quantity.normalize().to_string(),
            w.unit.clone(),
            money(cfg, w.cost_per_unit),
            money(cfg, w.total_cost()),
            if w.is_completed { "yes" } else { "no" }.to_string(),
        ]);
    }
    t.render()
}

fn payments_table(cfg: &Config, payments: &[Payment]) -> String {
    let mut t = Table::new(vec![
        Column::left("ID"),
        Column::left("Date"),
        Column::right("Amount"),
        Column::left("Note"),
    ]);
    for p in payments {
        t.add_row(vec![
            p.id.clone(),
            p.date_created.to_string(),
            money(cfg, p.amount),
            p.note.clone(),
        ]);
    }
    t.render()
}

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let Commands::RateWork { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        RateWorkCmd::Add {
            labour,
            name,
            fields,
        } => {
            let w = RateWorkLogic::create(&mut pool, labour, to_fields(Some(name.clone()), fields), today)?;
            success(format!("Rate work '{}' added: {}", w.name, money(cfg, w.total_cost())));
            print_id(&w.id);
        }
        RateWorkCmd::List { labour } => {
            let s = RateWorkLogic::summary(&pool.conn, labour)?;
            if s.works.is_empty() {
                info("No rate work for this labourer.");
            } else {
                header("Rate work");
                print!("{}", works_table(cfg, &s.works));
            }
            println!();
            println!("Total cost  : {}", money(cfg, s.total_cost));
            println!("Paid        : {}", money(cfg, s.paid));
            println!(
                "Outstanding : {}{}{}",
                color_for_balance(s.outstanding),
                money(cfg, s.outstanding),
                RESET
            );
        }
        RateWorkCmd::Show { id } => {
            let w = RateWorkLogic::show(&pool.conn, id)?;
            print!("{}", works_table(cfg, std::slice::from_ref(&w)));
        }
        RateWorkCmd::Edit { id, name, fields } => {
            let w = RateWorkLogic::update(&mut pool, id, to_fields(name.clone(), fields))?;
            success(format!("Rate work '{}' updated: {}", w.name, money(cfg, w.total_cost())));
        }
        RateWorkCmd::Done { id } => {
            let w = RateWorkLogic::complete(&mut pool, id)?;
            success(format!("Rate work '{}' completed", w.name));
        }
        RateWorkCmd::Del { id } => {
            RateWorkLogic::delete(&mut pool, id)?;
            success(format!("Rate work {} deleted", id));
        }
        RateWorkCmd::Pay {
            labour,
            amount,
            note,
        } => {
            let p = RateWorkLogic::pay(&mut pool, labour, *amount, note, today)?;
            success(format!("Payment recorded: {}", money(cfg, p.amount)));
            print_id(&p.id);
        }
        RateWorkCmd::Payments { labour } => {
            let payments = RateWorkLogic::payments(&pool.conn, labour)?;
            if payments.is_empty() {
                info("No payments.");
            } else {
                header("Rate work payments");
                print!("{}", payments_table(cfg, &payments));
            }
        }
        RateWorkCmd::DelPayment { labour, payment } => {
            RateWorkLogic::delete_payment(&mut pool, labour, payment)?;
            success(format!("Payment {} deleted", payment));
        }
    }
    Ok(())
}
