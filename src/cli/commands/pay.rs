use crate::cli::commands::{money, open_pool};
use crate::cli::parser::{Commands, PayCmd};
use crate::config::Config;
use crate::core::payment::PaymentLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Pay { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        PayCmd::Record {
            assignment,
            amount,
            payment_type,
        } => {
            let pt = payment_type.unwrap_or(cfg.default_payment_type);
            let p = PaymentLogic::record(&mut pool, assignment, *amount, pt)?;
            success(format!(
                "Payout recorded: {} ({})",
                money(cfg, p.amount_paid),
                p.payment_type.label()
            ));
        }
        PayCmd::Clear { assignment } => {
            PaymentLogic::clear(&mut pool, assignment)?;
            success("Payout removed");
        }
        PayCmd::List { week } => {
            let payouts = PaymentLogic::list_for_week(&pool.conn, week)?;
            if payouts.is_empty() {
                info("No payouts recorded for this week.");
                return Ok(());
            }
            header("Payouts");
            let mut t = Table::new(vec![
                Column::left("Assignment"),
                Column::right("Amount"),
                Column::left("Type"),
            ]);
            for p in &payouts {
                t.add_row(vec![
                    p.assignment_id.clone(),
                    money(cfg, p.amount_paid),
                    p.payment_type.label().to_string(),
                ]);
            }
            print!("{}", t.render());
        }
    }
    Ok(())
}
