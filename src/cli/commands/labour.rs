use crate::cli::commands::{money, open_pool, print_id};
use crate::cli::parser::{Commands, LabourArgs, LabourCmd};
use crate::config::Config;
use crate::core::labour::LabourLogic;
use crate::errors::AppResult;
use crate::models::labour::{Labour, LabourFields};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

fn to_fields(name: Option<String>, a: &LabourArgs) -> LabourFields {
    LabourFields {
        name,
        previous_balance: a.balance,
        kind: a.kind,
        gender: a.gender,
        pan_number: a.pan.clone(),
        aadhar_number: a.aadhar.clone(),
        bank_account_number: a.account.clone(),
        ifsc_code: a.ifsc.clone(),
        branch_name: a.branch.clone(),
        photo: a.photo.clone(),
    }
}

fn print_labour(cfg: &Config, l: &Labour) {
    let rows = [
        ("ID", l.id.clone()),
        ("Name", l.name.clone()),
        ("Site", l.site_id.clone()),
        ("Type", l.kind.label().to_string()),
        ("Gender", l.gender.label().to_string()),
        ("Opening balance", money(cfg, l.previous_balance)),
        ("PAN", colorize_optional(&l.pan_number)),
        ("Aadhar", colorize_optional(&l.aadhar_number)),
        ("Bank account", colorize_optional(&l.bank_account_number)),
        ("IFSC", colorize_optional(&l.ifsc_code)),
        ("Branch", colorize_optional(&l.branch_name)),
        ("Photo", colorize_optional(&l.photo)),
    ];
    for (k, v) in rows {
        println!("{:<16} {}", k, v);
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Labour { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        LabourCmd::Add { site, name, fields } => {
            let l = LabourLogic::create(&mut pool, site, to_fields(Some(name.clone()), fields))?;
            success(format!("Labour '{}' added", l.name));
            print_id(&l.id);
        }
        LabourCmd::List { site, kind } => {
            let labours = LabourLogic::list(&pool.conn, site, *kind)?;
            if labours.is_empty() {
                info("No labourers.");
                return Ok(());
            }
            header("Labourers");
            let mut t = Table::new(vec![
                Column::left("ID"),
                Column::left("Name"),
                Column::left("Type"),
                Column::left("Gender"),
                Column::right("Opening"),
            ]);
            for l in &labours {
                t.add_row(vec![
                    l.id.clone(),
                    l.name.clone(),
                    l.kind.label().to_string(),
                    l.gender.label().to_string(),
                    money(cfg, l.previous_balance),
                ]);
            }
            print!("{}", t.render());
        }
        LabourCmd::Show { id } => {
            let l = LabourLogic::show(&pool.conn, id)?;
            print_labour(cfg, &l);
        }
        LabourCmd::Edit { id, name, fields } => {
            let l = LabourLogic::update(&mut pool, id, to_fields(name.clone(), fields))?;
            success(format!("Labour '{}' updated", l.name));
        }
        LabourCmd::Del { id } => {
            LabourLogic::delete(&mut pool, id)?;
            success(format!("Labour {} deleted", id));
        }
    }
    Ok(())
}
