use crate::cli::commands::{open_pool, print_id};
use crate::cli::parser::{Commands, SiteCmd};
use crate::config::Config;
use crate::core::site::SiteLogic;
use crate::errors::AppResult;
use crate::models::site::Site;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{Column, Table};

fn print_sites(sites: &[Site]) {
    let mut t = Table::new(vec![
        Column::left("ID"),
        Column::left("Name"),
        Column::left("Address"),
        Column::left("Active"),
    ]);
    for s in sites {
        t.add_row(vec![
            s.id.clone(),
            s.name.clone(),
            s.address.clone(),
            if s.is_active {
                "yes".to_string()
            } else {
                format!("{GREY}no{RESET}")
            },
        ]);
    }
    print!("{}", t.render());
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Site { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        SiteCmd::Add { name, address } => {
            let site = SiteLogic::create(&mut pool, name, address)?;
            success(format!("Site '{}' created", site.name));
            print_id(&site.id);
        }
        SiteCmd::List { all } => {
            let sites = SiteLogic::list(&pool.conn, *all)?;
            if sites.is_empty() {
                info("No sites.");
            } else {
                header("Sites");
                print_sites(&sites);
            }
        }
        SiteCmd::Show { id } => {
            let site = SiteLogic::show(&pool.conn, id)?;
            print_sites(std::slice::from_ref(&site));
        }
        SiteCmd::Activate { id } => {
            let site = SiteLogic::set_active(&mut pool, id, true)?;
            success(format!("Site '{}' activated", site.name));
        }
        SiteCmd::Deactivate { id } => {
            let site = SiteLogic::set_active(&mut pool, id, false)?;
            success(format!("Site '{}' deactivated", site.name));
        }
        SiteCmd::Del { id } => {
            SiteLogic::delete(&mut pool, id)?;
            success(format!("Site {} deleted", id));
        }
    }
    Ok(())
}
