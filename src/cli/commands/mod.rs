pub mod backup;
pub mod config;
pub mod day;
pub mod db;
pub mod export;
pub mod init;
pub mod labour;
pub mod log;
pub mod pay;
pub mod rate_work;
pub mod roster;
pub mod site;
pub mod week;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{GREY, RESET};
use crate::utils::money::format_money;
use rust_decimal::Decimal;

/// Open the configured database, bringing the schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::open(&cfg.database, cfg.busy_timeout_ms)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// `id: <uuid>` line printed after every create, so scripts can pick it up.
pub(crate) fn print_id(id: &str) {
    println!("{GREY}id:{RESET} {id}");
}

pub(crate) fn money(cfg: &Config, d: Decimal) -> String {
    format_money(d, &cfg.currency_symbol)
}
