use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

fn log_init(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    let tx = pool.write_tx()?;
    audit(&tx, "init", db_path, "Database initialized")?;
    tx.commit()?;
    Ok(())
}

/// Handle the `init` command
///
/// Creates the config directory and file (not in test mode), the SQLite
/// database, and applies all pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing sitebook…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database    : {}", cfg.database);

    let mut pool = DbPool::open(&cfg.database, cfg.busy_timeout_ms)?;
    init_db(&pool.conn)?;

    if let Err(e) = log_init(&mut pool, &cfg.database) {
        warning(format!("Failed to write audit log: {}", e));
    }

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
