use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        week,
        format,
        file,
        force,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let n = ExportLogic::export_week(&pool.conn, week, *format, file, *force)?;
        if n == 0 {
            warning("The week has no roster: only the header was written.");
        }
        success(format!(
            "{} export completed: {} ({} rows)",
            format.as_str().to_uppercase(),
            file,
            n
        ));
    }
    Ok(())
}
