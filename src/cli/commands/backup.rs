use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        let path = BackupLogic::backup(cfg, file, *compress)?;
        success(format!("Backup created: {}", path.display()));
    }

    Ok(())
}
