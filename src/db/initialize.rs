use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Bring the schema up to date and make sure cascades are enforced on
/// this connection: deleting a site, week or labourer relies on them.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    let fk: i64 = conn.query_row("PRAGMA foreign_keys", [], |r| r.get(0))?;
    if fk != 1 {
        return Err(AppError::Other(
            "foreign keys are disabled on this connection".to_string(),
        ));
    }
    tracing::debug!("schema ready");
    Ok(())
}
