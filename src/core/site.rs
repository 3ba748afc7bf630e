use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_site, get_site, insert_site, load_sites, set_site_active};
use crate::errors::{AppError, AppResult};
use crate::models::site::Site;
use rusqlite::Connection;

/// Minimal site registry: the ledger only needs a tenant to hang weeks on.
pub struct SiteLogic;

impl SiteLogic {
    pub fn create(pool: &mut DbPool, name: &str, address: &str) -> AppResult<Site> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "site name must not be empty"));
        }

        let tx = pool.write_tx()?;
        let site = insert_site(&tx, name, address.trim())?;
        audit(&tx, "site_add", &site.id, &format!("Created site '{}'", site.name))?;
        tx.commit()?;

        tracing::info!(site = %site.id, name = %site.name, "site created");
        Ok(site)
    }

    pub fn list(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Site>> {
        load_sites(conn, include_inactive)
    }

    pub fn show(conn: &Connection, site_id: &str) -> AppResult<Site> {
        get_site(conn, site_id)
    }

    pub fn set_active(pool: &mut DbPool, site_id: &str, active: bool) -> AppResult<Site> {
        let tx = pool.write_tx()?;
        set_site_active(&tx, site_id, active)?;
        let op = if active { "site_activate" } else { "site_deactivate" };
        audit(&tx, op, site_id, "")?;
        let site = get_site(&tx, site_id)?;
        tx.commit()?;

        tracing::info!(site = %site_id, active, "site state changed");
        Ok(site)
    }

    /// Delete a site with all its labourers and weeks.
    pub fn delete(pool: &mut DbPool, site_id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        let site = get_site(&tx, site_id)?;
        delete_site(&tx, site_id)?;
        audit(&tx, "site_del", site_id, &format!("Deleted site '{}'", site.name))?;
        tx.commit()?;

        tracing::warn!(site = %site_id, "site deleted with its labourers and weeks");
        Ok(())
    }
}
