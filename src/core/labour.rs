use crate::db::db_utils::new_id;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_labour, get_labour, get_site, insert_labour, load_labours, update_labour};
use crate::errors::{AppError, AppResult};
use crate::models::labour::{Gender, Labour, LabourFields, LabourType};
use crate::utils::money::{MAX_BALANCE, check_signed_amount};
use rust_decimal::Decimal;
use rusqlite::Connection;

pub struct LabourLogic;

fn check_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "labour name must not be empty"));
    }
    Ok(name.to_string())
}

/// Opening balances are signed: a labourer may join already owing money.
fn check_balance(balance: Decimal) -> AppResult<Decimal> {
    check_signed_amount("previous_balance", balance, MAX_BALANCE)
}

/// Overwrite the fields of `l` that are set in `f`.
fn apply_fields(l: &mut Labour, f: LabourFields) -> AppResult<()> {
    if let Some(name) = f.name {
        l.name = check_name(&name)?;
    }
    if let Some(b) = f.previous_balance {
        l.previous_balance = check_balance(b)?;
    }
    if let Some(k) = f.kind {
        l.kind = k;
    }
    if let Some(g) = f.gender {
        l.gender = g;
    }
    if let Some(v) = f.pan_number {
        l.pan_number = v;
    }
    if let Some(v) = f.aadhar_number {
        l.aadhar_number = v;
    }
    if let Some(v) = f.bank_account_number {
        l.bank_account_number = v;
    }
    if let Some(v) = f.ifsc_code {
        l.ifsc_code = v;
    }
    if let Some(v) = f.branch_name {
        l.branch_name = v;
    }
    if let Some(v) = f.photo {
        l.photo = v;
    }
    Ok(())
}

impl LabourLogic {
    /// Register a labourer on a site. `fields.name` is required; the
    /// rest default (balance 0, daily work, male, empty documents).
    pub fn create(pool: &mut DbPool, site_id: &str, fields: LabourFields) -> AppResult<Labour> {
        let name = fields
            .name
            .as_deref()
            .ok_or_else(|| AppError::validation("name", "labour name is required"))?;

        let mut labour = Labour {
            id: new_id(),
            site_id: site_id.to_string(),
            name: check_name(name)?,
            previous_balance: Decimal::ZERO,
            kind: LabourType::DailyWork,
            gender: Gender::Male,
            pan_number: String::new(),
            aadhar_number: String::new(),
            bank_account_number: String::new(),
            ifsc_code: String::new(),
            branch_name: String::new(),
            photo: String::new(),
        };
        apply_fields(&mut labour, fields)?;

        let tx = pool.write_tx()?;
        get_site(&tx, site_id)?;
        insert_labour(&tx, &labour)?;
        audit(
            &tx,
            "labour_add",
            &labour.id,
            &format!("Added '{}' to site {}", labour.name, site_id),
        )?;
        tx.commit()?;

        tracing::info!(labour = %labour.id, site = %site_id, "labour created");
        Ok(labour)
    }

    pub fn list(
        conn: &Connection,
        site_id: &str,
        kind: Option<LabourType>,
    ) -> AppResult<Vec<Labour>> {
        get_site(conn, site_id)?;
        load_labours(conn, site_id, kind)
    }

    pub fn show(conn: &Connection, labour_id: &str) -> AppResult<Labour> {
        get_labour(conn, labour_id)
    }

    pub fn update(pool: &mut DbPool, labour_id: &str, fields: LabourFields) -> AppResult<Labour> {
        let tx = pool.write_tx()?;
        let mut labour = get_labour(&tx, labour_id)?;
        apply_fields(&mut labour, fields)?;
        update_labour(&tx, &labour)?;
        audit(&tx, "labour_edit", labour_id, &format!("Updated '{}'", labour.name))?;
        tx.commit()?;

        tracing::info!(labour = %labour_id, "labour updated");
        Ok(labour)
    }

    /// Remove a labourer together with assignments, attendance and payments.
    pub fn delete(pool: &mut DbPool, labour_id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        let labour = get_labour(&tx, labour_id)?;
        delete_labour(&tx, labour_id)?;
        audit(&tx, "labour_del", labour_id, &format!("Deleted '{}'", labour.name))?;
        tx.commit()?;

        tracing::warn!(labour = %labour_id, "labour deleted");
        Ok(())
    }
}
