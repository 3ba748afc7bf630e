//! Site and labour records.

use crate::db::db_utils::{dec_to_db, get_bool, get_coded, get_decimal, new_id};
use crate::errors::{AppError, AppResult};
use crate::models::labour::{Gender, Labour, LabourType};
use crate::models::site::Site;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------
// Sites
// ---------------------------------------------------------------

pub fn map_site(row: &Row) -> Result<Site> {
    Ok(Site {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        is_active: get_bool(row, "is_active")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_site(conn: &Connection, name: &str, address: &str) -> AppResult<Site> {
    let site = Site {
        id: new_id(),
        name: name.to_string(),
        address: address.to_string(),
        is_active: true,
        created_at: Local::now().to_rfc3339(),
    };

    conn.execute(
        "INSERT INTO sites (id, name, address, is_active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![site.id, site.name, site.address, site.created_at],
    )?;
    Ok(site)
}

pub fn find_site(conn: &Connection, id: &str) -> AppResult<Option<Site>> {
    let site = conn
        .query_row("SELECT * FROM sites WHERE id = ?1", [id], map_site)
        .optional()?;
    Ok(site)
}

pub fn get_site(conn: &Connection, id: &str) -> AppResult<Site> {
    find_site(conn, id)?.ok_or_else(|| AppError::not_found("Site", id))
}

pub fn load_sites(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Site>> {
    let sql = if include_inactive {
        "SELECT * FROM sites ORDER BY created_at DESC"
    } else {
        "SELECT * FROM sites WHERE is_active = 1 ORDER BY created_at DESC"
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_site)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_site_active(conn: &Connection, id: &str, active: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE sites SET is_active = ?1 WHERE id = ?2",
        params![active as i64, id],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Site", id));
    }
    Ok(())
}

pub fn delete_site(conn: &Connection, id: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM sites WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Site", id));
    }
    Ok(())
}

// ---------------------------------------------------------------
// Labours
// ---------------------------------------------------------------

pub fn map_labour(row: &Row) -> Result<Labour> {
    Ok(Labour {
        id: row.get("id")?,
        site_id: row.get("site_id")?,
        name: row.get("name")?,
        previous_balance: get_decimal(row, "previous_balance")?,
        kind: get_coded(row, "type", LabourType::from_db_str)?,
        gender: get_coded(row, "gender", Gender::from_db_str)?,
        pan_number: row.get("pan_number")?,
        aadhar_number: row.get("aadhar_number")?,
        bank_account_number: row.get("bank_account_number")?,
        ifsc_code: row.get("ifsc_code")?,
        branch_name: row.get("branch_name")?,
        photo: row.get("photo")?,
    })
}

pub fn insert_labour(conn: &Connection, l: &Labour) -> AppResult<()> {
    conn.execute(
        "INSERT INTO labours (id, site_id, name, previous_balance, type, gender,
                              pan_number, aadhar_number, bank_account_number,
                              ifsc_code, branch_name, photo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            l.id,
            l.site_id,
            l.name,
            dec_to_db(&l.previous_balance),
            l.kind.to_db_str(),
            l.gender.to_db_str(),
            l.pan_number,
            l.aadhar_number,
            l.bank_account_number,
            l.ifsc_code,
            l.branch_name,
            l.photo,
        ],
    )?;
    Ok(())
}

/// Update all mutable fields (everything except id and site).
pub fn update_labour(conn: &Connection, l: &Labour) -> AppResult<()> {
    conn.execute(
        "UPDATE labours
         SET name = ?1, previous_balance = ?2, type = ?3, gender = ?4,
             pan_number = ?5, aadhar_number = ?6, bank_account_number = ?7,
             ifsc_code = ?8, branch_name = ?9, photo = ?10
         WHERE id = ?11",
        params![
            l.name,
            dec_to_db(&l.previous_balance),
            l.kind.to_db_str(),
            l.gender.to_db_str(),
            l.pan_number,
            l.aadhar_number,
            l.bank_account_number,
            l.ifsc_code,
            l.branch_name,
            l.photo,
            l.id,
        ],
    )?;
    Ok(())
}

pub fn find_labour(conn: &Connection, id: &str) -> AppResult<Option<Labour>> {
    let labour = conn
        .query_row("SELECT * FROM labours WHERE id = ?1", [id], map_labour)
        .optional()?;
    Ok(labour)
}

pub fn get_labour(conn: &Connection, id: &str) -> AppResult<Labour> {
    find_labour(conn, id)?.ok_or_else(|| AppError::not_found("Labour", id))
}

pub fn load_labours(
    conn: &Connection,
    site_id: &str,
    kind: Option<LabourType>,
) -> AppResult<Vec<Labour>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM labours
         WHERE site_id = ?1 AND (?2 IS NULL OR type = ?2)
         ORDER BY name ASC",
    )?;
    let rows = stmt.query_map(params![site_id, kind.map(|k| k.to_db_str())], map_labour)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_labour(conn: &Connection, id: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM labours WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Labour", id));
    }
    Ok(())
}
