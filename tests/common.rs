#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sitebook::core::labour::LabourLogic;
use sitebook::core::roster::RosterLogic;
use sitebook::core::site::SiteLogic;
use sitebook::core::week::WeekLogic;
use sitebook::db::initialize::init_db;
use sitebook::db::pool::DbPool;
use sitebook::models::assignment::RosterEntry;
use sitebook::models::labour::{Labour, LabourFields};
use sitebook::models::week::Week;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sb() -> Command {
    cargo_bin_cmd!("sitebook")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sitebook.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sitebook_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh migrated database for library-level tests.
pub fn open_db(name: &str) -> DbPool {
    let path = setup_test_db(name);
    let pool = DbPool::new(&path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// 2025-03-01, a Saturday.
pub fn first_saturday() -> NaiveDate {
    d(2025, 3, 1)
}

pub fn add_site(pool: &mut DbPool) -> String {
    SiteLogic::create(pool, "Tower A", "Plot 12, Ring Road")
        .expect("site")
        .id
}

pub fn add_labour(pool: &mut DbPool, site_id: &str, name: &str, balance: &str) -> Labour {
    LabourLogic::create(
        pool,
        site_id,
        LabourFields {
            name: Some(name.to_string()),
            previous_balance: Some(dec(balance)),
            ..Default::default()
        },
    )
    .expect("labour")
}

pub fn add_week(pool: &mut DbPool, site_id: &str, start: NaiveDate) -> Week {
    WeekLogic::create(pool, site_id, start).expect("week")
}

pub fn roster<S: AsRef<str>>(pool: &mut DbPool, week_id: &str, lines: &[(S, &str)]) {
    let entries: Vec<RosterEntry> = lines
        .iter()
        .map(|(id, wage)| RosterEntry::new(id.as_ref(), dec(wage)))
        .collect();
    RosterLogic::set_roster(pool, week_id, &entries).expect("roster");
}

/// Value printed on the first `id:` line of a command's output.
pub fn extract_id(stdout: &[u8]) -> String {
    let out = String::from_utf8_lossy(stdout);
    out.lines()
        .find(|l| l.contains("id:"))
        .and_then(|l| l.split_whitespace().last())
        .expect("no id line in output")
        .to_string()
}
