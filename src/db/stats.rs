use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const COUNTED_TABLES: &[(&str, &str)] = &[
    ("sites", "Sites"),
    ("labours", "Labourers"),
    ("weeks", "Weeks"),
    ("week_labour_assignments", "Roster entries"),
    ("labour_attendance", "Attendance rows"),
    ("labour_payments", "Weekly payouts"),
    ("rate_works", "Rate works"),
    ("payments", "Rate payments"),
];

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (table, label) in COUNTED_TABLES {
        let count: i64 =
            pool.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) WEEK RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_date) FROM weeks", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(start_date) FROM weeks", [], |row| row.get(0))
        .optional()?
        .flatten();

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Weeks:{}", CYAN, RESET);
    println!("    first: {}", first.unwrap_or_else(|| dash.clone()));
    println!("    last:  {}", last.unwrap_or(dash));

    println!();
    Ok(())
}
