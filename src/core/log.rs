use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_operation};
use crate::utils::table::visible_width;
use rusqlite::Connection;

const MAX_OP_WIDTH: usize = 60;

pub struct LogLogic;

/// `operation (target)`, cut to `max` visible characters.
fn op_target(row: &LogRow, max: usize) -> String {
    let s = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };
    if s.chars().count() > max {
        let mut cut: String = s.chars().take(max.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    } else {
        s
    }
}

impl LogLogic {
    /// Render the audit log, oldest first. `limit` keeps only the newest N.
    pub fn render(conn: &Connection, limit: Option<usize>) -> AppResult<String> {
        let rows = load_log(conn, limit)?;
        if rows.is_empty() {
            return Ok("No log entries.\n".to_string());
        }

        let labels: Vec<String> = rows.iter().map(|r| op_target(r, MAX_OP_WIDTH)).collect();
        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10);
        let op_w = labels.iter().map(|l| visible_width(l)).max().unwrap_or(10);

        let mut out = String::new();
        for (row, label) in rows.iter().zip(&labels) {
            // colour only the operation word
            let (op, rest) = label.split_at(row.operation.len().min(label.len()));
            let padding = " ".repeat(op_w.saturating_sub(visible_width(label)));
            out.push_str(&format!(
                "{:>id_w$}: {:<date_w$} | {}{}{}{}{} => {}\n",
                row.id,
                row.date,
                color_for_operation(&row.operation),
                op,
                RESET,
                rest,
                padding,
                row.message,
            ));
        }
        Ok(out)
    }
}
