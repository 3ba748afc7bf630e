//! ANSI colour codes for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Balance colour: owed to the labourer → green, owed by them → red.
pub fn color_for_balance(value: rust_decimal::Decimal) -> &'static str {
    if value.is_zero() {
        RESET
    } else if value.is_sign_negative() {
        RED
    } else {
        GREEN
    }
}

/// Colour for an audit `operation`, keyed on its prefix.
pub fn color_for_operation(op: &str) -> &'static str {
    match op {
        "migration_applied" => MAGENTA,
        "backup" | "init" => BLUE,
        o if o.ends_with("_del") => RED,
        o if o.ends_with("_edit") || o.ends_with("_wage") || o.ends_with("_lock") => YELLOW,
        o if o.starts_with("day_") || o.starts_with("pay") || o.starts_with("rate_pay") => CYAN,
        _ => GREEN,
    }
}

/// Grey out empty values.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn balance_colours() {
        assert_eq!(color_for_balance(Decimal::from(5)), GREEN);
        assert_eq!(color_for_balance(Decimal::from(-5)), RED);
        assert_eq!(color_for_balance(Decimal::ZERO), RESET);
    }

    #[test]
    fn operation_colours() {
        assert_eq!(color_for_operation("week_del"), RED);
        assert_eq!(color_for_operation("roster_wage"), YELLOW);
        assert_eq!(color_for_operation("day_save"), CYAN);
        assert_eq!(color_for_operation("week_add"), GREEN);
    }
}
