//! Decimal helpers: parsing user input, rounding, formatting amounts.

use crate::errors::{AppError, AppResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Money is kept at 2 decimal places everywhere it is stored.
pub const MONEY_DP: u32 = 2;

pub fn round_money(d: Decimal) -> Decimal {
    d.round_dp(MONEY_DP)
}

/// Parse a decimal amount for `field`, rejecting garbage.
pub fn parse_decimal(field: &str, s: &str) -> AppResult<Decimal> {
    Decimal::from_str(s.trim())
        .map_err(|_| AppError::validation(field, format!("'{}' is not a decimal number", s)))
}

/// Largest weekly wage, advance or payout: 10 digits, 2 of them decimal.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Largest opening balance, rate-work quantity or price: 12 digits.
pub const MAX_BALANCE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Largest day weight (overtime included).
pub const MAX_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Parse a money amount, rounded to 2 dp. Negative values are refused.
pub fn parse_amount(field: &str, s: &str) -> AppResult<Decimal> {
    check_amount(field, parse_decimal(field, s)?, MAX_BALANCE)
}

/// Parse a signed money amount (an opening balance may be owed either way).
pub fn parse_signed_amount(field: &str, s: &str) -> AppResult<Decimal> {
    check_signed_amount(field, parse_decimal(field, s)?, MAX_BALANCE)
}

pub fn ensure_non_negative(field: &str, d: Decimal) -> AppResult<()> {
    if d.is_sign_negative() && !d.is_zero() {
        return Err(AppError::validation(
            field,
            format!("{} must not be negative", d),
        ));
    }
    Ok(())
}

/// `0 <= d <= max`, returned rounded to 2 dp.
pub fn check_amount(field: &str, d: Decimal, max: Decimal) -> AppResult<Decimal> {
    ensure_non_negative(field, d)?;
    check_signed_amount(field, d, max)
}

/// `|d| <= max`, returned rounded to 2 dp.
pub fn check_signed_amount(field: &str, d: Decimal, max: Decimal) -> AppResult<Decimal> {
    let r = round_money(d);
    if r.abs() > max {
        return Err(AppError::validation(
            field,
            format!("{} is out of range (at most {})", d, max),
        ));
    }
    Ok(r)
}

/// A day weight in `0..=MAX_MULTIPLIER`, kept at 2 dp.
pub fn check_multiplier(d: Decimal) -> AppResult<Decimal> {
    ensure_non_negative("multiplier", d)?;
    let r = d.round_dp(2);
    if r > MAX_MULTIPLIER {
        return Err(AppError::validation(
            "multiplier",
            format!("{} is above the maximum of {}", d, MAX_MULTIPLIER),
        ));
    }
    Ok(r)
}

/// Render an amount with 2 dp and an optional currency symbol.
pub fn format_money(d: Decimal, symbol: &str) -> String {
    let r = round_money(d);
    if r.is_sign_negative() && !r.is_zero() {
        format!("-{}{:.2}", symbol, r.abs())
    } else {
        format!("{}{:.2}", symbol, r.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_round() {
        assert_eq!(parse_amount("x", "12.345").unwrap().to_string(), "12.34");
        assert_eq!(parse_amount("x", " 500 ").unwrap(), Decimal::from(500));
        assert!(parse_amount("x", "-1").is_err());
        assert!(parse_decimal("x", "abc").is_err());
    }

    #[test]
    fn bounds_follow_field_widths() {
        assert_eq!(MAX_AMOUNT.to_string(), "99999999.99");
        assert_eq!(MAX_BALANCE.to_string(), "9999999999.99");

        assert!(check_amount("w", MAX_AMOUNT, MAX_AMOUNT).is_ok());
        assert!(check_amount("w", MAX_AMOUNT + Decimal::new(1, 2), MAX_AMOUNT).is_err());
        assert!(parse_amount("w", "10000000000000000000000000").is_err());

        assert_eq!(
            parse_signed_amount("b", "-1500.005").unwrap(),
            Decimal::new(-150000, 2)
        );
        assert!(parse_signed_amount("b", "-10000000000").is_err());

        assert_eq!(check_multiplier(Decimal::new(15, 1)).unwrap(), Decimal::new(15, 1));
        assert!(check_multiplier(Decimal::from(1_000_000)).is_err());
        assert!(check_multiplier(Decimal::new(-5, 1)).is_err());
    }

    #[test]
    fn formatting_keeps_sign() {
        assert_eq!(format_money(Decimal::new(-15050, 2), "₹"), "-₹150.50");
        assert_eq!(format_money(Decimal::from(2300), ""), "2300.00");
        assert_eq!(format_money(Decimal::ZERO, "$"), "$0.00");
    }
}
