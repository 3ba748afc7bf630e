//! Flat facts fetched for the balance aggregation pass.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One attendance row, joined with its day and its own week's wage.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceFact {
    pub labour_id: String,
    pub week_id: String,
    pub date: NaiveDate,
    pub is_present: bool,
    pub advance_taken: Decimal,
    pub multiplier: Decimal,
    /// Wage of the assignment linking the labourer to *this row's* week.
    /// `None` when no such assignment exists.
    pub wage: Option<Decimal>,
}

/// One weekly payout, tagged with the start of the week it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFact {
    pub labour_id: String,
    pub week_start: NaiveDate,
    pub amount: Decimal,
}
