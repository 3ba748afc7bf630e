use super::attendance::LabourAttendance;
use super::labour::{Gender, LabourType};
use super::week::{DailyEntry, Week};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Ledger figures for one assignment of a week.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabourBalance {
    pub assignment_id: String,
    pub labour_id: String,
    pub name: String,
    pub kind: LabourType,
    pub gender: Gender,
    pub weekly_daily_wage: Decimal,
    pub previous_balance: Decimal,

    pub historical_earned: Decimal,
    pub historical_advance: Decimal,
    pub historical_paid: Decimal,
    pub opening_balance: Decimal,

    /// Sum of multipliers over present days of this week.
    pub days_present: Decimal,
    pub current_earned: Decimal,
    pub current_advance: Decimal,
    pub current_week_net: Decimal,
    pub total_due_to_date: Decimal,

    /// This week's payout (0 when none recorded).
    pub amount_paid: Decimal,
    pub balance_after_payment: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayDetail {
    pub entry: DailyEntry,
    /// Per-day rule only; see `week_locked` for the week-level lock.
    pub is_editable: bool,
    /// An ordinary submit is refused while this is set, whatever `is_editable` says.
    pub week_locked: bool,
    pub attendance: Vec<LabourAttendance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekDetail {
    pub week: Week,
    pub end_date: NaiveDate,
    pub days: Vec<DayDetail>,
    pub labours: Vec<LabourBalance>,
}
