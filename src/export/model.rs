use crate::models::week::Week;
use crate::models::week_detail::LabourBalance;
use rust_decimal::Decimal;
use serde::Serialize;

/// One exported line: a labourer's ledger for one week.
/// Amounts are pre-formatted with 2 decimals so every format agrees.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LedgerRow {
    pub week_start: String,
    pub week_end: String,
    pub labour_id: String,
    pub name: String,
    pub kind: String,
    pub weekly_daily_wage: String,
    pub previous_balance: String,
    pub historical_earned: String,
    pub historical_advance: String,
    pub historical_paid: String,
    pub opening_balance: String,
    pub days_present: String,
    pub current_earned: String,
    pub current_advance: String,
    pub current_week_net: String,
    pub total_due_to_date: String,
    pub amount_paid: String,
    pub balance_after_payment: String,
}

fn amount(d: Decimal) -> String {
    format!("{:.2}", d)
}

impl LedgerRow {
    pub fn from_balance(week: &Week, b: &LabourBalance) -> Self {
        Self {
            week_start: week.start_date.to_string(),
            week_end: week.end_date().to_string(),
            labour_id: b.labour_id.clone(),
            name: b.name.clone(),
            kind: b.kind.label().to_string(),
            weekly_daily_wage: amount(b.weekly_daily_wage),
            previous_balance: amount(b.previous_balance),
            historical_earned: amount(b.historical_earned),
            historical_advance: amount(b.historical_advance),
            historical_paid: amount(b.historical_paid),
            opening_balance: amount(b.opening_balance),
            days_present: b.days_present.normalize().to_string(),
            current_earned: amount(b.current_earned),
            current_advance: amount(b.current_advance),
            current_week_net: amount(b.current_week_net),
            total_due_to_date: amount(b.total_due_to_date),
            amount_paid: amount(b.amount_paid),
            balance_after_payment: amount(b.balance_after_payment),
        }
    }

    pub(crate) fn cells(&self) -> Vec<&str> {
        vec![
            self.week_start.as_str(),
            self.week_end.as_str(),
            self.labour_id.as_str(),
            self.name.as_str(),
            self.kind.as_str(),
            self.weekly_daily_wage.as_str(),
            self.previous_balance.as_str(),
            self.historical_earned.as_str(),
            self.historical_advance.as_str(),
            self.historical_paid.as_str(),
            self.opening_balance.as_str(),
            self.days_present.as_str(),
            self.current_earned.as_str(),
            self.current_advance.as_str(),
            self.current_week_net.as_str(),
            self.total_due_to_date.as_str(),
            self.amount_paid.as_str(),
            self.balance_after_payment.as_str(),
        ]
    }
}

/// Column headers, in `cells()` order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "week_start",
        "week_end",
        "labour_id",
        "name",
        "kind",
        "weekly_daily_wage",
        "previous_balance",
        "historical_earned",
        "historical_advance",
        "historical_paid",
        "opening_balance",
        "days_present",
        "current_earned",
        "current_advance",
        "current_week_net",
        "total_due_to_date",
        "amount_paid",
        "balance_after_payment",
    ]
}

/// Columns holding numbers (written as numbers in XLSX).
pub(crate) fn is_numeric_column(idx: usize) -> bool {
    idx >= 5
}
