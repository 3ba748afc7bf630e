use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// A piecework job billed by quantity.
#[derive(Debug, Clone, Serialize)]
pub struct RateWork {
    pub id: String,
    pub labour_id: String,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub cost_per_unit: Decimal,
    pub is_completed: bool,
    pub date_created: NaiveDate,
}

impl RateWork {
    pub fn total_cost(&self) -> Decimal {
        (self.quantity * self.cost_per_unit).round_dp(2)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RateWorkFields {
    pub name: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub cost_per_unit: Option<Decimal>,
    pub is_completed: Option<bool>,
}

/// Discriminant of the shared `payments` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentKind {
    RateWork,
}

impl PaymentKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentKind::RateWork => "rate_work",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "rate_work" => Some(PaymentKind::RateWork),
            _ => None,
        }
    }
}

/// A row of the `payments` table.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: String,
    pub kind: PaymentKind,
    pub labour_id: String,
    pub amount: Decimal,
    pub note: String,
    pub date_created: NaiveDate,
}

/// Rate work for one labourer with the money already paid against it.
#[derive(Debug, Clone, Serialize)]
pub struct RateWorkSummary {
    pub labour_id: String,
    pub works: Vec<RateWork>,
    pub payments: Vec<Payment>,
    pub total_cost: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
}
