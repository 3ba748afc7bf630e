use super::payment_type::PaymentType;
use crate::errors::{AppError, AppResult};
use crate::utils::money::parse_amount;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// A labourer on a week's roster at a wage fixed for that week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekLabourAssignment {
    pub id: String,
    pub week_id: String,
    pub labour_id: String,
    pub weekly_daily_wage: Decimal,
}

/// Money actually disbursed to a labourer for one week.
#[derive(Debug, Clone, Serialize)]
pub struct LabourPayment {
    pub id: String,
    pub assignment_id: String,
    pub amount_paid: Decimal,
    pub payment_type: PaymentType,
}

/// One line of a roster update: who, and at what daily wage.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub labour_id: String,
    pub weekly_daily_wage: Decimal,
}

impl RosterEntry {
    pub fn new(labour_id: impl Into<String>, weekly_daily_wage: Decimal) -> Self {
        Self {
            labour_id: labour_id.into(),
            weekly_daily_wage,
        }
    }
}

/// CLI form: `LABOUR_ID:WAGE`
impl FromStr for RosterEntry {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let (id, wage) = s
            .rsplit_once(':')
            .filter(|(id, _)| !id.trim().is_empty())
            .ok_or_else(|| {
                AppError::validation("roster", format!("'{}' must look like LABOUR_ID:WAGE", s))
            })?;
        Ok(RosterEntry::new(
            id.trim(),
            parse_amount("weekly_daily_wage", wage)?,
        ))
    }
}
