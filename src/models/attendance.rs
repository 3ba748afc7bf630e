use super::payment_type::PaymentType;
use crate::errors::{AppError, AppResult};
use crate::utils::money::{check_multiplier, parse_amount, parse_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize)]
pub struct LabourAttendance {
    pub id: String,
    pub daily_entry_id: String,
    pub labour_id: String,
    pub is_present: bool,
    pub advance_taken: Decimal,
    pub payment_type: PaymentType,
    /// Day weight: 0.5 half day, 1 full day, >1 overtime.
    pub multiplier: Decimal,
}

/// One attendance line as submitted for a day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendanceInput {
    pub labour_id: String,
    pub is_present: bool,
    #[serde(default)]
    pub advance_taken: Decimal,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default = "default_multiplier")]
    pub multiplier: Decimal,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

impl AttendanceInput {
    pub fn present(labour_id: impl Into<String>) -> Self {
        Self {
            labour_id: labour_id.into(),
            is_present: true,
            advance_taken: Decimal::ZERO,
            payment_type: PaymentType::default(),
            multiplier: Decimal::ONE,
        }
    }

    pub fn absent(labour_id: impl Into<String>) -> Self {
        Self {
            is_present: false,
            ..Self::present(labour_id)
        }
    }

    pub fn with_advance(mut self, advance: Decimal) -> Self {
        self.advance_taken = advance;
        self
    }

    pub fn with_multiplier(mut self, multiplier: Decimal) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// CLI form: `LABOUR_ID:P|A[:ADVANCE[:MULTIPLIER[:bank|cash]]]`
impl FromStr for AttendanceInput {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 5 || parts[0].trim().is_empty() {
            return Err(AppError::validation(
                "attendance",
                format!("'{}' must look like LABOUR_ID:P|A[:ADVANCE[:MULTIPLIER[:bank|cash]]]", s),
            ));
        }

        let is_present = match parts[1].to_uppercase().as_str() {
            "P" | "PRESENT" | "1" | "Y" => true,
            "A" | "ABSENT" | "0" | "N" => false,
            other => {
                return Err(AppError::validation(
                    "attendance",
                    format!("presence flag '{}' must be P or A", other),
                ));
            }
        };

        let mut row = if is_present {
            AttendanceInput::present(parts[0].trim())
        } else {
            AttendanceInput::absent(parts[0].trim())
        };

        if let Some(adv) = parts.get(2) {
            row.advance_taken = parse_amount("advance_taken", adv)?;
        }
        if let Some(mult) = parts.get(3) {
            row.multiplier = check_multiplier(parse_decimal("multiplier", mult)?)?;
        }
        if let Some(pt) = parts.get(4) {
            row.payment_type = PaymentType::from_code(pt).ok_or_else(|| {
                AppError::validation("payment_type", format!("unknown payment type '{}'", pt))
            })?;
        }

        Ok(row)
    }
}
