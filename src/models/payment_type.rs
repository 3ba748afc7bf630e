use serde::{Deserialize, Serialize};

/// How money changed hands: attendance advances, weekly payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    #[default]
    BankTransfer,
    Cash,
}

impl PaymentType {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::BankTransfer => "Bank Transfer",
            PaymentType::Cash => "Cash",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentType::BankTransfer => "bank",
            PaymentType::Cash => "cash",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "bank" => Some(PaymentType::BankTransfer),
            "cash" => Some(PaymentType::Cash),
            _ => None,
        }
    }

    /// Helper: accept CLI/config spellings (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "bank" | "b" | "bank_transfer" | "transfer" => Some(PaymentType::BankTransfer),
            "cash" | "c" => Some(PaymentType::Cash),
            _ => None,
        }
    }
}
