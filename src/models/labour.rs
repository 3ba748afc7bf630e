use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabourType {
    DailyWork, // daily
    RateWork,  // rate
}

impl LabourType {
    pub fn label(&self) -> &'static str {
        match self {
            LabourType::DailyWork => "Daily Work",
            LabourType::RateWork => "Rate Work",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LabourType::DailyWork => "daily",
            LabourType::RateWork => "rate",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(LabourType::DailyWork),
            "rate" => Some(LabourType::RateWork),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "daily" | "d" | "daily_work" => Some(LabourType::DailyWork),
            "rate" | "r" | "rate_work" => Some(LabourType::RateWork),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Labour {
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub previous_balance: Decimal, // ⇔ labours.previous_balance (TEXT decimal)
    pub kind: LabourType,          // ⇔ labours.type ('daily' | 'rate')
    pub gender: Gender,            // ⇔ labours.gender ('M' | 'F')
    pub pan_number: String,
    pub aadhar_number: String,
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub branch_name: String,
    pub photo: String,
}

/// Fields accepted when creating or updating a labourer.
/// `None` on update means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct LabourFields {
    pub name: Option<String>,
    pub previous_balance: Option<Decimal>,
    pub kind: Option<LabourType>,
    pub gender: Option<Gender>,
    pub pan_number: Option<String>,
    pub aadhar_number: Option<String>,
    pub bank_account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub branch_name: Option<String>,
    pub photo: Option<String>,
}
