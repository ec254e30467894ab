use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of salary payments per year.
///
/// Only affects how annual figures are split for display; tax is always
/// computed on the annual gross.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentCount {
    #[default]
    Twelve,
    Fourteen,
}

impl PaymentCount {
    pub fn count(&self) -> u8 {
        match self {
            Self::Twelve => 12,
            Self::Fourteen => 14,
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.count())
    }
}

impl TryFrom<u8> for PaymentCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(Self::Twelve),
            14 => Ok(Self::Fourteen),
            other => Err(format!("payment count must be 12 or 14, got {other}")),
        }
    }
}

impl From<PaymentCount> for u8 {
    fn from(value: PaymentCount) -> Self {
        value.count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Widowed,
    Separated,
}

/// Declared disability degree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityLevel {
    #[default]
    None,
    /// 33% to 64%.
    Moderate,
    /// 65% or more.
    Severe,
}

/// The taxpayer inputs consumed by the engines.
///
/// `marital_status` and `disability` are carried through but do not change
/// any computed figure under the current tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    pub gross_annual_salary: Decimal,
    #[serde(default)]
    pub payments: PaymentCount,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub children_under_three: u32,
    pub region_id: String,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub disability: DisabilityLevel,
}

impl TaxpayerProfile {
    /// A single, childless taxpayer paid in twelve instalments.
    pub fn new(
        gross_annual_salary: Decimal,
        region_id: impl Into<String>,
    ) -> Self {
        Self {
            gross_annual_salary,
            payments: PaymentCount::default(),
            children: 0,
            children_under_three: 0,
            region_id: region_id.into(),
            marital_status: MaritalStatus::default(),
            disability: DisabilityLevel::default(),
        }
    }
}
