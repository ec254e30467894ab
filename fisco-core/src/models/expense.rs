use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spanish VAT (IVA) rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VatRate {
    Zero,
    /// Super-reduced, 4%.
    Four,
    /// Reduced, 10%.
    Ten,
    /// General, 21%.
    #[default]
    TwentyOne,
}

impl VatRate {
    pub fn percent(&self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Four => 4,
            Self::Ten => 10,
            Self::TwentyOne => 21,
        }
    }

    /// The rate as a fraction, e.g. `0.21`.
    pub fn fraction(&self) -> Decimal {
        Decimal::from(self.percent()) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<u8> for VatRate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            4 => Ok(Self::Four),
            10 => Ok(Self::Ten),
            21 => Ok(Self::TwentyOne),
            other => Err(format!("VAT rate must be 0, 4, 10 or 21, got {other}")),
        }
    }
}

impl From<VatRate> for u8 {
    fn from(value: VatRate) -> Self {
        value.percent()
    }
}

/// How the taxes embedded in a line's price are structured.
///
/// Each variant carries exactly the parameters its reverse computation needs.
/// Rates are fractions (`0.08` for 8%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaxTopology {
    /// VAT only, at the line's declared rate.
    #[default]
    Standard,
    /// Hydrocarbon excise levied per liter, inside the VAT base.
    FuelExcise {
        price_per_unit: Decimal,
        excise_per_unit: Decimal,
    },
    /// Electricity tax on the pre-tax base, compounded under VAT.
    ElectricityExcise { special_rate: Decimal },
    /// Gas hydrocarbon tax, approximated as a share of the bill.
    GasExcise { special_rate: Decimal },
    /// Insurance premium tax; premiums carry no VAT.
    InsurancePremium { special_rate: Decimal },
    /// Alcohol excise as a share of the full price.
    AlcoholExcise { special_rate: Decimal },
    /// Tobacco excise as a share of the pre-VAT price.
    TobaccoExcise { special_rate: Decimal },
    /// The whole amount is a tax (municipal levies and similar).
    DirectLevy,
    /// No embedded tax.
    Exempt,
}

/// Topology parameters the reverse computation cannot work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("price per unit must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("excise per unit must not be negative, got {0}")]
    NegativeExcise(Decimal),

    #[error("special rate must not be negative, got {0}")]
    NegativeRate(Decimal),
}

impl TaxTopology {
    /// Checks the parameters that end up as divisors or factors.
    ///
    /// A fuel price must be positive and the other parameters non-negative.
    pub fn validate(&self) -> Result<(), TopologyError> {
        match *self {
            Self::FuelExcise {
                price_per_unit,
                excise_per_unit,
            } => {
                if price_per_unit <= Decimal::ZERO {
                    return Err(TopologyError::NonPositivePrice(price_per_unit));
                }
                if excise_per_unit < Decimal::ZERO {
                    return Err(TopologyError::NegativeExcise(excise_per_unit));
                }
                Ok(())
            }
            Self::ElectricityExcise { special_rate }
            | Self::GasExcise { special_rate }
            | Self::InsurancePremium { special_rate }
            | Self::AlcoholExcise { special_rate }
            | Self::TobaccoExcise { special_rate } => {
                if special_rate < Decimal::ZERO {
                    return Err(TopologyError::NegativeRate(special_rate));
                }
                Ok(())
            }
            Self::Standard | Self::DirectLevy | Self::Exempt => Ok(()),
        }
    }

    /// Human label of the special tax, shown next to each ticket line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "IVA",
            Self::FuelExcise { .. } => "Impuesto sobre hidrocarburos",
            Self::ElectricityExcise { .. } => "Impuesto especial sobre la electricidad",
            Self::GasExcise { .. } => "Impuesto sobre hidrocarburos (gas)",
            Self::InsurancePremium { .. } => "Impuesto sobre primas de seguros",
            Self::AlcoholExcise { .. } => "Impuesto sobre el alcohol",
            Self::TobaccoExcise { .. } => "Impuesto sobre las labores del tabaco",
            Self::DirectLevy => "Tributo directo",
            Self::Exempt => "Exento",
        }
    }
}

/// One tax-inclusive expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub vat_rate: VatRate,
    #[serde(default)]
    pub topology: TaxTopology,
}

impl ExpenseLine {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        vat_rate: VatRate,
        topology: TaxTopology,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            vat_rate,
            topology,
        }
    }

    /// A plain VAT line.
    pub fn standard(
        name: impl Into<String>,
        amount: Decimal,
        vat_rate: VatRate,
    ) -> Self {
        Self::new(name, amount, vat_rate, TaxTopology::Standard)
    }
}

/// Approximate VAT split for a category entered as a single total.
///
/// Percentages are of the total; whatever they leave out of 100 is treated
/// as untaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSplit {
    pub total: Decimal,
    pub vat4_pct: Decimal,
    pub vat10_pct: Decimal,
    pub vat21_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lines: Vec<ExpenseLine>,
    #[serde(default)]
    pub fallback: Option<FallbackSplit>,
}

impl ExpenseCategory {
    pub fn with_lines(
        id: impl Into<String>,
        name: impl Into<String>,
        lines: Vec<ExpenseLine>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lines,
            fallback: None,
        }
    }

    pub fn with_fallback(
        id: impl Into<String>,
        name: impl Into<String>,
        fallback: FallbackSplit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lines: Vec::new(),
            fallback: Some(fallback),
        }
    }

    /// Sum of positive amounts, or the fallback total when there are no lines.
    pub fn total(&self) -> Decimal {
        if self.lines.is_empty() {
            return self
                .fallback
                .map(|f| f.total.max(Decimal::ZERO))
                .unwrap_or_default();
        }
        self.lines
            .iter()
            .map(|l| l.amount)
            .filter(|a| *a > Decimal::ZERO)
            .sum()
    }
}
