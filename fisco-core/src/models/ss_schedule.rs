use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Social Security contribution items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    CommonContingencies,
    Unemployment,
    VocationalTraining,
    /// FOGASA, employer only.
    WageGuaranteeFund,
    /// AT/EP, employer only.
    OccupationalAccident,
    /// MEI.
    IntergenerationalEquity,
}

impl ContributionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CommonContingencies => "Contingencias comunes",
            Self::Unemployment => "Desempleo",
            Self::VocationalTraining => "Formación profesional",
            Self::WageGuaranteeFund => "FOGASA",
            Self::OccupationalAccident => "Accidentes de trabajo y enfermedades profesionales",
            Self::IntergenerationalEquity => "Mecanismo de equidad intergeneracional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSide {
    Employer,
    Employee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsContribution {
    pub kind: ContributionKind,
    pub rate: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SsScheduleError {
    #[error("contribution rate for {kind:?} must be between 0 and 1, got {rate}")]
    InvalidRate { kind: ContributionKind, rate: Decimal },

    #[error("contribution {0:?} appears more than once")]
    Duplicate(ContributionKind),
}

/// Flat contribution rates for one side of the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SsSchedule {
    side: ContributionSide,
    items: Vec<SsContribution>,
}

impl SsSchedule {
    pub fn new(
        side: ContributionSide,
        items: Vec<SsContribution>,
    ) -> Result<Self, SsScheduleError> {
        for (index, item) in items.iter().enumerate() {
            if item.rate < Decimal::ZERO || item.rate > Decimal::ONE {
                return Err(SsScheduleError::InvalidRate {
                    kind: item.kind,
                    rate: item.rate,
                });
            }
            if items[..index].iter().any(|other| other.kind == item.kind) {
                return Err(SsScheduleError::Duplicate(item.kind));
            }
        }
        Ok(Self { side, items })
    }

    pub fn side(&self) -> ContributionSide {
        self.side
    }

    pub fn items(&self) -> &[SsContribution] {
        &self.items
    }

    /// Sum of all item rates.
    pub fn total_rate(&self) -> Decimal {
        self.items.iter().map(|i| i.rate).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn total_rate_sums_items() {
        let schedule = SsSchedule::new(
            ContributionSide::Employee,
            vec![
                SsContribution {
                    kind: ContributionKind::CommonContingencies,
                    rate: dec!(0.047),
                },
                SsContribution {
                    kind: ContributionKind::Unemployment,
                    rate: dec!(0.0155),
                },
            ],
        )
        .unwrap();

        assert_eq!(schedule.total_rate(), dec!(0.0625));
        assert_eq!(schedule.side(), ContributionSide::Employee);
    }

    #[test]
    fn rejects_rate_above_one() {
        let result = SsSchedule::new(
            ContributionSide::Employer,
            vec![SsContribution {
                kind: ContributionKind::Unemployment,
                rate: dec!(1.5),
            }],
        );

        assert_eq!(
            result,
            Err(SsScheduleError::InvalidRate {
                kind: ContributionKind::Unemployment,
                rate: dec!(1.5)
            })
        );
    }

    #[test]
    fn rejects_duplicated_items() {
        let item = SsContribution {
            kind: ContributionKind::VocationalTraining,
            rate: dec!(0.006),
        };
        let result = SsSchedule::new(ContributionSide::Employer, vec![item, item]);

        assert_eq!(
            result,
            Err(SsScheduleError::Duplicate(ContributionKind::VocationalTraining))
        );
    }
}
