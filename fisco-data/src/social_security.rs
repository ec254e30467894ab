//! General-regime Social Security rates for the current year.

use fisco_core::{ContributionKind, ContributionSide, SsContribution, SsSchedule, SsScheduleError};
use rust_decimal_macros::dec;

pub fn employer_schedule() -> Result<SsSchedule, SsScheduleError> {
    SsSchedule::new(
        ContributionSide::Employer,
        vec![
            SsContribution {
                kind: ContributionKind::CommonContingencies,
                rate: dec!(0.236),
            },
            SsContribution {
                kind: ContributionKind::Unemployment,
                rate: dec!(0.055),
            },
            SsContribution {
                kind: ContributionKind::WageGuaranteeFund,
                rate: dec!(0.002),
            },
            SsContribution {
                kind: ContributionKind::VocationalTraining,
                rate: dec!(0.006),
            },
            SsContribution {
                kind: ContributionKind::IntergenerationalEquity,
                rate: dec!(0.0067),
            },
            SsContribution {
                kind: ContributionKind::OccupationalAccident,
                rate: dec!(0.015),
            },
        ],
    )
}

pub fn employee_schedule() -> Result<SsSchedule, SsScheduleError> {
    SsSchedule::new(
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
            SsContribution {
                kind: ContributionKind::VocationalTraining,
                rate: dec!(0.001),
            },
            SsContribution {
                kind: ContributionKind::IntergenerationalEquity,
                rate: dec!(0.0013),
            },
        ],
    )
}
