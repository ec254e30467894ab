//! Social Security contributions on a gross annual salary.
//!
//! Every item is a flat percentage of gross; there is no progressivity and no
//! contribution base cap or floor. Employer and employee schedules differ in
//! their items, so each side is computed from its own [`SsSchedule`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_half_up};
use crate::{SsItemAmount, SsResult, SsSchedule};

/// Applies `schedule` to `gross`.
///
/// Each item is rounded to cents and the total is the sum of the rounded
/// items. A negative gross is treated as zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use fisco_core::calculations::compute_ss;
/// use fisco_core::{ContributionKind, ContributionSide, SsContribution, SsSchedule};
///
/// let schedule = SsSchedule::new(
///     ContributionSide::Employee,
///     vec![
///         SsContribution { kind: ContributionKind::CommonContingencies, rate: dec!(0.047) },
///         SsContribution { kind: ContributionKind::Unemployment, rate: dec!(0.0155) },
///     ],
/// )
/// .unwrap();
///
/// let result = compute_ss(dec!(30000), &schedule);
/// assert_eq!(result.total, dec!(1875.00));
/// ```
pub fn compute_ss(
    gross: Decimal,
    schedule: &SsSchedule,
) -> SsResult {
    if gross < Decimal::ZERO {
        warn!(%gross, "negative gross salary, contributions computed on zero");
    }
    let base = non_negative(gross);

    let per_item: Vec<SsItemAmount> = schedule
        .items()
        .iter()
        .map(|item| SsItemAmount {
            kind: item.kind,
            rate: item.rate,
            amount: round_half_up(base * item.rate),
        })
        .collect();
    let total = per_item.iter().map(|i| i.amount).sum();

    debug!(side = ?schedule.side(), %total, items = per_item.len(), "social security calculated");

    SsResult {
        side: schedule.side(),
        per_item,
        total,
    }
}
