//! Combines the three engines into the figures a results screen shows.
//!
//! Salary-side figures are computed annually. Expenses are entered per month,
//! so their taxes are annualized (× 12) before being combined with salary
//! figures:
//!
//! | Figure        | Formula                                              |
//! |---------------|------------------------------------------------------|
//! | employer cost | gross + employer SS                                  |
//! | net salary    | gross − IRPF − employee SS                           |
//! | state share   | employer SS + employee SS + IRPF + indirect taxes    |
//! | user share    | net salary − indirect taxes                          |
//!
//! [`FiscalSummary::display`] converts to the selected [`ViewMode`]. The
//! payment count never changes a tax figure; it only drives
//! [`DisplayFigures::net_per_payment`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{ratio_or_zero, round_half_up};
use crate::calculations::indirect::indirect_breakdown;
use crate::calculations::irpf::{ExemptMinimumConfig, IrpfEngine};
use crate::calculations::social_security::compute_ss;
use crate::{
    Bracket, ExpenseCategory, IndirectTaxResult, IrpfResult, PaymentCount, Region, SsResult,
    SsSchedule, TaxpayerProfile,
};

pub const MONTHS_PER_YEAR: u8 = 12;

/// Basis on which figures are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Annual,
    Monthly,
}

impl ViewMode {
    /// Divisor applied to annual salary-side figures.
    pub fn salary_divisor(&self) -> Decimal {
        match self {
            Self::Annual => Decimal::ONE,
            Self::Monthly => Decimal::from(MONTHS_PER_YEAR),
        }
    }

    /// Multiplier applied to monthly expense-side figures.
    pub fn expense_multiplier(&self) -> Decimal {
        match self {
            Self::Annual => Decimal::from(MONTHS_PER_YEAR),
            Self::Monthly => Decimal::ONE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
        }
    }
}

/// Read-only tables the summary needs, borrowed from the table store.
#[derive(Debug, Clone, Copy)]
pub struct FiscalTables<'a> {
    pub national: &'a [Bracket],
    pub minimum: ExemptMinimumConfig,
    pub employer: &'a SsSchedule,
    pub employee: &'a SsSchedule,
}

/// Annual results of one calculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalSummary {
    pub gross: Decimal,
    pub payments: PaymentCount,
    pub irpf: IrpfResult,
    pub employer_ss: SsResult,
    pub employee_ss: SsResult,
    /// Indirect taxes on the monthly expenses as entered.
    pub indirect_monthly: IndirectTaxResult,
    /// `indirect_monthly` × 12.
    pub indirect_annual: IndirectTaxResult,
    pub employer_cost: Decimal,
    pub net_salary: Decimal,
    pub state_share: Decimal,
    pub user_share: Decimal,
}

impl FiscalSummary {
    /// Runs every engine against one snapshot of the inputs.
    pub fn compute(
        tables: &FiscalTables<'_>,
        profile: &TaxpayerProfile,
        region: &Region,
        expenses: &[ExpenseCategory],
    ) -> Self {
        if profile.region_id != region.id {
            warn!(
                profile_region = %profile.region_id,
                region = %region.id,
                "profile region differs from the region supplied, using the supplied region"
            );
        }

        let gross = profile.gross_annual_salary;
        let irpf = IrpfEngine::new(tables.national, tables.minimum).calculate_for(profile, region);
        let employer_ss = compute_ss(gross, tables.employer);
        let employee_ss = compute_ss(gross, tables.employee);
        let indirect_monthly = indirect_breakdown(expenses);
        let indirect_annual = indirect_monthly.scaled(Decimal::from(MONTHS_PER_YEAR));

        let employer_cost = gross + employer_ss.total;
        let net_salary = gross - irpf.annual_amount - employee_ss.total;
        let state_share =
            employer_ss.total + employee_ss.total + irpf.annual_amount + indirect_annual.total;
        let user_share = net_salary - indirect_annual.total;

        debug!(
            %gross,
            %employer_cost,
            %net_salary,
            %state_share,
            %user_share,
            "fiscal summary computed"
        );

        Self {
            gross,
            payments: profile.payments,
            irpf,
            employer_ss,
            employee_ss,
            indirect_monthly,
            indirect_annual,
            employer_cost,
            net_salary,
            state_share,
            user_share,
        }
    }

    /// Rounded figures on the requested basis.
    pub fn display(
        &self,
        view: ViewMode,
    ) -> DisplayFigures {
        let salary = |value: Decimal| round_half_up(value / view.salary_divisor());
        let expense = |value: Decimal| round_half_up(value * view.expense_multiplier());

        DisplayFigures {
            view,
            employer_cost: salary(self.employer_cost),
            gross: salary(self.gross),
            employer_ss: salary(self.employer_ss.total),
            employee_ss: salary(self.employee_ss.total),
            irpf: salary(self.irpf.annual_amount),
            net_salary: salary(self.net_salary),
            expenses: expense(self.indirect_monthly.spent),
            indirect_taxes: expense(self.indirect_monthly.total),
            state_share: salary(self.state_share),
            user_share: salary(self.user_share),
            state_share_of_cost: ratio_or_zero(self.state_share, self.employer_cost),
            irpf_effective_rate: self.irpf.effective_rate,
            net_per_payment: round_half_up(self.net_salary / self.payments.as_decimal()),
        }
    }
}

/// Hero figures, rounded to cents, on one display basis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFigures {
    pub view: ViewMode,
    pub employer_cost: Decimal,
    pub gross: Decimal,
    pub employer_ss: Decimal,
    pub employee_ss: Decimal,
    pub irpf: Decimal,
    pub net_salary: Decimal,
    pub expenses: Decimal,
    pub indirect_taxes: Decimal,
    pub state_share: Decimal,
    pub user_share: Decimal,
    /// State share as a fraction of employer cost.
    pub state_share_of_cost: Decimal,
    pub irpf_effective_rate: Decimal,
    /// Annual net divided by the number of payments.
    pub net_per_payment: Decimal,
}
