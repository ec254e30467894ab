//! Report rendering: a plain-text summary for the terminal or JSON.

use std::fmt;

use fisco_core::calculations::{
    DisplayFigures, FiscalSummary, ViewMode, bracket_slices, common::round_half_up, merge_scales,
};
use fisco_core::{
    BracketSlice, ContributionSide, IndirectTaxResult, IrpfResult, Regime, Region, SsResult,
    TaxpayerProfile,
};
use fisco_data::{LookupError, TaxTables};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::state::AppState;
use crate::utils::{format_eur, format_percent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub id: String,
    pub name: String,
    pub regime: Regime,
}

impl From<&Region> for RegionSummary {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.clone(),
            name: region.name.clone(),
            regime: region.regime,
        }
    }
}

/// Everything shown for one calculation.
///
/// `figures` and `indirect` are on the selected view basis; IRPF, bracket
/// and Social Security detail stay annual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub region: RegionSummary,
    pub profile: TaxpayerProfile,
    pub figures: DisplayFigures,
    pub irpf: IrpfResult,
    /// Taxable income split over the combined national and regional scale.
    pub brackets: Vec<BracketSlice>,
    pub employer_ss: SsResult,
    pub employee_ss: SsResult,
    pub indirect: IndirectTaxResult,
}

impl Report {
    pub fn build(
        tables: &TaxTables,
        state: &AppState,
    ) -> Result<Self, LookupError> {
        let region = tables.region(&state.profile.region_id)?;
        let summary =
            FiscalSummary::compute(&tables.fiscal_tables(), &state.profile, region, &state.expenses);

        let combined = match region.regime {
            Regime::Foral => region.brackets.brackets().to_vec(),
            Regime::Common => merge_scales(tables.national().brackets(), region.brackets.brackets()),
        };
        let brackets = bracket_slices(summary.irpf.taxable_income, &combined);

        let indirect = match state.view {
            ViewMode::Annual => summary.indirect_annual.clone(),
            ViewMode::Monthly => summary.indirect_monthly.clone(),
        };

        Ok(Self {
            region: region.into(),
            profile: state.profile.clone(),
            figures: summary.display(state.view),
            irpf: summary.irpf,
            brackets,
            employer_ss: summary.employer_ss,
            employee_ss: summary.employee_ss,
            indirect,
        })
    }
}

pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(f, "  {label:<34}{:>16}", format_eur(amount))
}

fn limit(value: Option<Decimal>) -> String {
    value.map(format_eur).unwrap_or_else(|| "∞".to_string())
}

impl Report {
    fn fmt_figures(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let fig = &self.figures;
        row(f, "Coste empresa", fig.employer_cost)?;
        row(f, "Salario bruto", fig.gross)?;
        row(f, "Cotización empresa", fig.employer_ss)?;
        row(f, "Cotización trabajador", fig.employee_ss)?;
        row(f, "IRPF", fig.irpf)?;
        row(f, "Salario neto", fig.net_salary)?;
        row(f, "Gastos", fig.expenses)?;
        row(f, "Impuestos indirectos", fig.indirect_taxes)?;
        writeln!(f)?;
        row(f, "Para el Estado", fig.state_share)?;
        row(f, "Para ti", fig.user_share)?;
        writeln!(
            f,
            "  {:<34}{:>16}",
            "Parte del coste empresa",
            format_percent(fig.state_share_of_cost)
        )?;
        writeln!(
            f,
            "  {:<34}{:>16}",
            format!("Neto por paga ({})", self.profile.payments.count()),
            format_eur(fig.net_per_payment)
        )
    }

    fn fmt_irpf(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let irpf = &self.irpf;
        writeln!(f, "IRPF (anual)")?;
        row(f, "Mínimo exento", irpf.exempt_minimum)?;
        row(f, "Base liquidable", irpf.taxable_income)?;
        if irpf.regime == Regime::Common {
            row(f, "Cuota estatal", irpf.national_amount)?;
        }
        row(f, "Cuota autonómica", irpf.regional_amount)?;
        writeln!(
            f,
            "  tipo efectivo {}, tipo marginal {}",
            format_percent(irpf.effective_rate),
            format_percent(irpf.marginal_rate)
        )?;
        for slice in &self.brackets {
            writeln!(
                f,
                "    {:>16} - {:<16}{:>9}{:>16}{:>14}",
                format_eur(slice.lower),
                limit(slice.upper),
                format_percent(slice.rate),
                format_eur(slice.taxed_amount),
                format_eur(slice.tax)
            )?;
        }
        Ok(())
    }

    fn fmt_social_security(
        f: &mut fmt::Formatter<'_>,
        ss: &SsResult,
    ) -> fmt::Result {
        let side = match ss.side {
            ContributionSide::Employer => "empresa",
            ContributionSide::Employee => "trabajador",
        };
        writeln!(f, "Seguridad Social, {side} (anual)")?;
        for item in &ss.per_item {
            writeln!(
                f,
                "  {:<52}{:>9}{:>16}",
                item.kind.label(),
                format_percent(item.rate),
                format_eur(item.amount)
            )?;
        }
        row(f, "Total", ss.total)
    }

    fn fmt_indirect(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let ind = &self.indirect;
        writeln!(f, "Impuestos indirectos")?;
        row(f, "IVA 4%", ind.vat4)?;
        row(f, "IVA 10%", ind.vat10)?;
        row(f, "IVA 21%", ind.vat21)?;
        row(f, "Hidrocarburos", ind.fuel_excise)?;
        row(f, "Electricidad", ind.electricity_excise)?;
        row(f, "Primas de seguros", ind.insurance_premium_tax)?;
        row(f, "Alcohol y tabaco", ind.other_excise)?;
        row(f, "Otros tributos", ind.other_direct_taxes)?;

        writeln!(f)?;
        writeln!(f, "Ticket")?;
        for line in &ind.lines {
            writeln!(
                f,
                "  {:<28}{:>14}{:>14}  {}",
                line.name,
                format_eur(line.amount),
                format_eur(round_half_up(line.total_tax())),
                line.topology_label
            )?;
        }
        Ok(())
    }
}

/// Plain-text report with Spanish labels.
impl fmt::Display for Report {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{} ({}), {} view",
            self.region.name,
            self.region.regime.as_str(),
            self.figures.view.as_str()
        )?;
        writeln!(f)?;
        self.fmt_figures(f)?;

        writeln!(f)?;
        self.fmt_irpf(f)?;

        for ss in [&self.employer_ss, &self.employee_ss] {
            writeln!(f)?;
            Self::fmt_social_security(f, ss)?;
        }

        if !self.indirect.lines.is_empty() {
            writeln!(f)?;
            self.fmt_indirect(f)?;
        }
        Ok(())
    }
}

pub fn render_text(report: &Report) -> String {
    report.to_string()
}

pub fn render_regions(tables: &TaxTables) -> String {
    tables
        .regions()
        .iter()
        .map(|region| {
            format!(
                "{:<20}{:<32}{}\n",
                region.id,
                region.name,
                region.regime.as_str()
            )
        })
        .collect()
}
