//! Resolved inputs for one calculation.
//!
//! Values come from the config file and are overridden by command-line flags.

use fisco_core::calculations::ViewMode;
use fisco_core::{ExpenseCategory, PaymentCount, TaxpayerProfile};
use rust_decimal::Decimal;

use crate::config::{ConfigError, ConfigFile};

/// Values given on the command line. `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub gross: Option<Decimal>,
    pub region: Option<String>,
    pub children: Option<u32>,
    pub children_under_three: Option<u32>,
    pub payments: Option<PaymentCount>,
    pub view: Option<ViewMode>,
    /// Replaces every category from the config file.
    pub expenses: Option<Vec<ExpenseCategory>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub profile: TaxpayerProfile,
    pub view: ViewMode,
    /// Monthly expenses.
    pub expenses: Vec<ExpenseCategory>,
}

impl AppState {
    /// Merges the config file with the command-line overrides.
    ///
    /// Gross salary and region are required from one source or the other.
    pub fn resolve(
        config: ConfigFile,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let section = config.profile;
        let gross = overrides
            .gross
            .or(section.gross_annual_salary)
            .ok_or(ConfigError::Missing("gross salary"))?;
        let region = overrides
            .region
            .or(section.region)
            .ok_or(ConfigError::Missing("region"))?;

        let mut profile = TaxpayerProfile::new(gross, region);
        profile.children = overrides.children.or(section.children).unwrap_or_default();
        profile.children_under_three = overrides
            .children_under_three
            .or(section.children_under_three)
            .unwrap_or_default();
        profile.payments = overrides.payments.or(section.payments).unwrap_or_default();
        profile.marital_status = section.marital_status.unwrap_or_default();
        profile.disability = section.disability.unwrap_or_default();

        Ok(Self {
            profile,
            view: overrides.view.or(config.view).unwrap_or_default(),
            expenses: overrides.expenses.unwrap_or(config.categories),
        })
    }
}
