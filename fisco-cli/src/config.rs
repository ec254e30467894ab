//! TOML input file.
//!
//! ```toml
//! view = "monthly"
//!
//! [profile]
//! gross_annual_salary = 30000
//! region = "madrid"
//! children = 1
//! payments = 14
//!
//! [[categories]]
//! id = "vivienda"
//! name = "Vivienda"
//!
//! [[categories.lines]]
//! name = "Electricidad"
//! amount = "65.00"
//! topology = { kind = "electricity-excise", special_rate = "0.0511269632" }
//!
//! [[categories]]
//! id = "ocio"
//! name = "Ocio"
//! fallback = { total = 150, vat4_pct = 0, vat10_pct = 60, vat21_pct = 40 }
//! ```
//!
//! Every section is optional; missing values can be supplied on the command
//! line. Amounts may be written as integers or quoted decimals.

use std::path::{Path, PathBuf};

use fisco_core::calculations::ViewMode;
use fisco_core::{
    DisabilityLevel, ExpenseCategory, MaritalStatus, PaymentCount, TopologyError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no {0} given; set it in the config file or on the command line")]
    Missing(&'static str),

    #[error("category '{category}', line '{line}': {source}")]
    InvalidLine {
        category: String,
        line: String,
        #[source]
        source: TopologyError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSection {
    pub gross_annual_salary: Option<Decimal>,
    pub region: Option<String>,
    pub children: Option<u32>,
    pub children_under_three: Option<u32>,
    pub payments: Option<PaymentCount>,
    pub marital_status: Option<MaritalStatus>,
    pub disability: Option<DisabilityLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub profile: ProfileSection,
    pub view: Option<ViewMode>,
    #[serde(default)]
    pub categories: Vec<ExpenseCategory>,
}

impl ConfigFile {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate_lines()?;
        debug!(categories = config.categories.len(), "config parsed");
        Ok(config)
    }

    fn validate_lines(&self) -> Result<(), ConfigError> {
        for category in &self.categories {
            for line in &category.lines {
                line.topology
                    .validate()
                    .map_err(|source| ConfigError::InvalidLine {
                        category: category.id.clone(),
                        line: line.name.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use fisco_core::{ExpenseLine, FallbackSplit, TaxTopology, VatRate};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_is_valid() {
        let config = ConfigFile::from_toml("").expect("empty config");

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn profile_section() {
        let text = r#"
            view = "monthly"

            [profile]
            gross_annual_salary = 45000
            region = "valencia"
            children = 2
            children_under_three = 1
            payments = 14
            marital_status = "married"
        "#;

        let config = ConfigFile::from_toml(text).expect("valid config");

        assert_eq!(config.view, Some(ViewMode::Monthly));
        assert_eq!(
            config.profile,
            ProfileSection {
                gross_annual_salary: Some(dec!(45000)),
                region: Some("valencia".to_string()),
                children: Some(2),
                children_under_three: Some(1),
                payments: Some(PaymentCount::Fourteen),
                marital_status: Some(MaritalStatus::Married),
                disability: None,
            }
        );
    }

    #[test]
    fn categories_with_lines_and_fallback() {
        let text = r#"
            [[categories]]
            id = "transporte"
            name = "Transporte"

            [[categories.lines]]
            name = "Gasolina"
            amount = "90.00"
            topology = { kind = "fuel-excise", price_per_unit = "1.55", excise_per_unit = "0.473" }

            [[categories.lines]]
            name = "Abono"
            amount = 20
            vat_rate = 10

            [[categories]]
            id = "ocio"
            name = "Ocio"
            fallback = { total = 150, vat4_pct = 0, vat10_pct = 60, vat21_pct = 40 }
        "#;

        let config = ConfigFile::from_toml(text).expect("valid config");

        assert_eq!(config.categories.len(), 2);
        assert_eq!(
            config.categories[0].lines,
            vec![
                ExpenseLine::new(
                    "Gasolina",
                    dec!(90.00),
                    VatRate::TwentyOne,
                    TaxTopology::FuelExcise {
                        price_per_unit: dec!(1.55),
                        excise_per_unit: dec!(0.473),
                    },
                ),
                ExpenseLine::standard("Abono", dec!(20), VatRate::Ten),
            ]
        );
        assert_eq!(
            config.categories[1].fallback,
            Some(FallbackSplit {
                total: dec!(150),
                vat4_pct: dec!(0),
                vat10_pct: dec!(60),
                vat21_pct: dec!(40),
            })
        );
    }

    #[test]
    fn zero_fuel_price_is_rejected() {
        let text = r#"
            [[categories]]
            id = "transporte"
            name = "Transporte"

            [[categories.lines]]
            name = "Gasolina"
            amount = 60
            topology = { kind = "fuel-excise", price_per_unit = 0, excise_per_unit = "0.473" }
        "#;

        let err = ConfigFile::from_toml(text).expect_err("zero price per liter");

        let ConfigError::InvalidLine {
            category,
            line,
            source,
        } = err
        else {
            panic!("Expected InvalidLine, got: {err:?}");
        };
        assert_eq!(category, "transporte");
        assert_eq!(line, "Gasolina");
        assert_eq!(source, TopologyError::NonPositivePrice(dec!(0)));
    }

    #[test]
    fn negative_special_rate_is_rejected() {
        let text = r#"
            [[categories]]
            id = "seguros"
            name = "Seguros"

            [[categories.lines]]
            name = "Hogar"
            amount = 40
            vat_rate = 0
            topology = { kind = "insurance-premium", special_rate = -1 }
        "#;

        let err = ConfigFile::from_toml(text).expect_err("negative special rate");

        assert!(matches!(
            err,
            ConfigError::InvalidLine {
                source: TopologyError::NegativeRate(_),
                ..
            }
        ));
    }

    #[test]
    fn invalid_payment_count_is_rejected() {
        let err = ConfigFile::from_toml("[profile]\npayments = 13\n").expect_err("13 payments");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ConfigFile::from_toml("[profile]\nsalary = 30000\n").expect_err("typo");

        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn missing_file() {
        let err = ConfigFile::load(Path::new("/no/such/fisco.toml")).expect_err("missing file");

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
