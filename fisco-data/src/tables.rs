//! The Bracket Table Store: every table the engines read, loaded once.

use std::collections::BTreeMap;
use std::io::Read;

use fisco_core::calculations::{ExemptMinimumConfig, FiscalTables};
use fisco_core::{BracketTable, Region, SsSchedule};
use thiserror::Error;
use tracing::debug;

use crate::loader::{ScaleLoader, TableLoadError};
use crate::regions::{NATIONAL_SCALE, REGIONS};
use crate::social_security::{employee_schedule, employer_schedule};

/// Scales for the current tax year, compiled into the binary.
pub const EMBEDDED_SCALES: &str = include_str!("../data/irpf_scales_2025.csv");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

/// Immutable tax tables shared by all calculations.
#[derive(Debug, Clone)]
pub struct TaxTables {
    national: BracketTable,
    regions: Vec<Region>,
    minimum: ExemptMinimumConfig,
    employer: SsSchedule,
    employee: SsSchedule,
}

impl TaxTables {
    /// Loads the embedded tables.
    pub fn load() -> Result<Self, TableLoadError> {
        Self::load_from_reader(EMBEDDED_SCALES.as_bytes())
    }

    /// Loads scales from any CSV source with the embedded layout.
    ///
    /// The source must provide the national scale and one scale per known
    /// region; scales for unknown names are rejected.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self, TableLoadError> {
        let scales = ScaleLoader::load(reader)?;
        Self::from_scales(scales)
    }

    fn from_scales(mut scales: BTreeMap<String, BracketTable>) -> Result<Self, TableLoadError> {
        let national = scales
            .remove(NATIONAL_SCALE)
            .ok_or_else(|| TableLoadError::MissingScale(NATIONAL_SCALE.to_string()))?;

        let regions = REGIONS
            .iter()
            .map(|info| {
                let brackets = scales
                    .remove(info.id)
                    .ok_or_else(|| TableLoadError::MissingScale(info.id.to_string()))?;
                Ok(Region {
                    id: info.id.to_string(),
                    name: info.name.to_string(),
                    regime: info.regime,
                    brackets,
                })
            })
            .collect::<Result<Vec<_>, TableLoadError>>()?;

        if let Some(extra) = scales.into_keys().next() {
            return Err(TableLoadError::UnknownScale(extra));
        }

        debug!(regions = regions.len(), "tax tables loaded");

        Ok(Self {
            national,
            regions,
            minimum: ExemptMinimumConfig::default(),
            employer: employer_schedule()?,
            employee: employee_schedule()?,
        })
    }

    pub fn national(&self) -> &BracketTable {
        &self.national
    }

    /// Regions in registry order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(
        &self,
        id: &str,
    ) -> Result<&Region, LookupError> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| LookupError::UnknownRegion(id.to_string()))
    }

    pub fn minimum(&self) -> ExemptMinimumConfig {
        self.minimum
    }

    pub fn employer(&self) -> &SsSchedule {
        &self.employer
    }

    pub fn employee(&self) -> &SsSchedule {
        &self.employee
    }

    /// Borrowed view handed to the summary engine.
    pub fn fiscal_tables(&self) -> FiscalTables<'_> {
        FiscalTables {
            national: self.national.brackets(),
            minimum: self.minimum,
            employer: &self.employer,
            employee: &self.employee,
        }
    }
}
