//! Tax tables for the current year: IRPF scales, region registry, Social
//! Security schedules and excise rates.

pub mod catalog;
pub mod loader;
pub mod rates;
pub mod regions;
pub mod social_security;
pub mod tables;

pub use loader::{ScaleLoader, ScaleRecord, TableLoadError};
pub use regions::{NATIONAL_SCALE, REGIONS, RegionInfo};
pub use tables::{EMBEDDED_SCALES, LookupError, TaxTables};
