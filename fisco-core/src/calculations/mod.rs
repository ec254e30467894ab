//! Calculation engines.
//!
//! Every engine is a pure function of its inputs: the progressive evaluator,
//! IRPF, Social Security, the indirect tax breakdown and the summary that
//! combines them.

pub mod common;
pub mod indirect;
pub mod irpf;
pub mod progressive;
pub mod social_security;
pub mod summary;

pub use indirect::indirect_breakdown;
pub use irpf::{ExemptMinimumConfig, IrpfEngine};
pub use progressive::{bracket_slices, marginal_rate, merge_scales, progressive_tax};
pub use social_security::compute_ss;
pub use summary::{DisplayFigures, FiscalSummary, FiscalTables, MONTHS_PER_YEAR, ViewMode};
