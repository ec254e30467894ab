mod bracket;
mod expense;
mod profile;
mod region;
mod results;
mod ss_schedule;

pub use bracket::{Bracket, BracketTable, BracketTableError};
pub use expense::{
    ExpenseCategory, ExpenseLine, FallbackSplit, TaxTopology, TopologyError, VatRate,
};
pub use profile::{DisabilityLevel, MaritalStatus, PaymentCount, TaxpayerProfile};
pub use region::{Regime, Region};
pub use results::{
    BracketSlice, IndirectTaxResult, IrpfResult, LineDetail, SsItemAmount, SsResult,
};
pub use ss_schedule::{
    ContributionKind, ContributionSide, SsContribution, SsSchedule, SsScheduleError,
};
