use std::collections::BTreeMap;
use std::io::Read;

use fisco_core::{Bracket, BracketTable, BracketTableError, SsScheduleError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading the income tax tables.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row} has an empty scale name")]
    EmptyScaleName { row: usize },

    #[error("scale '{scale}' is invalid: {source}")]
    InvalidScale {
        scale: String,
        #[source]
        source: BracketTableError,
    },

    #[error("scale '{0}' does not match any known region")]
    UnknownScale(String),

    #[error("region '{0}' has no scale")]
    MissingScale(String),

    #[error("invalid Social Security schedule: {0}")]
    Schedule(#[from] SsScheduleError),
}

impl From<csv::Error> for TableLoadError {
    fn from(err: csv::Error) -> Self {
        TableLoadError::CsvParse(err.to_string())
    }
}

/// A single row of an income tax scale CSV file.
///
/// - `scale`: `national` or a region id (e.g. `madrid`)
/// - `upper_limit`: exclusive upper limit of the bracket (empty for unbounded)
/// - `rate`: marginal rate as a decimal (e.g. 0.095 for 9.5%)
///
/// Rows of one scale must appear in ascending order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScaleRecord {
    pub scale: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive scales stored as CSV.
pub struct ScaleLoader;

impl ScaleLoader {
    /// Parse scale records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScaleRecord>, TableLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (idx, result) in csv_reader.deserialize().enumerate() {
            let record: ScaleRecord = result?;
            if record.scale.is_empty() {
                return Err(TableLoadError::EmptyScaleName { row: idx + 1 });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by scale name and validate each scale.
    pub fn group(
        records: &[ScaleRecord]
    ) -> Result<BTreeMap<String, BracketTable>, TableLoadError> {
        let mut groups: BTreeMap<String, Vec<Bracket>> = BTreeMap::new();
        for record in records {
            groups.entry(record.scale.clone()).or_default().push(Bracket {
                upper_limit: record.upper_limit,
                rate: record.rate,
            });
        }

        groups
            .into_iter()
            .map(|(scale, brackets)| match BracketTable::new(brackets) {
                Ok(table) => Ok((scale, table)),
                Err(source) => Err(TableLoadError::InvalidScale { scale, source }),
            })
            .collect()
    }

    /// Parse and group in one step.
    pub fn load<R: Read>(reader: R) -> Result<BTreeMap<String, BracketTable>, TableLoadError> {
        let records = Self::parse(reader)?;
        Self::group(&records)
    }
}
