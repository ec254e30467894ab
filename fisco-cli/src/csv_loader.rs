//! CSV loader for monthly expense lines.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column            | Required | Type    | Notes                                           |
//! |-------------------|----------|---------|-------------------------------------------------|
//! | `category`        | yes      | string  | Category id; rows with the same id are grouped  |
//! | `name`            | yes      | string  | Line label                                      |
//! | `amount`          | yes      | amount  | Tax-inclusive monthly amount, `45,90` or `45.90`|
//! | `vat_rate`        | no       | integer | `0`, `4`, `10` or `21` (default `21`)           |
//! | `topology`        | no       | string  | See below (default `standard`)                  |
//! | `price_per_unit`  | no       | amount  | Fuel lines only, € per liter, positive          |
//! | `excise_per_unit` | no       | amount  | Fuel lines only, € per liter                    |
//! | `special_rate`    | no       | amount  | Percentage topologies, as a fraction            |
//!
//! ### Topologies
//!
//! `standard`, `fuel-excise`, `diesel-excise`, `electricity-excise`,
//! `gas-excise`, `insurance-premium`, `alcohol-excise`, `tobacco-excise`,
//! `direct-levy`, `exempt`. Empty parameters take the current statutory value
//! from [`fisco_data::rates`]; `fuel-excise` defaults to petrol and
//! `diesel-excise` to diesel. Negative parameters are rejected.
//!
//! ### Example
//!
//! ```csv
//! category,name,amount,vat_rate,topology,price_per_unit,excise_per_unit,special_rate
//! vivienda,Electricidad,65,21,electricity-excise,,,
//! alimentacion,Fruta,"42,50",4,,,,
//! transporte,Diésel,80,21,fuel-excise,1.45,0.379,
//! ```
use std::path::{Path, PathBuf};

use fisco_core::{ExpenseCategory, ExpenseLine, TaxTopology, TopologyError, VatRate};
use fisco_data::rates;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::{ParseAmountError, parse_amount, parse_optional_amount};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    category: String,
    name: String,
    amount: String,
    #[serde(default)]
    vat_rate: Option<u8>,
    #[serde(default)]
    topology: Option<String>,
    #[serde(default)]
    price_per_unit: Option<String>,
    #[serde(default)]
    excise_per_unit: Option<String>,
    #[serde(default)]
    special_rate: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
///
/// Row numbers are 1-based and count data rows only (header = row 0).
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: ParseAmountError,
    },

    #[error("row {row}: {message}")]
    InvalidVatRate { row: usize, message: String },

    #[error("row {row}: unrecognised topology '{topology}'")]
    UnknownTopology { topology: String, row: usize },

    #[error("row {row}: category and name must not be empty")]
    MissingLabel { row: usize },

    #[error("row {row}: {source}")]
    InvalidTopology {
        row: usize,
        #[source]
        source: TopologyError,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn amount_or(
    cell: Option<&str>,
    default: Decimal,
    row: usize,
) -> Result<Decimal, CsvLoadError> {
    let parsed = parse_optional_amount(cell.unwrap_or_default())
        .map_err(|source| CsvLoadError::InvalidAmount { row, source })?;
    Ok(parsed.unwrap_or(default))
}

fn convert_topology(
    row: &CsvRow,
    row_number: usize,
) -> Result<TaxTopology, CsvLoadError> {
    let name = row.topology.as_deref().unwrap_or_default();
    let special = |default: Decimal| amount_or(row.special_rate.as_deref(), default, row_number);
    let fuel = |price: Decimal, excise: Decimal| -> Result<TaxTopology, CsvLoadError> {
        Ok(TaxTopology::FuelExcise {
            price_per_unit: amount_or(row.price_per_unit.as_deref(), price, row_number)?,
            excise_per_unit: amount_or(row.excise_per_unit.as_deref(), excise, row_number)?,
        })
    };

    let topology = match name {
        "" | "standard" => TaxTopology::Standard,
        "fuel-excise" => fuel(rates::PETROL_PRICE_PER_LITER, rates::PETROL_EXCISE_PER_LITER)?,
        "diesel-excise" => fuel(rates::DIESEL_PRICE_PER_LITER, rates::DIESEL_EXCISE_PER_LITER)?,
        "electricity-excise" => TaxTopology::ElectricityExcise {
            special_rate: special(rates::ELECTRICITY_TAX)?,
        },
        "gas-excise" => TaxTopology::GasExcise {
            special_rate: special(rates::GAS_TAX_SHARE)?,
        },
        "insurance-premium" => TaxTopology::InsurancePremium {
            special_rate: special(rates::INSURANCE_PREMIUM_TAX)?,
        },
        "alcohol-excise" => TaxTopology::AlcoholExcise {
            special_rate: special(rates::ALCOHOL_TAX_SHARE)?,
        },
        "tobacco-excise" => TaxTopology::TobaccoExcise {
            special_rate: special(rates::TOBACCO_TAX_SHARE)?,
        },
        "direct-levy" => TaxTopology::DirectLevy,
        "exempt" => TaxTopology::Exempt,
        other => {
            return Err(CsvLoadError::UnknownTopology {
                topology: other.to_string(),
                row: row_number,
            });
        }
    };
    topology
        .validate()
        .map_err(|source| CsvLoadError::InvalidTopology {
            row: row_number,
            source,
        })?;
    Ok(topology)
}

/// Convert a single CSV row into an expense line.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: &CsvRow,
    row_number: usize,
) -> Result<ExpenseLine, CsvLoadError> {
    if row.category.is_empty() || row.name.is_empty() {
        return Err(CsvLoadError::MissingLabel { row: row_number });
    }

    let amount = parse_amount(&row.amount).map_err(|source| CsvLoadError::InvalidAmount {
        row: row_number,
        source,
    })?;
    let vat_rate = row
        .vat_rate
        .map(VatRate::try_from)
        .transpose()
        .map_err(|message| CsvLoadError::InvalidVatRate {
            row: row_number,
            message,
        })?
        .unwrap_or_default();
    let topology = convert_topology(row, row_number)?;

    Ok(ExpenseLine::new(row.name.clone(), amount, vat_rate, topology))
}

/// Parse CSV text (the full file contents as a &str) into expense
/// categories. Categories keep the order in which they first appear and
/// their lines keep file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required column is missing.
/// * The row-level variants – if a cell cannot be converted.
pub fn load_from_str(input: &str) -> Result<Vec<ExpenseCategory>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let mut categories: Vec<ExpenseCategory> = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let row_number = idx + 1; // 1-based for user-facing messages
        let line = convert_row(&row, row_number)?;
        tracing::trace!(row = row_number, category = %row.category, name = %line.name, "expense row");

        match categories.iter().position(|c| c.id == row.category) {
            Some(index) => categories[index].lines.push(line),
            None => categories.push(ExpenseCategory::with_lines(
                row.category.clone(),
                row.category,
                vec![line],
            )),
        }
    }

    Ok(categories)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<ExpenseCategory>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
