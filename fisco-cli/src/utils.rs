use fisco_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes an amount written either way round to `1234.56` form.
///
/// - Both separators present: the last one is the decimal separator.
/// - Only commas: a single comma is the decimal separator (`30000,50`),
///   several are thousands separators.
/// - Only dots: several dots, or a single dot followed by exactly three
///   digits (`30.000`), are thousands separators. `0.473` stays a decimal.
fn normalize_amount_input(s: &str) -> String {
    let cleaned: String = s
        .trim()
        .trim_end_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let dots = cleaned.matches('.').count();
    let commas = cleaned.matches(',').count();

    match (dots, commas) {
        (0, 0) => cleaned,
        (_, 0) => {
            let thousands = dots > 1
                || cleaned.rsplit_once('.').is_some_and(|(int, frac)| {
                    frac.len() == 3 && !matches!(int.trim_start_matches('-'), "" | "0")
                });
            if thousands {
                cleaned.replace('.', "")
            } else {
                cleaned
            }
        }
        (0, 1) => cleaned.replace(',', "."),
        (0, _) => cleaned.replace(',', ""),
        _ => {
            let last_dot = cleaned.rfind('.');
            let last_comma = cleaned.rfind(',');
            if last_comma > last_dot {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
    }
}

/// Parses an amount typed by a user.
///
/// Accepts `30000`, `30000.50`, `30.000,50`, `30,000.50` and a trailing
/// `€`. Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses an optional amount. Returns `None` for empty input.
pub fn parse_optional_amount(s: &str) -> Result<Option<Decimal>, ParseAmountError> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        parse_amount(s).map(Some)
    }
}

/// Groups the integer digits in threes with `sep`.
fn group_thousands(
    digits: &str,
    sep: char,
) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// Formats euros the Spanish way: `1.234,56 €`.
pub fn format_eur(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{},{frac_part} €", group_thousands(int_part, '.'))
}

/// Formats a fraction as a percentage with two decimals: `0.278` → `27,80 %`.
pub fn format_percent(rate: Decimal) -> String {
    let text = format!("{:.2}", round_half_up(rate * Decimal::ONE_HUNDRED));
    format!("{} %", text.replace('.', ","))
}
