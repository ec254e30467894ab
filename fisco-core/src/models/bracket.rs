use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One slice of a progressive schedule.
///
/// `upper_limit` is exclusive of the next slice: income exactly at the limit
/// is taxed at this bracket's rate. `None` marks the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl Bracket {
    pub fn bounded(
        upper_limit: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate,
        }
    }
}

/// Errors raised when a bracket sequence breaks the schedule invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("bracket {index} has limit {limit}, which does not exceed the previous limit")]
    NonIncreasingLimit { index: usize, limit: Decimal },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { index: usize },

    #[error("last bracket must be unbounded, found limit {0}")]
    BoundedFinalBracket(Decimal),

    #[error("bracket {index} has negative rate {rate}")]
    NegativeRate { index: usize, rate: Decimal },
}

/// An ordered, validated bracket sequence.
///
/// Construction checks that limits are positive and strictly increasing, that
/// only the last bracket is unbounded and that no rate is negative. Rates are
/// expected to be non-decreasing but this is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable(Vec<Bracket>);

impl BracketTable {
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, BracketTableError> {
        let Some(last) = brackets.last() else {
            return Err(BracketTableError::Empty);
        };
        if let Some(limit) = last.upper_limit {
            return Err(BracketTableError::BoundedFinalBracket(limit));
        }

        let mut previous = Decimal::ZERO;
        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(BracketTableError::NegativeRate {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.upper_limit {
                Some(limit) if limit <= previous => {
                    return Err(BracketTableError::NonIncreasingLimit { index, limit });
                }
                Some(limit) => previous = limit,
                None if index != last_index => {
                    return Err(BracketTableError::UnboundedBeforeEnd { index });
                }
                None => {}
            }
        }

        Ok(Self(brackets))
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.0
    }

    /// Rate of the top, unbounded bracket.
    pub fn top_rate(&self) -> Decimal {
        self.0.last().map(|b| b.rate).unwrap_or_default()
    }
}

impl AsRef<[Bracket]> for BracketTable {
    fn as_ref(&self) -> &[Bracket] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BracketTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let brackets = Vec::<Bracket>::deserialize(deserializer)?;
        BracketTable::new(brackets).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn accepts_well_formed_table() {
        let table = BracketTable::new(vec![
            Bracket::bounded(dec!(12450), dec!(0.19)),
            Bracket::bounded(dec!(20200), dec!(0.24)),
            Bracket::unbounded(dec!(0.30)),
        ])
        .unwrap();

        assert_eq!(table.brackets().len(), 3);
        assert_eq!(table.top_rate(), dec!(0.30));
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(BracketTable::new(vec![]), Err(BracketTableError::Empty));
    }

    #[test]
    fn rejects_bounded_final_bracket() {
        let result = BracketTable::new(vec![Bracket::bounded(dec!(1000), dec!(0.10))]);

        assert_eq!(result, Err(BracketTableError::BoundedFinalBracket(dec!(1000))));
    }

    #[test]
    fn rejects_non_increasing_limits() {
        let result = BracketTable::new(vec![
            Bracket::bounded(dec!(2000), dec!(0.10)),
            Bracket::bounded(dec!(2000), dec!(0.20)),
            Bracket::unbounded(dec!(0.30)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::NonIncreasingLimit {
                index: 1,
                limit: dec!(2000)
            })
        );
    }

    #[test]
    fn rejects_zero_first_limit() {
        let result = BracketTable::new(vec![
            Bracket::bounded(dec!(0), dec!(0.10)),
            Bracket::unbounded(dec!(0.30)),
        ]);

        assert!(matches!(
            result,
            Err(BracketTableError::NonIncreasingLimit { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_unbounded_bracket_in_the_middle() {
        let result = BracketTable::new(vec![
            Bracket::unbounded(dec!(0.10)),
            Bracket::unbounded(dec!(0.30)),
        ]);

        assert_eq!(result, Err(BracketTableError::UnboundedBeforeEnd { index: 0 }));
    }

    #[test]
    fn rejects_negative_rate() {
        let result = BracketTable::new(vec![
            Bracket::bounded(dec!(1000), dec!(-0.10)),
            Bracket::unbounded(dec!(0.30)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::NegativeRate {
                index: 0,
                rate: dec!(-0.10)
            })
        );
    }
}
