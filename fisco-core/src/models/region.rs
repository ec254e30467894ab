use serde::{Deserialize, Serialize};

use super::BracketTable;

/// How a region's income tax scale relates to the national scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// The region's scale is the autonomous half; the national scale is added.
    Common,
    /// The region's scale is the whole tax (Navarra, País Vasco).
    Foral,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Foral => "foral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Self::Common),
            "foral" => Some(Self::Foral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub regime: Regime,
    pub brackets: BracketTable,
}

impl Region {
    pub fn is_foral(&self) -> bool {
        self.regime == Regime::Foral
    }
}
