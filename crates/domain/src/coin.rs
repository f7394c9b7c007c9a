//! Denominated amounts and oracle price snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A decimal amount of a single denom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Asset identifier (token symbol or address).
    pub denom: String,
    /// Amount, in the asset's base units.
    pub amount: Decimal,
}

impl Coin {
    /// Creates a new coin.
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Immutable per-cycle price snapshot: denom to unit price.
///
/// A denom absent from the map is the caller's problem, not the math's; the
/// risk calculator fails fast on missing entries rather than defaulting.
pub type PriceMap = HashMap<String, Decimal>;
