//! Borrower position entries and per-asset risk parameters.
//!
//! Risk parameters are supplied by the protocol's params contract and are
//! owned by the caller; the risk calculator only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A collateral entry of a borrower position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collateral {
    /// Asset identifier.
    pub denom: String,
    /// Deposited amount.
    pub amount: Decimal,
    /// Disabled collateral contributes zero to weighted sums.
    pub enabled: bool,
}

impl Collateral {
    /// Creates an enabled collateral entry.
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
            enabled: true,
        }
    }
}

/// A debt entry of a borrower position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// Asset identifier.
    pub denom: String,
    /// Borrowed amount.
    pub amount: Decimal,
}

impl Debt {
    /// Creates a debt entry.
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// Protocol risk parameters for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    /// Maximum loan-to-value ratio.
    pub max_loan_to_value: Decimal,
    /// Liquidation threshold ratio.
    pub liquidation_threshold: Decimal,
}

/// Per-denom risk-parameter snapshot.
pub type AssetParamsMap = HashMap<String, AssetParams>;
