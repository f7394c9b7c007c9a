//! Liquidation risk calculator.
//!
//! Stateless, exact decimal formulas for collateral ratio, weighted
//! collateral values, health factor, liquidation bonus and maximum
//! repayable debt, plus the opportunity-selection helpers the executor
//! uses to pick which assets to liquidate.
//!
//! The functions here assume complete inputs: a denom without a price or
//! without risk parameters panics, because a liquidation must never be
//! sized against an undefined risk parameter.

/// Position value and health-factor formulas.
pub mod health;
/// Liquidation sizing: bonus, max repayable debt, asset selection.
pub mod liquidation;

pub use health::{
    collateral_ratio, liquidation_threshold_health_factor,
    total_ltv_weighted_collateral_value,
    total_liquidation_threshold_weighted_collateral_value, total_value,
};
pub use liquidation::{
    largest_collateral, largest_debt, liquidation_bonus, max_debt_repayable,
};
