//! Position value and health-factor formulas.

use liqbot_domain::{AssetParamsMap, Coin, Collateral, Debt, PriceMap};
use rust_decimal::Decimal;

/// Anything with a denom and an amount that can be valued against a price
/// map.
pub trait PricedAsset {
    /// Asset identifier.
    fn denom(&self) -> &str;
    /// Held amount.
    fn amount(&self) -> Decimal;
}

impl PricedAsset for Coin {
    fn denom(&self) -> &str {
        &self.denom
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl PricedAsset for Debt {
    fn denom(&self) -> &str {
        &self.denom
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl PricedAsset for Collateral {
    fn denom(&self) -> &str {
        &self.denom
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Unit price of a denom.
///
/// # Panics
///
/// Panics when the denom has no price; sizing a liquidation against an
/// unpriced asset must fail visibly.
#[must_use]
pub fn price_of(prices: &PriceMap, denom: &str) -> Decimal {
    *prices
        .get(denom)
        .unwrap_or_else(|| panic!("no price for denom {denom}"))
}

/// Total value of a set of positions: sum of amount times price.
///
/// # Panics
///
/// Panics when any denom has no price.
#[must_use]
pub fn total_value<A: PricedAsset>(assets: &[A], prices: &PriceMap) -> Decimal {
    assets
        .iter()
        .map(|asset| asset.amount() * price_of(prices, asset.denom()))
        .sum()
}

/// Collateral value weighted by each asset's max loan-to-value.
///
/// Disabled collateral contributes zero.
///
/// # Panics
///
/// Panics when an enabled collateral has no price or no risk parameters.
#[must_use]
pub fn total_ltv_weighted_collateral_value(
    collaterals: &[Collateral],
    prices: &PriceMap,
    params: &AssetParamsMap,
) -> Decimal {
    collaterals
        .iter()
        .filter(|collateral| collateral.enabled)
        .map(|collateral| {
            let value = collateral.amount * price_of(prices, &collateral.denom);
            value * params_of(params, &collateral.denom).max_loan_to_value
        })
        .sum()
}

/// Collateral value weighted by each asset's liquidation threshold.
///
/// Disabled collateral contributes zero.
///
/// # Panics
///
/// Panics when an enabled collateral has no price or no risk parameters.
#[must_use]
pub fn total_liquidation_threshold_weighted_collateral_value(
    collaterals: &[Collateral],
    prices: &PriceMap,
    params: &AssetParamsMap,
) -> Decimal {
    collaterals
        .iter()
        .filter(|collateral| collateral.enabled)
        .map(|collateral| {
            let value = collateral.amount * price_of(prices, &collateral.denom);
            value * params_of(params, &collateral.denom).liquidation_threshold
        })
        .sum()
}

/// Collateral ratio: total collateral value over total debt value.
///
/// # Panics
///
/// Panics when any denom has no price.
#[must_use]
pub fn collateral_ratio(
    debts: &[Debt],
    collaterals: &[Collateral],
    prices: &PriceMap,
) -> Decimal {
    total_value(collaterals, prices) / total_value(debts, prices)
}

/// Health factor under liquidation-threshold weighting: weighted collateral
/// value over total debt value. Below one, the position is liquidatable.
///
/// # Panics
///
/// Panics when any denom has no price or a collateral has no parameters.
#[must_use]
pub fn liquidation_threshold_health_factor(
    collaterals: &[Collateral],
    debts: &[Debt],
    prices: &PriceMap,
    params: &AssetParamsMap,
) -> Decimal {
    total_liquidation_threshold_weighted_collateral_value(collaterals, prices, params)
        / total_value(debts, prices)
}

/// Risk parameters of a denom.
///
/// # Panics
///
/// Panics when the denom has no parameters.
#[must_use]
pub fn params_of<'a>(
    params: &'a AssetParamsMap,
    denom: &str,
) -> &'a liqbot_domain::AssetParams {
    params
        .get(denom)
        .unwrap_or_else(|| panic!("no risk parameters for denom {denom}"))
}
