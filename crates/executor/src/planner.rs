//! Liquidation sizing pipeline.
//!
//! Pure function from one position snapshot (plus prices, risk parameters
//! and the route graph) to a sized liquidation plan. The transaction that
//! executes the plan is built elsewhere.

use liqbot_domain::{AssetParamsMap, Coin, PriceMap};
use liqbot_router::{AmmRouter, Route, find_routes};
use liqbot_risk::health::{params_of, price_of};
use liqbot_risk::{
    collateral_ratio, largest_collateral, largest_debt, liquidation_bonus,
    liquidation_threshold_health_factor, max_debt_repayable, total_value,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ExecutorConfig;
use crate::providers::RawPosition;

/// A sized liquidation, ready for the transaction builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationPlan {
    /// Position owner being liquidated.
    pub address: String,
    /// Debt to repay.
    pub debt: Coin,
    /// Collateral expected to be seized, bonus included.
    pub collateral: Coin,
    /// Swap route from the seized collateral to the neutral denom. Empty
    /// when the collateral already is the neutral denom.
    pub route: Route,
    /// Expected proceeds in the neutral denom after the swap.
    pub expected_neutral_amount: Decimal,
}

/// Sizes a liquidation for one position.
///
/// Returns `None` when the position is healthy, has nothing to repay or
/// seize, the sizing formula is degenerate for it, or no viable route
/// exists from the seized collateral to the neutral denom.
///
/// # Panics
///
/// Panics when a denom in the position has no price or no risk
/// parameters; a liquidation must never be sized against undefined
/// inputs.
#[must_use]
pub fn plan_liquidation(
    position: &RawPosition,
    prices: &PriceMap,
    params: &AssetParamsMap,
    router: &AmmRouter,
    config: &ExecutorConfig,
) -> Option<LiquidationPlan> {
    if position.debts.is_empty() {
        debug!(address = %position.address, "position has no debt");
        return None;
    }
    let enabled_collaterals: Vec<_> = position
        .collaterals
        .iter()
        .filter(|collateral| collateral.enabled)
        .cloned()
        .collect();
    if enabled_collaterals.is_empty() {
        debug!(address = %position.address, "position has no seizable collateral");
        return None;
    }

    // An oracle may report a zero price; debt with no value cannot anchor
    // the health-factor and collateral-ratio divisions.
    let total_debt_value = total_value(&position.debts, prices);
    if total_debt_value <= Decimal::ZERO {
        debug!(address = %position.address, "position debt has no value");
        return None;
    }

    let health_factor = liquidation_threshold_health_factor(
        &enabled_collaterals,
        &position.debts,
        prices,
        params,
    );
    if health_factor >= Decimal::ONE {
        debug!(address = %position.address, %health_factor, "position is healthy");
        return None;
    }

    let debt = largest_debt(&position.debts, prices)?;
    let collateral = largest_collateral(&enabled_collaterals, prices)?;

    let ratio = collateral_ratio(&position.debts, &enabled_collaterals, prices);
    let bonus = liquidation_bonus(
        config.bonus_base,
        config.bonus_slope,
        health_factor,
        config.max_bonus,
        config.min_bonus,
        ratio,
    );

    // The closed form divides by THF - LT * (1 + bonus); a zero or flipped
    // denominator means the formula cannot size this position.
    let threshold = params_of(params, &collateral.denom).liquidation_threshold;
    let denominator =
        config.target_health_factor - threshold * (Decimal::ONE + bonus);
    if denominator <= Decimal::ZERO {
        warn!(
            address = %position.address,
            claimed = %collateral.denom,
            "degenerate sizing denominator, skipping position"
        );
        return None;
    }

    let repayable_value = max_debt_repayable(
        config.target_health_factor,
        &position.debts,
        &enabled_collaterals,
        params,
        bonus,
        prices,
        &collateral.denom,
    );
    if repayable_value <= Decimal::ZERO {
        debug!(address = %position.address, "nothing repayable");
        return None;
    }

    let debt_price = price_of(prices, &debt.denom);
    let debt_value = debt.amount * debt_price;
    let repay_value = repayable_value.min(debt_value);
    let repay_amount = repay_value / debt_price;

    let collateral_price = price_of(prices, &collateral.denom);
    let collateral_value = collateral.amount * collateral_price;
    let seized_value = (repay_value * (Decimal::ONE + bonus)).min(collateral_value);
    let seized_amount = seized_value / collateral_price;

    let (route, expected_neutral_amount) = if collateral.denom == config.neutral_denom {
        (Route::new(), seized_amount)
    } else {
        let candidates = find_routes(
            router.pools(),
            &collateral.denom,
            &config.neutral_denom,
            config.max_hops,
        );
        let Some(route) = router.best_route_for_input(seized_amount, &candidates) else {
            warn!(
                address = %position.address,
                collateral = %collateral.denom,
                neutral = %config.neutral_denom,
                "no viable route to the neutral denom"
            );
            return None;
        };
        let expected = router.get_output(seized_amount, route);
        (route.clone(), expected)
    };

    info!(
        address = %position.address,
        repay = %repay_amount,
        debt_denom = %debt.denom,
        seize = %seized_amount,
        collateral_denom = %collateral.denom,
        %bonus,
        "sized liquidation"
    );

    Some(LiquidationPlan {
        address: position.address.clone(),
        debt: Coin::new(debt.denom.clone(), repay_amount),
        collateral: Coin::new(collateral.denom.clone(), seized_amount),
        route,
        expected_neutral_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use liqbot_domain::{AssetParams, Collateral, Debt, Pool, PoolVariant};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn xyk(id: u64, token0: &str, amount0: Decimal, token1: &str, amount1: Decimal) -> Pool {
        Pool {
            id,
            token0: token0.to_string(),
            token1: token1.to_string(),
            swap_fee: dec!(0.003),
            variant: PoolVariant::ConstantProduct {
                assets: vec![Coin::new(token0, amount0), Coin::new(token1, amount1)],
            },
        }
    }

    fn setup() -> (PriceMap, AssetParamsMap, AmmRouter, ExecutorConfig) {
        let prices = HashMap::from([
            ("uosmo".to_string(), dec!(3)),
            ("uusdc".to_string(), dec!(1)),
        ]);
        let params = HashMap::from([
            (
                "uosmo".to_string(),
                AssetParams {
                    max_loan_to_value: dec!(0.75),
                    liquidation_threshold: dec!(0.78),
                },
            ),
            (
                "uusdc".to_string(),
                AssetParams {
                    max_loan_to_value: dec!(0.8),
                    liquidation_threshold: dec!(0.85),
                },
            ),
        ]);
        let mut router = AmmRouter::new();
        router.set_pools(vec![xyk(1, "uosmo", dec!(1000000), "uusdc", dec!(3000000))]);
        (prices, params, router, ExecutorConfig::default())
    }

    fn underwater_position() -> RawPosition {
        RawPosition {
            address: "osmo1debtor".to_string(),
            collaterals: vec![Collateral::new("uosmo", dec!(10000))],
            debts: vec![Debt::new("uusdc", dec!(25000))],
        }
    }

    #[test]
    fn plans_an_underwater_position() {
        let (prices, params, router, config) = setup();
        let plan =
            plan_liquidation(&underwater_position(), &prices, &params, &router, &config)
                .expect("position should be liquidatable");

        assert_eq!(plan.debt.denom, "uusdc");
        assert_eq!(plan.collateral.denom, "uosmo");
        // HF = 23400/25000, CR = 1.2 -> bonus capped at 0.1,
        // MDR = 6600 / (1.2 - 0.858) = 19298.24...
        assert_eq!(plan.debt.amount.round(), dec!(19298));
        assert!(plan.debt.amount < dec!(25000));
        assert_eq!(plan.route.len(), 1);
        assert!(plan.expected_neutral_amount > Decimal::ZERO);
    }

    #[test]
    fn healthy_positions_are_skipped() {
        let (prices, params, router, config) = setup();
        let position = RawPosition {
            address: "osmo1healthy".to_string(),
            collaterals: vec![Collateral::new("uosmo", dec!(10000))],
            debts: vec![Debt::new("uusdc", dec!(1000))],
        };
        assert!(plan_liquidation(&position, &prices, &params, &router, &config).is_none());
    }

    #[test]
    fn disabled_collateral_is_not_seizable() {
        let (prices, params, router, config) = setup();
        let mut position = underwater_position();
        position.collaterals[0].enabled = false;
        assert!(plan_liquidation(&position, &prices, &params, &router, &config).is_none());
    }

    #[test]
    fn neutral_collateral_needs_no_route() {
        let (prices, params, _, config) = setup();
        // No pools at all; the collateral already is the neutral denom.
        let router = AmmRouter::new();
        let position = RawPosition {
            address: "osmo1usdc".to_string(),
            collaterals: vec![Collateral::new("uusdc", dec!(10000))],
            debts: vec![Debt::new("uosmo", dec!(3500))],
        };
        let plan = plan_liquidation(&position, &prices, &params, &router, &config)
            .expect("position should be liquidatable");
        assert!(plan.route.is_empty());
        assert_eq!(plan.expected_neutral_amount, plan.collateral.amount);
    }

    #[test]
    fn zero_priced_debt_is_skipped_not_crashed() {
        let (mut prices, params, router, config) = setup();
        // A zero oracle price is how an absent price is represented; the
        // position must be skipped rather than divide by a zero debt value.
        prices.insert("uusdc".to_string(), Decimal::ZERO);
        assert!(
            plan_liquidation(&underwater_position(), &prices, &params, &router, &config)
                .is_none()
        );
    }

    #[test]
    fn route_depth_cap_comes_from_config() {
        let (prices, params, _, mut config) = setup();
        // Reaching the neutral denom takes two hops.
        let mut router = AmmRouter::new();
        router.set_pools(vec![
            xyk(1, "uosmo", dec!(1000000), "uatom", dec!(400000)),
            xyk(2, "uatom", dec!(400000), "uusdc", dec!(3000000)),
        ]);

        config.max_hops = 1;
        assert!(
            plan_liquidation(&underwater_position(), &prices, &params, &router, &config)
                .is_none()
        );

        config.max_hops = 2;
        let plan =
            plan_liquidation(&underwater_position(), &prices, &params, &router, &config)
                .expect("two hops reach the neutral denom");
        assert_eq!(plan.route.len(), 2);
    }

    #[test]
    fn unroutable_collateral_yields_no_plan() {
        let (prices, params, _, config) = setup();
        let router = AmmRouter::new(); // empty snapshot
        assert!(
            plan_liquidation(&underwater_position(), &prices, &params, &router, &config)
                .is_none()
        );
    }
}
