//! Liquidation sizing: bonus, maximum repayable debt, asset selection.

use liqbot_domain::{AssetParamsMap, Collateral, Debt, PriceMap};
use rust_decimal::Decimal;

use crate::health::{
    PricedAsset, params_of, price_of, total_liquidation_threshold_weighted_collateral_value,
    total_value,
};

/// Dynamic liquidation bonus.
///
/// The bonus cap is bounded by how over-collateralized the position still
/// is: `maxLB* = max(min(CR - 1, max_setting), min_setting)`, and the bonus
/// itself grows as health deteriorates:
/// `min(base + slope * (1 - HF), maxLB*)`.
#[must_use]
pub fn liquidation_bonus(
    base: Decimal,
    slope: Decimal,
    health_factor: Decimal,
    max_bonus_setting: Decimal,
    min_bonus_setting: Decimal,
    collateral_ratio: Decimal,
) -> Decimal {
    let max_bonus = (collateral_ratio - Decimal::ONE)
        .min(max_bonus_setting)
        .max(min_bonus_setting);
    (base + slope * (Decimal::ONE - health_factor)).min(max_bonus)
}

/// Maximum debt value repayable so the position returns to the target
/// health factor after the bonused collateral is seized.
///
/// `MDR = (THF * D0 - LTcol) / (THF - LT * (1 + bonus))`, with `D0` the
/// total debt value, `LTcol` the threshold-weighted collateral value and
/// `LT` the liquidation threshold of the claimed collateral. Callers must
/// guard the denominator against zero or a sign flip before trusting the
/// result.
///
/// # Panics
///
/// Panics when a denom has no price or the claimed collateral has no risk
/// parameters.
#[must_use]
pub fn max_debt_repayable(
    target_health_factor: Decimal,
    debts: &[Debt],
    collaterals: &[Collateral],
    params: &AssetParamsMap,
    liquidation_bonus: Decimal,
    prices: &PriceMap,
    claimed_collateral_denom: &str,
) -> Decimal {
    let total_debt_value = total_value(debts, prices);
    let threshold_collateral_value =
        total_liquidation_threshold_weighted_collateral_value(collaterals, prices, params);
    let threshold = params_of(params, claimed_collateral_denom).liquidation_threshold;

    let numerator = target_health_factor * total_debt_value - threshold_collateral_value;
    let denominator =
        target_health_factor - threshold * (Decimal::ONE + liquidation_bonus);
    numerator / denominator
}

/// The entry with the highest value by price. `None` on an empty slice.
///
/// # Panics
///
/// Panics when a denom has no price.
#[must_use]
pub fn largest_collateral<'a>(
    collaterals: &'a [Collateral],
    prices: &PriceMap,
) -> Option<&'a Collateral> {
    largest_by_value(collaterals, prices)
}

/// The entry with the highest value by price. `None` on an empty slice.
///
/// # Panics
///
/// Panics when a denom has no price.
#[must_use]
pub fn largest_debt<'a>(debts: &'a [Debt], prices: &PriceMap) -> Option<&'a Debt> {
    largest_by_value(debts, prices)
}

fn largest_by_value<'a, A: PricedAsset>(assets: &'a [A], prices: &PriceMap) -> Option<&'a A> {
    assets
        .iter()
        .max_by_key(|asset| asset.amount() * price_of(prices, asset.denom()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{collateral_ratio, liquidation_threshold_health_factor};
    use liqbot_domain::AssetParams;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    /// Fixture taken from a real sizing run: three collaterals, two debts.
    fn fixture() -> (Vec<Collateral>, Vec<Debt>, PriceMap, AssetParamsMap) {
        let collaterals = vec![
            Collateral::new("uosmo", dec!(10000)),
            Collateral::new("ujake", dec!(2000)),
            Collateral::new("uatom", dec!(900)),
        ];
        let debts = vec![Debt::new("uusdc", dec!(3000)), Debt::new("untrn", dec!(1200))];
        let prices = HashMap::from([
            ("uosmo".to_string(), dec!(3)),
            ("ujake".to_string(), dec!(1)),
            ("uatom".to_string(), dec!(8.2)),
            ("uusdc".to_string(), dec!(8.5)),
            ("untrn".to_string(), dec!(5.5)),
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
                "ujake".to_string(),
                AssetParams {
                    max_loan_to_value: dec!(0.5),
                    liquidation_threshold: dec!(0.55),
                },
            ),
            (
                "uatom".to_string(),
                AssetParams {
                    max_loan_to_value: dec!(0.85),
                    liquidation_threshold: dec!(0.9),
                },
            ),
        ]);
        (collaterals, debts, prices, params)
    }

    #[test]
    fn bonus_matches_reference_position() {
        let (collaterals, debts, prices, params) = fixture();
        let hf = liquidation_threshold_health_factor(&collaterals, &debts, &prices, &params);
        let cr = collateral_ratio(&debts, &collaterals, &prices);
        let bonus = liquidation_bonus(dec!(0.01), dec!(2), hf, dec!(0.1), dec!(0.02), cr);
        let drift = (bonus - dec!(0.0696884735)).abs();
        assert!(drift < dec!(0.0000000001), "bonus drifted by {drift}");
    }

    #[test]
    fn max_debt_repayable_matches_reference_position() {
        let (collaterals, debts, prices, params) = fixture();
        let hf = liquidation_threshold_health_factor(&collaterals, &debts, &prices, &params);
        let cr = collateral_ratio(&debts, &collaterals, &prices);
        let bonus = liquidation_bonus(dec!(0.01), dec!(2), hf, dec!(0.1), dec!(0.02), cr);
        let mdr = max_debt_repayable(
            dec!(1.2),
            &debts,
            &collaterals,
            &params,
            bonus,
            &prices,
            "uosmo",
        );
        assert_eq!(mdr.round(), dec!(20178));
    }

    #[test]
    fn bonus_is_capped_by_remaining_over_collateralization() {
        // CR of 1.03 caps the bonus at 3% even though HF is terrible.
        let bonus = liquidation_bonus(
            dec!(0.01),
            dec!(2),
            dec!(0.5),
            dec!(0.1),
            dec!(0.02),
            dec!(1.03),
        );
        assert_eq!(bonus, dec!(0.03));
    }

    #[test]
    fn bonus_floor_applies_to_underwater_positions() {
        // CR below one would make the cap negative without the floor.
        let bonus = liquidation_bonus(
            dec!(0.01),
            dec!(2),
            dec!(0.99),
            dec!(0.1),
            dec!(0.02),
            dec!(0.95),
        );
        assert_eq!(bonus, dec!(0.02));
    }

    #[test]
    fn largest_entries_are_picked_by_value() {
        let (collaterals, debts, prices, _) = fixture();
        // uosmo: 30000, ujake: 2000, uatom: 7380.
        assert_eq!(
            largest_collateral(&collaterals, &prices).unwrap().denom,
            "uosmo"
        );
        // uusdc: 25500, untrn: 6600.
        assert_eq!(largest_debt(&debts, &prices).unwrap().denom, "uusdc");
    }

    #[test]
    fn largest_of_empty_is_none() {
        let prices = PriceMap::new();
        assert!(largest_collateral(&[], &prices).is_none());
        assert!(largest_debt(&[], &prices).is_none());
    }
}
