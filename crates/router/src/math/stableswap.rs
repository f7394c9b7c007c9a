//! Stable-swap invariant math.
//!
//! Balances are scaled by per-asset factors, then priced on the
//! low-slippage invariant `k = x*y*(x^2 + y^2 + w)`, where `x` and `y` are
//! the scaled in/out balances and `w` is the sum of squares of the other
//! scaled balances in the pool. The post-trade balance is solved with
//! Newton's method. Amounts here are gross of fees; the dispatch layer
//! applies the fee convention.

use liqbot_domain::Coin;
use rust_decimal::Decimal;

use crate::error::SwapError;

const MAX_ITERATIONS: usize = 255;

/// Gross output of `token_out` for selling `amount_in` of `token_in`.
pub fn out_given_in(
    liquidity: &[Coin],
    scaling_factors: &[Decimal],
    token_in: &str,
    token_out: &str,
    amount_in: Decimal,
) -> Result<Decimal, SwapError> {
    let pool = ScaledPool::new(liquidity, scaling_factors, token_in, token_out)?;
    let x_new = pool.x + amount_in / pool.in_factor;
    let y_new = solve_balance(x_new, pool.y, pool.w, pool.invariant())?;
    let out_scaled = pool.y - y_new;
    if out_scaled <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    Ok(out_scaled * pool.out_factor)
}

/// Gross input of `token_in` required to buy `amount_out` of `token_out`.
pub fn in_given_out(
    liquidity: &[Coin],
    scaling_factors: &[Decimal],
    token_in: &str,
    token_out: &str,
    amount_out: Decimal,
) -> Result<Decimal, SwapError> {
    let pool = ScaledPool::new(liquidity, scaling_factors, token_in, token_out)?;
    let y_new = pool.y - amount_out / pool.out_factor;
    if y_new <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    let x_new = solve_balance(y_new, pool.x, pool.w, pool.invariant())?;
    let in_scaled = x_new - pool.x;
    if in_scaled <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    Ok(in_scaled * pool.in_factor)
}

/// Scaled view of the pool from the perspective of one in/out pair.
struct ScaledPool {
    /// Scaled balance of the input denom.
    x: Decimal,
    /// Scaled balance of the output denom.
    y: Decimal,
    /// Sum of squares of the remaining scaled balances.
    w: Decimal,
    in_factor: Decimal,
    out_factor: Decimal,
}

impl ScaledPool {
    fn new(
        liquidity: &[Coin],
        scaling_factors: &[Decimal],
        token_in: &str,
        token_out: &str,
    ) -> Result<Self, SwapError> {
        if liquidity.len() != scaling_factors.len() {
            return Err(SwapError::MismatchedScalingFactors);
        }
        let mut x = None;
        let mut y = None;
        let mut in_factor = Decimal::ONE;
        let mut out_factor = Decimal::ONE;
        let mut w = Decimal::ZERO;
        for (coin, factor) in liquidity.iter().zip(scaling_factors) {
            if *factor <= Decimal::ZERO {
                return Err(SwapError::MismatchedScalingFactors);
            }
            let scaled = coin.amount / factor;
            if coin.denom == token_in {
                x = Some(scaled);
                in_factor = *factor;
            } else if coin.denom == token_out {
                y = Some(scaled);
                out_factor = *factor;
            } else {
                w += scaled * scaled;
            }
        }
        let x = x.ok_or_else(|| SwapError::DenomNotInPool(token_in.to_string()))?;
        let y = y.ok_or_else(|| SwapError::DenomNotInPool(token_out.to_string()))?;
        if x <= Decimal::ZERO || y <= Decimal::ZERO {
            return Err(SwapError::InsufficientReserves);
        }
        Ok(Self {
            x,
            y,
            w,
            in_factor,
            out_factor,
        })
    }

    fn invariant(&self) -> Decimal {
        self.x * self.y * (self.x * self.x + self.y * self.y + self.w)
    }
}

/// Solves `a * b * (a^2 + b^2 + w) = k` for `b`, with `a` the known
/// post-trade balance, starting the iteration from the pre-trade side.
fn solve_balance(a: Decimal, b_start: Decimal, w: Decimal, k: Decimal) -> Result<Decimal, SwapError> {
    let tolerance = Decimal::new(1, 15);
    let mut b = b_start;
    for _ in 0..MAX_ITERATIONS {
        let f = a * b * (a * a + b * b + w) - k;
        let derivative = a * (a * a + Decimal::from(3) * b * b + w);
        if derivative.is_zero() {
            return Err(SwapError::NoConvergence);
        }
        let step = f / derivative;
        b -= step;
        if b <= Decimal::ZERO {
            return Err(SwapError::InsufficientReserves);
        }
        if step.abs() <= tolerance {
            return Ok(b);
        }
    }
    Err(SwapError::NoConvergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constant_product;
    use rust_decimal_macros::dec;

    fn balanced_pool() -> (Vec<Coin>, Vec<Decimal>) {
        (
            vec![
                Coin::new("uusdc", dec!(1000000)),
                Coin::new("uusdt", dec!(1000000)),
            ],
            vec![Decimal::ONE, Decimal::ONE],
        )
    }

    #[test]
    fn stable_swap_has_less_slippage_than_constant_product() {
        let (liquidity, factors) = balanced_pool();
        let amount = dec!(100000);
        let stable_out =
            out_given_in(&liquidity, &factors, "uusdc", "uusdt", amount).unwrap();
        let xyk_out =
            constant_product::calculate_output(dec!(1000000), dec!(1000000), amount).unwrap();
        assert!(stable_out > xyk_out);
        assert!(stable_out < amount);
    }

    #[test]
    fn forward_and_inverse_agree() {
        let (liquidity, factors) = balanced_pool();
        let amount_in = dec!(2500);
        let out = out_given_in(&liquidity, &factors, "uusdc", "uusdt", amount_in).unwrap();
        let back = in_given_out(&liquidity, &factors, "uusdc", "uusdt", out).unwrap();
        let drift = (back - amount_in).abs();
        assert!(drift < dec!(0.000001), "round trip drifted by {drift}");
    }

    #[test]
    fn scaling_factors_normalize_unbalanced_decimals() {
        // Same economic pool, one side carrying 100x units.
        let liquidity = vec![
            Coin::new("uusdc", dec!(100000000)),
            Coin::new("uusdt", dec!(1000000)),
        ];
        let factors = vec![dec!(100), Decimal::ONE];
        let out = out_given_in(&liquidity, &factors, "uusdc", "uusdt", dec!(100)).unwrap();
        // 100 units at factor 100 is one scaled unit, near peg.
        assert!(out > dec!(0.99) && out <= Decimal::ONE);
    }

    #[test]
    fn third_asset_contributes_to_the_invariant() {
        let liquidity = vec![
            Coin::new("uusdc", dec!(1000000)),
            Coin::new("uusdt", dec!(1000000)),
            Coin::new("udai", dec!(1000000)),
        ];
        let factors = vec![Decimal::ONE, Decimal::ONE, Decimal::ONE];
        let out = out_given_in(&liquidity, &factors, "uusdc", "uusdt", dec!(1000)).unwrap();
        assert!(out > Decimal::ZERO && out < dec!(1000));
    }

    #[test]
    fn emptying_the_out_side_is_rejected() {
        let (liquidity, factors) = balanced_pool();
        assert_eq!(
            in_given_out(&liquidity, &factors, "uusdc", "uusdt", dec!(1000000)),
            Err(SwapError::InsufficientReserves)
        );
    }

    #[test]
    fn mismatched_factor_vector_is_rejected() {
        let (liquidity, _) = balanced_pool();
        assert_eq!(
            out_given_in(&liquidity, &[Decimal::ONE], "uusdc", "uusdt", dec!(1)),
            Err(SwapError::MismatchedScalingFactors)
        );
    }
}
