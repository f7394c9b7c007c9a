//! Concentrated-liquidity tick walking.
//!
//! A swap walks the directional liquidity-depth list from the current
//! sqrt-price, consuming each tick segment with the in-range liquidity and
//! crossing into the next segment by applying the tick's signed net
//! liquidity. Running out of ticks before the request is satisfied is the
//! distinct [`SwapResult::Exhausted`] outcome, not an error and not zero.
//!
//! Per-segment closed forms, with `L` the in-range liquidity and `s` the
//! sqrt-price (token1 per token0):
//!
//! - token0 moved across `[s_lo, s_hi]`: `dx = L * (s_hi - s_lo) / (s_hi * s_lo)`
//! - token1 moved across `[s_lo, s_hi]`: `dy = L * (s_hi - s_lo)`

use liqbot_domain::LiquidityDepth;
use rust_decimal::{Decimal, MathematicalOps};

use crate::error::SwapError;
use crate::math::SwapResult;

/// Sqrt-price at a tick index: `sqrt(1.0001^tick)`.
///
/// `None` when the tick's price is not representable as a `Decimal`.
#[must_use]
pub fn tick_to_sqrt_price(tick_index: i64) -> Option<Decimal> {
    let base = Decimal::new(10001, 4);
    let price = if tick_index >= 0 {
        base.checked_powi(tick_index)?
    } else {
        Decimal::ONE / base.checked_powi(-tick_index)?
    };
    price.sqrt()
}

/// Output of the pool for `amount_in`, net of fees, walking `ticks`.
///
/// `zero_for_one` sells token0 and moves the price down; otherwise token1
/// is sold and the price moves up. The fee is deducted from each segment's
/// output in proportion to the portion consumed there.
pub fn out_given_in(
    current_liquidity: Decimal,
    current_sqrt_price: Decimal,
    ticks: &[LiquidityDepth],
    zero_for_one: bool,
    amount_in: Decimal,
    swap_fee: Decimal,
) -> Result<SwapResult, SwapError> {
    if current_sqrt_price <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    let fee_keep = Decimal::ONE - swap_fee;
    let mut liquidity = current_liquidity.max(Decimal::ZERO);
    let mut sqrt_price = current_sqrt_price;
    let mut remaining = amount_in;
    let mut output = Decimal::ZERO;

    for depth in ticks {
        if remaining.is_zero() {
            break;
        }
        let Some(next_sqrt_price) = tick_to_sqrt_price(depth.tick_index) else {
            return Err(SwapError::TickOutOfRange);
        };
        // Ticks on the wrong side of the current price cannot bound this
        // walk; skip them rather than move the price backwards.
        let in_direction = if zero_for_one {
            next_sqrt_price < sqrt_price
        } else {
            next_sqrt_price > sqrt_price
        };
        if !in_direction || next_sqrt_price <= Decimal::ZERO {
            continue;
        }

        if !liquidity.is_zero() {
            if zero_for_one {
                let max_in = liquidity * (sqrt_price - next_sqrt_price)
                    / (sqrt_price * next_sqrt_price);
                if remaining < max_in {
                    let new_sqrt_price =
                        liquidity * sqrt_price / (liquidity + remaining * sqrt_price);
                    output += liquidity * (sqrt_price - new_sqrt_price) * fee_keep;
                    return Ok(SwapResult::Amount(output));
                }
                output += liquidity * (sqrt_price - next_sqrt_price) * fee_keep;
                remaining -= max_in;
            } else {
                let max_in = liquidity * (next_sqrt_price - sqrt_price);
                if remaining < max_in {
                    let new_sqrt_price = sqrt_price + remaining / liquidity;
                    output += liquidity * (new_sqrt_price - sqrt_price)
                        / (sqrt_price * new_sqrt_price)
                        * fee_keep;
                    return Ok(SwapResult::Amount(output));
                }
                output += liquidity * (next_sqrt_price - sqrt_price)
                    / (sqrt_price * next_sqrt_price)
                    * fee_keep;
                remaining -= max_in;
            }
        }

        // Cross the tick into the next segment.
        sqrt_price = next_sqrt_price;
        liquidity = (liquidity + depth.liquidity_net).max(Decimal::ZERO);
    }

    if remaining.is_zero() {
        Ok(SwapResult::Amount(output))
    } else {
        Ok(SwapResult::Exhausted)
    }
}

/// Input the pool requires for `amount_out`, fees included, walking `ticks`.
///
/// `zero_for_one` buys token1 with token0 and moves the price down;
/// otherwise token0 is bought and the price moves up. Each segment adds its
/// portion of the requested output times the fee to the required input,
/// consistent with the constant-product convention.
pub fn in_given_out(
    current_liquidity: Decimal,
    current_sqrt_price: Decimal,
    ticks: &[LiquidityDepth],
    zero_for_one: bool,
    amount_out: Decimal,
    swap_fee: Decimal,
) -> Result<SwapResult, SwapError> {
    if current_sqrt_price <= Decimal::ZERO {
        return Err(SwapError::InsufficientReserves);
    }
    let mut liquidity = current_liquidity.max(Decimal::ZERO);
    let mut sqrt_price = current_sqrt_price;
    let mut remaining = amount_out;
    let mut input = Decimal::ZERO;

    for depth in ticks {
        if remaining.is_zero() {
            break;
        }
        let Some(next_sqrt_price) = tick_to_sqrt_price(depth.tick_index) else {
            return Err(SwapError::TickOutOfRange);
        };
        let in_direction = if zero_for_one {
            next_sqrt_price < sqrt_price
        } else {
            next_sqrt_price > sqrt_price
        };
        if !in_direction || next_sqrt_price <= Decimal::ZERO {
            continue;
        }

        if !liquidity.is_zero() {
            if zero_for_one {
                // Buying token1; segment capacity in token1.
                let max_out = liquidity * (sqrt_price - next_sqrt_price);
                if remaining < max_out {
                    let new_sqrt_price = sqrt_price - remaining / liquidity;
                    input += liquidity * (sqrt_price - new_sqrt_price)
                        / (sqrt_price * new_sqrt_price)
                        + remaining * swap_fee;
                    return Ok(SwapResult::Amount(input));
                }
                input += liquidity * (sqrt_price - next_sqrt_price)
                    / (sqrt_price * next_sqrt_price)
                    + max_out * swap_fee;
                remaining -= max_out;
            } else {
                // Buying token0; segment capacity in token0.
                let max_out = liquidity * (next_sqrt_price - sqrt_price)
                    / (sqrt_price * next_sqrt_price);
                if remaining < max_out {
                    let divisor = liquidity - remaining * sqrt_price;
                    if divisor <= Decimal::ZERO {
                        return Err(SwapError::InsufficientReserves);
                    }
                    let new_sqrt_price = liquidity * sqrt_price / divisor;
                    input += liquidity * (new_sqrt_price - sqrt_price) + remaining * swap_fee;
                    return Ok(SwapResult::Amount(input));
                }
                input += liquidity * (next_sqrt_price - sqrt_price) + max_out * swap_fee;
                remaining -= max_out;
            }
        }

        sqrt_price = next_sqrt_price;
        liquidity = (liquidity + depth.liquidity_net).max(Decimal::ZERO);
    }

    if remaining.is_zero() {
        Ok(SwapResult::Amount(input))
    } else {
        Ok(SwapResult::Exhausted)
    }
}
