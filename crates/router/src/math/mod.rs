//! Per-variant swap math engine.
//!
//! Forward (`out given in`) and inverse (`in given out`) amounts are
//! dispatched by exhaustive match on the pool variant. The fee convention
//! is shared across variants: forward swaps deduct the fee from the gross
//! output, inverse swaps add `desired_out * fee` to the required input.

use liqbot_domain::{Pool, PoolVariant};
use rust_decimal::Decimal;

use crate::error::SwapError;

/// Constant-product (x*y=k) closed forms.
pub mod constant_product;
/// Concentrated-liquidity tick walking.
pub mod concentrated;
/// Stable-swap invariant solver.
pub mod stableswap;

/// Outcome of a single swap computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapResult {
    /// The computed output (forward) or required input (inverse).
    Amount(Decimal),
    /// The pool ran out of liquidity in this direction before the request
    /// was satisfied. The hop is topologically valid but worthless for
    /// this amount.
    Exhausted,
}

impl SwapResult {
    /// The amount, treating exhaustion as zero.
    #[must_use]
    pub fn amount_or_zero(self) -> Decimal {
        match self {
            SwapResult::Amount(amount) => amount,
            SwapResult::Exhausted => Decimal::ZERO,
        }
    }
}

/// Computes the output of swapping `amount_in` of `token_in` for
/// `token_out` through `pool`, net of fees.
///
/// A zero input short-circuits to a zero result without touching any
/// curve math.
pub fn out_given_in(
    pool: &Pool,
    token_in: &str,
    token_out: &str,
    amount_in: Decimal,
) -> Result<SwapResult, SwapError> {
    if amount_in.is_zero() {
        return Ok(SwapResult::Amount(Decimal::ZERO));
    }

    match &pool.variant {
        PoolVariant::ConstantProduct { assets } => {
            let x = reserve(assets, token_in)?;
            let y = reserve(assets, token_out)?;
            let gross = constant_product::calculate_output(x, y, amount_in)?;
            Ok(SwapResult::Amount(gross - gross * pool.swap_fee))
        }
        PoolVariant::ConcentratedLiquidity {
            current_liquidity,
            current_sqrt_price,
            depths,
        } => {
            let zero_for_one = token_in == pool.token0;
            let ticks = if zero_for_one {
                &depths.zero_to_one
            } else {
                &depths.one_to_zero
            };
            concentrated::out_given_in(
                *current_liquidity,
                *current_sqrt_price,
                ticks,
                zero_for_one,
                amount_in,
                pool.swap_fee,
            )
        }
        PoolVariant::StableSwap {
            liquidity,
            scaling_factors,
        } => {
            let gross = stableswap::out_given_in(
                liquidity,
                scaling_factors,
                token_in,
                token_out,
                amount_in,
            )?;
            Ok(SwapResult::Amount(gross - gross * pool.swap_fee))
        }
    }
}

/// Computes the input of `token_in` required to receive `amount_out` of
/// `token_out` from `pool`, fees included.
///
/// A zero requested output short-circuits to a zero result without
/// touching any curve math.
pub fn in_given_out(
    pool: &Pool,
    token_in: &str,
    token_out: &str,
    amount_out: Decimal,
) -> Result<SwapResult, SwapError> {
    if amount_out.is_zero() {
        return Ok(SwapResult::Amount(Decimal::ZERO));
    }

    match &pool.variant {
        PoolVariant::ConstantProduct { assets } => {
            let x = reserve(assets, token_in)?;
            let y = reserve(assets, token_out)?;
            let gross = constant_product::calculate_required_input(x, y, amount_out)?;
            Ok(SwapResult::Amount(gross + amount_out * pool.swap_fee))
        }
        PoolVariant::ConcentratedLiquidity {
            current_liquidity,
            current_sqrt_price,
            depths,
        } => {
            // The walk direction is the direction the swap moves the price,
            // so it is selected by the *output* denom here.
            let zero_for_one = token_out == pool.token1;
            let ticks = if zero_for_one {
                &depths.zero_to_one
            } else {
                &depths.one_to_zero
            };
            concentrated::in_given_out(
                *current_liquidity,
                *current_sqrt_price,
                ticks,
                zero_for_one,
                amount_out,
                pool.swap_fee,
            )
        }
        PoolVariant::StableSwap {
            liquidity,
            scaling_factors,
        } => {
            let gross = stableswap::in_given_out(
                liquidity,
                scaling_factors,
                token_in,
                token_out,
                amount_out,
            )?;
            Ok(SwapResult::Amount(gross + amount_out * pool.swap_fee))
        }
    }
}

fn reserve(assets: &[liqbot_domain::Coin], denom: &str) -> Result<Decimal, SwapError> {
    assets
        .iter()
        .find(|asset| asset.denom == denom)
        .map(|asset| asset.amount)
        .ok_or_else(|| SwapError::DenomNotInPool(denom.to_string()))
}
