//! Pool snapshot model.
//!
//! A pool is identified by an opaque id, trades exactly two denoms and
//! carries a variant tag selecting the pricing curve. The variant is fixed
//! at construction; the swap engine matches on it exhaustively.

use crate::coin::Coin;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One liquidity-depth record of a concentrated-liquidity pool.
///
/// `liquidity_net` is the signed delta applied to the in-range liquidity
/// when a swap walk crosses this tick in the direction of the list the
/// record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityDepth {
    /// Tick index marking the price boundary.
    pub tick_index: i64,
    /// Signed net-liquidity change when crossing the tick.
    pub liquidity_net: Decimal,
}

/// Liquidity-depth lists for both swap directions.
///
/// Ticks are discovered directionally from the current price, so each list
/// is already ordered in walk order for its direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalDepths {
    /// Ticks below the current price, walked when swapping token0 -> token1.
    pub zero_to_one: Vec<LiquidityDepth>,
    /// Ticks above the current price, walked when swapping token1 -> token0.
    pub one_to_zero: Vec<LiquidityDepth>,
}

/// Curve-specific pool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PoolVariant {
    /// x*y=k pool. Reserve ordering is not fixed; look reserves up by denom.
    ConstantProduct {
        /// The two pooled reserves.
        assets: Vec<Coin>,
    },
    /// Tick-based concentrated-liquidity pool.
    ConcentratedLiquidity {
        /// Liquidity active in the current tick range.
        current_liquidity: Decimal,
        /// Current sqrt price (token1 per token0).
        current_sqrt_price: Decimal,
        /// Directional liquidity-depth lists.
        depths: DirectionalDepths,
    },
    /// Low-slippage stable-swap pool over two or more pooled assets.
    StableSwap {
        /// One balance per pooled denom.
        liquidity: Vec<Coin>,
        /// Per-asset scaling factor, index-matched with `liquidity`.
        scaling_factors: Vec<Decimal>,
    },
}

/// A pool snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// Opaque pool id, unique within a snapshot.
    pub id: u64,
    /// First traded denom.
    pub token0: String,
    /// Second traded denom.
    pub token1: String,
    /// Swap fee as a decimal fraction (0.003 = 0.3%).
    pub swap_fee: Decimal,
    /// Pricing-curve variant and its state.
    pub variant: PoolVariant,
}

impl Pool {
    /// Whether the pool trades the given denom.
    #[must_use]
    pub fn touches(&self, denom: &str) -> bool {
        self.token0 == denom || self.token1 == denom
    }

    /// The denom on the other side of the pool, if `denom` is one of the two.
    #[must_use]
    pub fn other_denom(&self, denom: &str) -> Option<&str> {
        if self.token0 == denom {
            Some(&self.token1)
        } else if self.token1 == denom {
            Some(&self.token0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn xyk(id: u64, token0: &str, token1: &str) -> Pool {
        Pool {
            id,
            token0: token0.to_string(),
            token1: token1.to_string(),
            swap_fee: dec!(0.003),
            variant: PoolVariant::ConstantProduct {
                assets: vec![
                    Coin::new(token0, dec!(100)),
                    Coin::new(token1, dec!(100)),
                ],
            },
        }
    }

    #[test]
    fn touches_and_other_denom() {
        let pool = xyk(1, "uosmo", "uatom");
        assert!(pool.touches("uosmo"));
        assert!(pool.touches("uatom"));
        assert!(!pool.touches("uusdc"));
        assert_eq!(pool.other_denom("uosmo"), Some("uatom"));
        assert_eq!(pool.other_denom("uatom"), Some("uosmo"));
        assert_eq!(pool.other_denom("uusdc"), None);
    }

    #[test]
    fn pool_roundtrips_through_serde() {
        let pool = xyk(7, "uosmo", "uatom");
        let json = serde_json::to_string(&pool).unwrap();
        let back: Pool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pool);
    }
}
