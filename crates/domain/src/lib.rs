//! Shared domain model for the liquidation bot.
//!
//! Everything in this crate is a *snapshot* value: constructed fresh by a
//! provider on each refresh cycle, consumed read-only by the router and risk
//! crates, and then discarded. Nothing is mutated in place.
//!
//! All money and ratio math uses [`rust_decimal::Decimal`]; floating point is
//! never used for amounts, prices or risk parameters.

/// Coins and price snapshots.
pub mod coin;
/// Pool snapshot model and its variants.
pub mod pool;
/// Borrower position entries and per-asset risk parameters.
pub mod position;

pub use coin::{Coin, PriceMap};
pub use pool::{DirectionalDepths, LiquidityDepth, Pool, PoolVariant};
pub use position::{AssetParams, AssetParamsMap, Collateral, Debt};
