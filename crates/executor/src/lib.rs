//! Executor seam: snapshot providers, configuration and liquidation
//! planning.
//!
//! The planner here is pure: it consumes the snapshots the providers hand
//! it and produces a sized liquidation plan. Fetching state, encoding
//! protocol messages and broadcasting transactions belong to provider and
//! transport implementations outside this crate.

/// Executor configuration.
pub mod config;
/// Liquidation sizing pipeline.
pub mod planner;
/// Snapshot provider traits.
pub mod providers;

pub use config::ExecutorConfig;
pub use planner::{LiquidationPlan, plan_liquidation};
pub use providers::{
    AssetParamsProvider, PoolProvider, PositionProvider, PriceProvider, RawPosition,
};
