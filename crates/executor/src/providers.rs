//! Snapshot provider traits.
//!
//! Implementations fetch pool, price, risk-parameter and position state
//! from chain or indexer endpoints on a refresh timer. The core only ever
//! sees the immutable snapshots they return.

use async_trait::async_trait;
use liqbot_domain::{AssetParamsMap, Collateral, Debt, Pool, PriceMap};
use serde::{Deserialize, Serialize};

/// A borrower position as handed over by a position provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Position owner address.
    pub address: String,
    /// Collateral entries.
    pub collaterals: Vec<Collateral>,
    /// Debt entries.
    pub debts: Vec<Debt>,
}

/// Supplies the current pool snapshot for a chain.
#[async_trait]
pub trait PoolProvider: Send + Sync {
    /// The pools as of now.
    async fn current_pools(&self) -> anyhow::Result<Vec<Pool>>;
}

/// Supplies the current oracle price snapshot.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unit prices per denom as of now.
    async fn current_prices(&self) -> anyhow::Result<PriceMap>;
}

/// Supplies the protocol's per-asset risk parameters.
#[async_trait]
pub trait AssetParamsProvider: Send + Sync {
    /// Max loan-to-value and liquidation threshold per denom.
    async fn current_params(&self) -> anyhow::Result<AssetParamsMap>;
}

/// Supplies candidate positions to check for liquidation.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Positions flagged as at or near liquidation by the indexer.
    async fn unhealthy_positions(&self) -> anyhow::Result<Vec<RawPosition>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct FixedPositions(Vec<RawPosition>);

    #[async_trait]
    impl PositionProvider for FixedPositions {
        async fn unhealthy_positions(&self) -> anyhow::Result<Vec<RawPosition>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn providers_are_object_safe() {
        let provider: Box<dyn PositionProvider> = Box::new(FixedPositions(vec![RawPosition {
            address: "osmo1abc".to_string(),
            collaterals: vec![Collateral::new("uosmo", dec!(10))],
            debts: vec![Debt::new("uusdc", dec!(5))],
        }]));
        let positions = provider.unhealthy_positions().await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].address, "osmo1abc");
    }
}
