//! Executor configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use liqbot_router::DEFAULT_MAX_HOPS;

/// Configuration for the liquidation executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Settlement asset seized collateral is converted into.
    pub neutral_denom: String,
    /// Route-length cap for discovery.
    pub max_hops: usize,
    /// Health factor a liquidation should restore the position to.
    pub target_health_factor: Decimal,
    /// Base liquidation bonus.
    pub bonus_base: Decimal,
    /// Bonus growth per unit of health-factor shortfall.
    pub bonus_slope: Decimal,
    /// Protocol floor for the bonus.
    pub min_bonus: Decimal,
    /// Protocol cap for the bonus.
    pub max_bonus: Decimal,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            neutral_denom: "uusdc".to_string(),
            max_hops: DEFAULT_MAX_HOPS,
            target_health_factor: Decimal::new(12, 1),
            bonus_base: Decimal::new(1, 2),
            bonus_slope: Decimal::TWO,
            min_bonus: Decimal::new(2, 2),
            max_bonus: Decimal::new(1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_sane() {
        let config = ExecutorConfig::default();
        assert_eq!(config.target_health_factor, dec!(1.2));
        assert!(config.min_bonus < config.max_bonus);
    }

    #[test]
    fn deserializes_from_json() {
        let config: ExecutorConfig = serde_json::from_str(
            r#"{
                "neutral_denom": "uusdc",
                "max_hops": 3,
                "target_health_factor": "1.25",
                "bonus_base": "0.01",
                "bonus_slope": "2",
                "min_bonus": "0.02",
                "max_bonus": "0.1"
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_hops, 3);
        assert_eq!(config.target_health_factor, dec!(1.25));
    }
}
