//! Engine configuration.
//!
//! Hosts build an `EngineConfig` at startup (or deserialize one from their
//! own config file) and hand it to the services that need it. Every field
//! has a default, so an empty document is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::RarityTable;

/// Cards drawn per pack when the caller does not say otherwise.
pub const DEFAULT_CARDS_PER_PACK: usize = 3;

/// Log entries included in a battle snapshot.
pub const DEFAULT_LOG_TAIL: usize = 5;

/// Errors raised by [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cards per pack must be at least 1")]
    EmptyPack,

    #[error("rarity weights must sum to 100, got {0}")]
    WeightSum(u32),

    #[error("card selection timeout must be positive")]
    ZeroTimeout,
}

/// Configuration shared by the battle manager and the pack opener.
///
/// ## Example
///
/// ```
/// use card_duel::core::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_cards_per_pack(5);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cards_per_pack, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cards drawn by one `open` call.
    pub cards_per_pack: usize,

    /// Number of trailing log entries exposed by snapshots.
    pub log_tail: usize,

    /// Pack drop weights per rarity tier.
    pub rarity_weights: RarityTable,

    /// Seed for every RNG stream. `None` seeds from the OS.
    pub rng_seed: Option<u64>,

    /// Card-selection deadline in seconds. `None` disables expiry.
    pub selection_timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cards_per_pack: DEFAULT_CARDS_PER_PACK,
            log_tail: DEFAULT_LOG_TAIL,
            rarity_weights: RarityTable::default(),
            rng_seed: None,
            selection_timeout_secs: None,
        }
    }
}

impl EngineConfig {
    /// Set a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Set cards per pack.
    #[must_use]
    pub fn with_cards_per_pack(mut self, count: usize) -> Self {
        self.cards_per_pack = count;
        self
    }

    /// Set the snapshot log tail length.
    #[must_use]
    pub fn with_log_tail(mut self, entries: usize) -> Self {
        self.log_tail = entries;
        self
    }

    /// Replace the rarity weights.
    #[must_use]
    pub fn with_rarity_weights(mut self, weights: RarityTable) -> Self {
        self.rarity_weights = weights;
        self
    }

    /// Enable card-selection expiry.
    #[must_use]
    pub fn with_selection_timeout(mut self, timeout: Duration) -> Self {
        self.selection_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Card-selection deadline, if enabled.
    #[must_use]
    pub fn selection_timeout(&self) -> Option<Duration> {
        self.selection_timeout_secs.map(Duration::from_secs)
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards_per_pack == 0 {
            return Err(ConfigError::EmptyPack);
        }

        let total = self.rarity_weights.total();
        if total != 100 {
            return Err(ConfigError::WeightSum(total));
        }

        if self.selection_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rarity;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.cards_per_pack, 3);
        assert_eq!(config.log_tail, 5);
        assert_eq!(config.rarity_weights.weight(Rarity::Common), 60);
        assert_eq!(config.rarity_weights.weight(Rarity::Mythic), 1);
        assert!(config.rng_seed.is_none());
        assert!(config.selection_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_seed(7)
            .with_log_tail(10)
            .with_selection_timeout(Duration::from_secs(300));

        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.log_tail, 10);
        assert_eq!(config.selection_timeout(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_validate_rejects_empty_pack() {
        let config = EngineConfig::default().with_cards_per_pack(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPack));
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let weights = RarityTable::new([50, 25, 10, 4, 1]);
        let config = EngineConfig::default().with_rarity_weights(weights);
        assert_eq!(config.validate(), Err(ConfigError::WeightSum(90)));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = EngineConfig::default().with_selection_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "rng_seed": 99, "selection_timeout_secs": 300 }"#).unwrap();

        assert_eq!(config.rng_seed, Some(99));
        assert_eq!(config.cards_per_pack, DEFAULT_CARDS_PER_PACK);
        assert_eq!(config.rarity_weights, RarityTable::default());
        assert_eq!(config.selection_timeout(), Some(Duration::from_secs(300)));
    }
}
