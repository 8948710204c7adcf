//! Core engine types: identifiers, RNG, configuration.
//!
//! These are the building blocks shared by the card, battle and pack
//! modules. Nothing here knows about a particular card set.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{BattleId, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, EngineConfig, DEFAULT_CARDS_PER_PACK, DEFAULT_LOG_TAIL};
