//! # card-duel
//!
//! A collectible card duel engine: one card per player, turn-based attacks,
//! elemental flavor, triggered abilities, and weighted-random booster packs.
//!
//! ## Design Principles
//!
//! 1. **Stable Ability Ids**: Cards reference abilities by [`AbilityId`],
//!    never by their display text. Keyword flags are set when a card is
//!    authored.
//!
//! 2. **Pure Resolution**: [`AbilityResolver::execute`] returns a typed
//!    outcome. Only the battle applies it.
//!
//! 3. **Injected Services**: Catalog, resolver, stores and configuration are
//!    built explicitly and shared through `Arc`. There are no globals.
//!
//! ## Architecture
//!
//! - **Per-Battle Locking**: Each live battle has its own lock. The session
//!   table has another. Store calls happen outside both.
//!
//! - **Deterministic RNG**: Every battle owns a ChaCha8 stream that is saved
//!   with it, so a restored battle rolls the same dodges.
//!
//! ## Modules
//!
//! - `core`: Player and battle ids, RNG, configuration
//! - `cards`: Elements, rarities, card definitions, the catalog, battle cards
//! - `abilities`: Ability ids, effects, damage mitigation, the resolver
//! - `battle`: The battle state machine, its log and snapshots
//! - `packs`: Token-gated pack opening
//! - `manager`: Session registry and command entry points
//! - `store`: Collection and battle store contracts with in-memory versions

pub mod abilities;
pub mod battle;
pub mod cards;
pub mod core;
pub mod manager;
pub mod packs;
pub mod store;

// Re-export commonly used types
pub use crate::core::{BattleId, ConfigError, EngineConfig, GameRng, GameRngState, PlayerId};

pub use crate::cards::{
    BattleCard, Card, CardCatalog, CardId, CatalogError, Element, Keywords, Rarity, RarityTable,
};

pub use crate::abilities::{
    AbilityEffect, AbilityId, AbilityResolver, DamageBreakdown, EffectKind, EffectOutcome,
    ExecutionContext, ExecutionFailure, ExecutionResult, ResolvedTarget, TargetScope,
    TriggerCondition,
};

pub use crate::battle::{
    AttackOutcome, AttackResult, Battle, BattleError, BattleLog, BattleState, BattleStateView,
    LogEntry, TurnPhase,
};

pub use crate::packs::{PackError, PackOpener};

pub use crate::manager::{BattleManager, ManagerError};

pub use crate::store::{
    BattleStore, CollectionStore, InMemoryBattleStore, InMemoryCollectionStore, PackType,
    StoreError,
};
