//! Persistence contracts and in-memory implementations.
//!
//! - [`CollectionStore`]: owned cards and pack tokens per player
//! - [`BattleStore`]: serialized battle state keyed by battle id

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{InMemoryBattleStore, InMemoryCollectionStore};
pub use traits::{BattleStore, CollectionStore, PackType};
