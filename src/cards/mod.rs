//! Card system: definitions, the catalog, and battle instances.
//!
//! ## Key Types
//!
//! - `Element`: Six elemental tags with a fixed "beats" relation
//! - `Rarity` / `RarityTable`: Rarity tiers and pack drop weights
//! - `Card`: Immutable catalog entry
//! - `CardCatalog`: Card lookup by id, name and rarity
//! - `BattleCard`: Mutable in-battle copy of a card, owned by one player

pub mod catalog;
pub mod definition;
pub mod element;
pub mod instance;
pub mod rarity;
mod table;

pub use catalog::{CardCatalog, CatalogError};
pub use definition::{Card, CardId, Keywords};
pub use element::Element;
pub use instance::BattleCard;
pub use rarity::{Rarity, RarityTable};
