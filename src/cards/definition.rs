//! Card definitions - static card data.
//!
//! `Card` holds the immutable properties of a catalog entry. "Fire Sprite"
//! always has 2 attack and 1 health; those numbers live here.
//!
//! Battle-specific data (damage taken, shield, stun) is stored separately
//! in `BattleCard`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::element::Element;
use super::rarity::Rarity;
use crate::abilities::AbilityId;

/// Unique identifier for a catalog card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

bitflags! {
    /// Keyword flags set when a card is authored.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Keywords: u8 {
        /// Can attack the turn it enters play.
        const RUSH = 1 << 0;
        /// Cannot be blocked.
        const FLYING = 1 << 1;
        /// Cannot be targeted.
        const STEALTH = 1 << 2;
        /// Must be attacked first.
        const TAUNT = 1 << 3;
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{Card, CardId, Element, Keywords, Rarity};
///
/// let scout = Card::new(CardId::new(3), "Ember Scout", Element::Fire, Rarity::Common)
///     .with_stats(1, 2)
///     .with_cost(1)
///     .with_keywords(Keywords::RUSH);
///
/// assert_eq!(scout.attack, 1);
/// assert!(scout.keywords.contains(Keywords::RUSH));
/// assert!(scout.ability.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Display name, unique within a catalog ignoring case.
    pub name: String,

    pub element: Element,

    pub rarity: Rarity,

    /// Base attack.
    pub attack: u32,

    /// Base (and maximum) health.
    pub health: u32,

    pub cost: u32,

    /// Ability, if the card has one.
    pub ability: Option<AbilityId>,

    pub keywords: Keywords,

    /// Multi-line text art. Opaque to the engine.
    pub art: String,
}

impl Card {
    /// Create a card with zero stats and no ability.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, element: Element, rarity: Rarity) -> Self {
        Self {
            id,
            name: name.into(),
            element,
            rarity,
            attack: 0,
            health: 0,
            cost: 0,
            ability: None,
            keywords: Keywords::empty(),
            art: String::new(),
        }
    }

    /// Set base attack and health.
    #[must_use]
    pub fn with_stats(mut self, attack: u32, health: u32) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Attach an ability.
    #[must_use]
    pub fn with_ability(mut self, ability: AbilityId) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Add keyword flags.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords |= keywords;
        self
    }

    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = art.into();
        self
    }

    /// Human-readable ability text, or "None".
    #[must_use]
    pub fn ability_text(&self) -> &'static str {
        self.ability.map_or("None", AbilityId::text)
    }

    /// Does this card's element beat the other card's?
    #[must_use]
    pub fn has_advantage_over(&self, other: &Card) -> bool {
        self.element.has_advantage_over(other.element)
    }
}
