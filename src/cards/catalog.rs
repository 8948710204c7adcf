//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card that can appear in packs and
//! battles. It is built once and never mutated, so it can be shared
//! between threads behind an `Arc` without locking.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{Card, CardId};
use super::rarity::Rarity;
use super::table::standard_cards;

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),

    #[error("duplicate card name {0:?}")]
    DuplicateName(String),
}

/// Immutable card table.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardCatalog, Rarity};
///
/// let catalog = CardCatalog::standard();
///
/// let sprite = catalog.card_by_name("fire sprite").unwrap();
/// assert_eq!(sprite.attack, 2);
/// assert_eq!(catalog.cards_by_rarity(Rarity::Legendary).len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_id: FxHashMap<CardId, usize>,
    by_name: FxHashMap<String, usize>,
    by_rarity: [Vec<usize>; 5],
}

impl CardCatalog {
    /// Build a catalog from a list of cards.
    ///
    /// Ids must be unique, and names must be unique ignoring case.
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut by_id = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        let mut by_rarity: [Vec<usize>; 5] = Default::default();

        for (index, card) in cards.iter().enumerate() {
            if by_id.insert(card.id, index).is_some() {
                return Err(CatalogError::DuplicateId(card.id));
            }
            if by_name.insert(card.name.to_lowercase(), index).is_some() {
                return Err(CatalogError::DuplicateName(card.name.clone()));
            }
            by_rarity[card.rarity.index()].push(index);
        }

        Ok(Self {
            cards,
            by_id,
            by_name,
            by_rarity,
        })
    }

    /// The standard 64-card set.
    #[must_use]
    pub fn standard() -> Self {
        let cards = standard_cards();
        let mut by_id = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        let mut by_rarity: [Vec<usize>; 5] = Default::default();

        for (index, card) in cards.iter().enumerate() {
            by_id.insert(card.id, index);
            by_name.insert(card.name.to_lowercase(), index);
            by_rarity[card.rarity.index()].push(index);
        }

        Self {
            cards,
            by_id,
            by_name,
            by_rarity,
        }
    }

    /// Every card, in table order.
    #[must_use]
    pub fn all_cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of one rarity, in table order.
    #[must_use]
    pub fn cards_by_rarity(&self, rarity: Rarity) -> Vec<&Card> {
        self.by_rarity[rarity.index()]
            .iter()
            .map(|&i| &self.cards[i])
            .collect()
    }

    /// Number of cards of one rarity.
    #[must_use]
    pub fn rarity_count(&self, rarity: Rarity) -> usize {
        self.by_rarity[rarity.index()].len()
    }

    /// Look up a card by name, ignoring case.
    #[must_use]
    pub fn card_by_name(&self, name: &str) -> Option<&Card> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| &self.cards[i])
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.by_id.get(&id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
