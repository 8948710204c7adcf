//! Weighted-random pack opening.
//!
//! ## Algorithm
//!
//! For each card in the pack:
//! 1. Draw a uniform integer in `1..=100`. Weights are validated to sum to 100.
//! 2. Walk the rarity table in fixed order, accumulating weights, and take
//!    the first tier whose cumulative weight reaches the draw.
//! 3. Pick one card of that tier uniformly. A tier with no cards falls back
//!    to the nearest lower tier that has some.
//!
//! The whole pack is drawn before the store is touched. The token and the
//! cards are then committed together through
//! [`CollectionStore::redeem_pack`], so a failed open changes nothing.

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::cards::{Card, CardCatalog, CardId, Rarity, RarityTable};
use crate::core::{ConfigError, EngineConfig, GameRng, PlayerId};
use crate::store::{CollectionStore, PackType, StoreError};

/// Errors raised by [`PackOpener::open`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("{player} has no {pack_type} pack tokens")]
    NoToken { player: PlayerId, pack_type: PackType },

    #[error("catalog has no cards to draw")]
    EmptyCatalog,

    #[error("a pack must hold at least one card")]
    EmptyPack,

    #[error("pack RNG lock was poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Opens packs against a collection store.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use card_duel::cards::CardCatalog;
/// use card_duel::core::{EngineConfig, PlayerId};
/// use card_duel::packs::{PackError, PackOpener};
/// use card_duel::store::{CollectionStore, InMemoryCollectionStore, PackType};
///
/// let store = Arc::new(InMemoryCollectionStore::new());
/// let opener = PackOpener::new(
///     Arc::new(CardCatalog::standard()),
///     store.clone(),
///     &EngineConfig::default().with_seed(1),
/// )
/// .unwrap();
/// let player = PlayerId::new(1);
///
/// assert!(matches!(
///     opener.open(player, &PackType::standard()),
///     Err(PackError::NoToken { .. })
/// ));
///
/// store.add_tokens(player, &PackType::standard(), 1).unwrap();
/// let cards = opener.open(player, &PackType::standard()).unwrap();
/// assert_eq!(cards.len(), 3);
/// ```
pub struct PackOpener {
    catalog: Arc<CardCatalog>,
    store: Arc<dyn CollectionStore>,
    weights: RarityTable,
    cards_per_pack: usize,
    rng: Mutex<GameRng>,
}

impl PackOpener {
    /// Create an opener using the configured weights, pack size and seed.
    ///
    /// Fails if `config` does not pass [`EngineConfig::validate`].
    pub fn new(
        catalog: Arc<CardCatalog>,
        store: Arc<dyn CollectionStore>,
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            store,
            weights: config.rarity_weights,
            cards_per_pack: config.cards_per_pack,
            rng: Mutex::new(GameRng::seeded_or_random(config.rng_seed).for_context("packs")),
        })
    }

    /// Replace the RNG stream.
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// The configured drop weights.
    #[must_use]
    pub fn drop_rates(&self) -> RarityTable {
        self.weights
    }

    #[must_use]
    pub fn cards_per_pack(&self) -> usize {
        self.cards_per_pack
    }

    /// Open one pack of the default size.
    pub fn open(&self, player: PlayerId, pack_type: &PackType) -> Result<Vec<Card>, PackError> {
        self.open_with(player, pack_type, self.cards_per_pack)
    }

    /// Open one pack of `count` cards.
    ///
    /// Costs exactly one token on success and nothing on failure.
    pub fn open_with(
        &self,
        player: PlayerId,
        pack_type: &PackType,
        count: usize,
    ) -> Result<Vec<Card>, PackError> {
        if count == 0 {
            return Err(PackError::EmptyPack);
        }
        let cards = self.simulate(count)?;
        let ids: SmallVec<[CardId; 8]> = cards.iter().map(|c| c.id).collect();

        if !self.store.redeem_pack(player, pack_type, &ids)? {
            debug!(player = player.raw(), pack_type = %pack_type, "no pack token");
            return Err(PackError::NoToken {
                player,
                pack_type: pack_type.clone(),
            });
        }

        info!(
            player = player.raw(),
            pack_type = %pack_type,
            cards = ?ids.as_slice(),
            "pack opened"
        );
        Ok(cards)
    }

    /// Draw `count` cards without touching the store.
    pub fn simulate(&self, count: usize) -> Result<Vec<Card>, PackError> {
        if self.catalog.is_empty() {
            return Err(PackError::EmptyCatalog);
        }

        let mut rng = self.rng.lock().map_err(|_| PackError::LockPoisoned)?;
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            cards.push(self.draw(&mut rng)?);
        }
        Ok(cards)
    }

    /// Draw one rarity tier using the weighted walk.
    pub fn draw_rarity(&self, rng: &mut GameRng) -> Rarity {
        self.weights.select(rng.roll(1..=100))
    }

    fn draw(&self, rng: &mut GameRng) -> Result<Card, PackError> {
        let rolled = self.draw_rarity(rng);
        let tier = self.stocked_tier(rolled).ok_or(PackError::EmptyCatalog)?;
        let pool = self.catalog.cards_by_rarity(tier);
        let card = rng.choose(&pool).ok_or(PackError::EmptyCatalog)?;
        Ok((*card).clone())
    }

    /// `rarity` if the catalog has cards of it, else the nearest lower
    /// tier with cards, else the nearest higher one.
    fn stocked_tier(&self, rarity: Rarity) -> Option<Rarity> {
        let index = rarity.index();
        let lower = Rarity::ALL[..=index].iter().rev();
        let higher = Rarity::ALL[index + 1..].iter();
        lower
            .chain(higher)
            .copied()
            .find(|&r| self.catalog.rarity_count(r) > 0)
    }
}
