//! Store contracts for player collections and battle state.
//!
//! Both stores are external collaborators: the engine calls them
//! synchronously and never holds a battle lock while doing so.

use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::cards::CardId;
use crate::core::{BattleId, PlayerId};

/// Kind of pack a token can be redeemed for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackType(pub String);

impl PackType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default pack.
    #[must_use]
    pub fn standard() -> Self {
        Self::new("standard")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Player card collections and pack token balances.
pub trait CollectionStore: Send + Sync {
    /// Add `quantity` copies of a card.
    fn add_card(&self, player: PlayerId, card: CardId, quantity: u32) -> Result<()>;

    /// Owned cards with quantities, ordered by card id.
    fn collection(&self, player: PlayerId) -> Result<Vec<(CardId, u32)>>;

    fn token_balance(&self, player: PlayerId, pack_type: &PackType) -> Result<u32>;

    /// Spend one token. `Ok(false)` when the balance is zero.
    fn consume_token(&self, player: PlayerId, pack_type: &PackType) -> Result<bool>;

    /// Credit tokens.
    fn add_tokens(&self, player: PlayerId, pack_type: &PackType, count: u32) -> Result<()>;

    /// Does the player own at least one copy of `card`?
    fn owns(&self, player: PlayerId, card: CardId) -> Result<bool> {
        Ok(self
            .collection(player)?
            .iter()
            .any(|&(id, qty)| id == card && qty > 0))
    }

    /// Spend one token and grant `cards`.
    ///
    /// `Ok(false)` when the balance is zero, with nothing changed. The
    /// default composes the single-step methods and refunds the token if a
    /// grant fails; stores that can do both in one transaction should
    /// override it.
    fn redeem_pack(&self, player: PlayerId, pack_type: &PackType, cards: &[CardId]) -> Result<bool> {
        if !self.consume_token(player, pack_type)? {
            return Ok(false);
        }

        for &card in cards {
            if let Err(err) = self.add_card(player, card, 1) {
                if let Err(refund) = self.add_tokens(player, pack_type, 1) {
                    tracing::warn!(player = player.raw(), error = %refund, "token refund failed");
                }
                return Err(err);
            }
        }

        Ok(true)
    }
}

/// Serialized battle state keyed by battle id.
pub trait BattleStore: Send + Sync {
    fn save(&self, id: BattleId, state: &[u8]) -> Result<()>;

    fn load(&self, id: BattleId) -> Result<Option<Vec<u8>>>;

    fn delete(&self, id: BattleId) -> Result<()>;
}
