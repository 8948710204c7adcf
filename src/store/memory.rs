//! In-memory store implementations for tests and local runs.
//!
//! Both stores can be switched offline to exercise the engine's handling
//! of transient store failures.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use rustc_hash::FxHashMap;

use super::error::{Result, StoreError};
use super::traits::{BattleStore, CollectionStore, PackType};
use crate::cards::CardId;
use crate::core::{BattleId, PlayerId};

#[derive(Debug, Default)]
struct PlayerRecord {
    cards: BTreeMap<CardId, u32>,
    tokens: FxHashMap<PackType, u32>,
}

/// In-memory collection store.
///
/// `redeem_pack` runs under a single write lock, so a token and its cards
/// always commit together.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    players: RwLock<FxHashMap<PlayerId, PlayerRecord>>,
    offline: AtomicBool,
}

impl InMemoryCollectionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("collection store offline".to_string()));
        }
        Ok(())
    }

    fn write<T>(&self, f: impl FnOnce(&mut FxHashMap<PlayerId, PlayerRecord>) -> T) -> Result<T> {
        self.check_online()?;
        let mut players = self.players.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&mut players))
    }

    fn read<T>(&self, f: impl FnOnce(&FxHashMap<PlayerId, PlayerRecord>) -> T) -> Result<T> {
        self.check_online()?;
        let players = self.players.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&players))
    }
}

impl CollectionStore for InMemoryCollectionStore {
    fn add_card(&self, player: PlayerId, card: CardId, quantity: u32) -> Result<()> {
        self.write(|players| {
            *players
                .entry(player)
                .or_default()
                .cards
                .entry(card)
                .or_insert(0) += quantity;
        })
    }

    fn collection(&self, player: PlayerId) -> Result<Vec<(CardId, u32)>> {
        self.read(|players| {
            players
                .get(&player)
                .map(|record| record.cards.iter().map(|(&id, &qty)| (id, qty)).collect())
                .unwrap_or_default()
        })
    }

    fn token_balance(&self, player: PlayerId, pack_type: &PackType) -> Result<u32> {
        self.read(|players| {
            players
                .get(&player)
                .and_then(|record| record.tokens.get(pack_type).copied())
                .unwrap_or(0)
        })
    }

    fn consume_token(&self, player: PlayerId, pack_type: &PackType) -> Result<bool> {
        self.write(|players| {
            let Some(balance) = players
                .get_mut(&player)
                .and_then(|record| record.tokens.get_mut(pack_type))
            else {
                return false;
            };
            if *balance == 0 {
                return false;
            }
            *balance -= 1;
            true
        })
    }

    fn add_tokens(&self, player: PlayerId, pack_type: &PackType, count: u32) -> Result<()> {
        self.write(|players| {
            *players
                .entry(player)
                .or_default()
                .tokens
                .entry(pack_type.clone())
                .or_insert(0) += count;
        })
    }

    fn owns(&self, player: PlayerId, card: CardId) -> Result<bool> {
        self.read(|players| {
            players
                .get(&player)
                .and_then(|record| record.cards.get(&card))
                .is_some_and(|&qty| qty > 0)
        })
    }

    fn redeem_pack(&self, player: PlayerId, pack_type: &PackType, cards: &[CardId]) -> Result<bool> {
        self.write(|players| {
            let Some(record) = players.get_mut(&player) else {
                return false;
            };
            match record.tokens.get_mut(pack_type) {
                Some(balance) if *balance > 0 => *balance -= 1,
                _ => return false,
            }
            for &card in cards {
                *record.cards.entry(card).or_insert(0) += 1;
            }
            true
        })
    }
}

/// In-memory battle store.
#[derive(Debug, Default)]
pub struct InMemoryBattleStore {
    battles: RwLock<FxHashMap<BattleId, Vec<u8>>>,
    offline: AtomicBool,
}

impl InMemoryBattleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("battle store offline".to_string()));
        }
        Ok(())
    }

    /// Number of stored battles.
    pub fn len(&self) -> Result<usize> {
        let battles = self.battles.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(battles.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl BattleStore for InMemoryBattleStore {
    fn save(&self, id: BattleId, state: &[u8]) -> Result<()> {
        self.check_online()?;
        let mut battles = self.battles.write().map_err(|_| StoreError::LockPoisoned)?;
        battles.insert(id, state.to_vec());
        Ok(())
    }

    fn load(&self, id: BattleId) -> Result<Option<Vec<u8>>> {
        self.check_online()?;
        let battles = self.battles.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(battles.get(&id).cloned())
    }

    fn delete(&self, id: BattleId) -> Result<()> {
        self.check_online()?;
        let mut battles = self.battles.write().map_err(|_| StoreError::LockPoisoned)?;
        battles.remove(&id);
        Ok(())
    }
}
