//! Session registry for live battles.
//!
//! ## Locking
//!
//! Each battle sits behind its own `Mutex`. The session table (battle id to
//! battle, player to active battle id) sits behind a separate `RwLock`.
//! Commands follow one pattern:
//!
//! 1. Look up the battle handle under a short read lock on the table.
//! 2. Lock the battle, run the command, encode the new state, unlock.
//! 3. Persist the encoded state and update the table.
//!
//! No store call happens while a battle lock is held, and a battle lock is
//! never held while the table is locked.
//!
//! Every successful command bumps the battle's revision. Saves for one
//! battle are serialized on a separate lock and a save older than the last
//! one written is skipped, so racing commands cannot leave a stale state in
//! the store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::error::{ManagerError, Result};
use crate::abilities::AbilityResolver;
use crate::battle::{AttackResult, Battle, BattleError, BattleState, BattleStateView};
use crate::cards::CardCatalog;
use crate::core::{BattleId, ConfigError, EngineConfig, GameRng, PlayerId};
use crate::store::{BattleStore, CollectionStore};

/// A live battle with its revision counters.
struct Session {
    live: Mutex<Revised>,
    /// Newest revision written to the store.
    persisted: Mutex<u64>,
}

struct Revised {
    battle: Battle,
    revision: u64,
}

impl Session {
    fn new(battle: Battle, persisted: u64) -> Arc<Self> {
        Arc::new(Self {
            live: Mutex::new(Revised {
                battle,
                revision: 1,
            }),
            persisted: Mutex::new(persisted),
        })
    }
}

/// Encoded state captured under the battle lock.
struct Capture {
    bytes: Vec<u8>,
    revision: u64,
    state: BattleState,
    participants: [PlayerId; 2],
}

impl Capture {
    fn of(battle: &Battle, revision: u64) -> Result<Self> {
        Ok(Self {
            bytes: battle.encode()?,
            revision,
            state: battle.state(),
            participants: battle.participants(),
        })
    }
}

#[derive(Default)]
struct Sessions {
    battles: FxHashMap<BattleId, Arc<Session>>,
    active: FxHashMap<PlayerId, BattleId>,
}

impl Sessions {
    fn release(&mut self, id: BattleId, participants: [PlayerId; 2]) {
        for player in participants {
            if self.active.get(&player) == Some(&id) {
                self.active.remove(&player);
            }
        }
    }
}

/// Creates, drives and retires battles.
///
/// A player can be in at most one battle that is in card selection or in
/// progress. Finished battles are saved to the [`BattleStore`] and dropped
/// from memory.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use card_duel::abilities::AbilityResolver;
/// use card_duel::battle::BattleState;
/// use card_duel::cards::CardCatalog;
/// use card_duel::core::{EngineConfig, PlayerId};
/// use card_duel::manager::BattleManager;
/// use card_duel::store::{InMemoryBattleStore, InMemoryCollectionStore};
///
/// let manager = BattleManager::new(
///     Arc::new(CardCatalog::standard()),
///     Arc::new(AbilityResolver::standard()),
///     Arc::new(InMemoryCollectionStore::new()),
///     Arc::new(InMemoryBattleStore::new()),
///     EngineConfig::default().with_seed(7),
/// )
/// .unwrap();
///
/// let (a, b) = (PlayerId::new(1), PlayerId::new(2));
/// let id = manager.create(a, b).unwrap();
/// assert!(manager.create(a, PlayerId::new(3)).is_err());
///
/// manager.forfeit(id, a).unwrap();
/// assert!(manager.active_battle_for(a).unwrap().is_none());
/// ```
pub struct BattleManager {
    catalog: Arc<CardCatalog>,
    resolver: Arc<AbilityResolver>,
    collections: Arc<dyn CollectionStore>,
    store: Arc<dyn BattleStore>,
    config: EngineConfig,
    sessions: RwLock<Sessions>,
    next_id: AtomicU64,
    rng: Mutex<GameRng>,
}

impl BattleManager {
    /// Create a manager over the given services.
    ///
    /// Fails if `config` does not pass [`EngineConfig::validate`].
    pub fn new(
        catalog: Arc<CardCatalog>,
        resolver: Arc<AbilityResolver>,
        collections: Arc<dyn CollectionStore>,
        store: Arc<dyn BattleStore>,
        config: EngineConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::seeded_or_random(config.rng_seed).for_context("battles");
        Ok(Self {
            catalog,
            resolver,
            collections,
            store,
            config,
            sessions: RwLock::new(Sessions::default()),
            next_id: AtomicU64::new(1),
            rng: Mutex::new(rng),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    // === Registry ===

    /// Start a battle between two players.
    ///
    /// Fails if a player challenges themself or either player already has
    /// an active battle. The new battle is registered before it is saved;
    /// if the save fails the battle stays live and [`Self::save`] can be
    /// retried.
    pub fn create(&self, first: PlayerId, second: PlayerId) -> Result<BattleId> {
        if first == second {
            return Err(ManagerError::SelfChallenge(first));
        }

        let (id, session, capture) = {
            let mut sessions = self.sessions.write().map_err(|_| ManagerError::LockPoisoned)?;
            for player in [first, second] {
                if sessions.active.contains_key(&player) {
                    return Err(ManagerError::PlayerBusy(player));
                }
            }

            let rng = self.rng.lock().map_err(|_| ManagerError::LockPoisoned)?.fork();
            let id = BattleId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let battle = Battle::new(id, first, second, rng).with_log_tail(self.config.log_tail);
            let capture = Capture::of(&battle, 1)?;
            let session = Session::new(battle, 0);

            sessions.battles.insert(id, Arc::clone(&session));
            sessions.active.insert(first, id);
            sessions.active.insert(second, id);
            (id, session, capture)
        };

        info!(battle_id = id.raw(), first = first.raw(), second = second.raw(), "battle created");
        self.persist(id, &session, &capture)?;
        Ok(id)
    }

    /// A copy of a live battle.
    pub fn get(&self, id: BattleId) -> Result<Battle> {
        let session = self.session(id)?;
        let live = session.live.lock().map_err(|_| ManagerError::LockPoisoned)?;
        Ok(live.battle.clone())
    }

    /// The battle `player` is currently in, if any.
    pub fn active_battle_for(&self, player: PlayerId) -> Result<Option<Battle>> {
        let id = {
            let sessions = self.sessions.read().map_err(|_| ManagerError::LockPoisoned)?;
            sessions.active.get(&player).copied()
        };
        match id {
            Some(id) => self.get(id).map(Some),
            None => Ok(None),
        }
    }

    /// Ids of every live battle, ascending.
    pub fn live_battles(&self) -> Result<Vec<BattleId>> {
        let sessions = self.sessions.read().map_err(|_| ManagerError::LockPoisoned)?;
        let mut ids: Vec<BattleId> = sessions.battles.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Write the current state of a live battle to the store.
    pub fn save(&self, id: BattleId) -> Result<()> {
        let session = self.session(id)?;
        let capture = self.capture(&session)?;
        self.persist(id, &session, &capture)
    }

    /// Save a battle, then drop it from memory and release its players.
    ///
    /// On a store failure the battle stays registered so the call can be
    /// retried.
    pub fn finish(&self, id: BattleId) -> Result<()> {
        let session = self.session(id)?;
        let capture = self.capture(&session)?;
        self.persist(id, &session, &capture)?;
        self.unregister(id, capture.participants)?;
        info!(battle_id = id.raw(), state = %capture.state, "battle retired");
        Ok(())
    }

    /// Load a stored battle back into memory.
    ///
    /// Already-live battles are returned as they are. Restoring an active
    /// battle fails if one of its players has since joined another one.
    pub fn restore(&self, id: BattleId) -> Result<BattleStateView> {
        if let Ok(view) = self.status(id) {
            return Ok(view);
        }

        let bytes = self.store.load(id)?.ok_or(ManagerError::NotFound(id))?;
        let battle = Battle::decode(&bytes)?;
        let view = battle.snapshot();
        let state = battle.state();
        let participants = battle.participants();

        let mut sessions = self.sessions.write().map_err(|_| ManagerError::LockPoisoned)?;
        if state.is_active() {
            for player in participants {
                if sessions.active.get(&player).is_some_and(|&other| other != id) {
                    return Err(ManagerError::PlayerBusy(player));
                }
            }
            for player in participants {
                sessions.active.insert(player, id);
            }
        }
        sessions.battles.insert(id, Session::new(battle, 1));
        drop(sessions);

        self.next_id.fetch_max(id.raw() + 1, Ordering::SeqCst);
        info!(battle_id = id.raw(), state = %state, "battle restored");
        Ok(view)
    }

    /// Cancel battles stuck in card selection past the configured timeout.
    ///
    /// Does nothing when no timeout is configured. Battles in progress never
    /// expire. Each cancelled battle releases its players and is deleted from
    /// the store before it leaves memory. If a delete fails the battle stays
    /// registered as cancelled and the next call retries it. Returns the ids
    /// removed by this call.
    pub fn expire_stale(&self, now: DateTime<Utc>) -> Result<Vec<BattleId>> {
        let Some(timeout) = self.config.selection_timeout() else {
            return Ok(Vec::new());
        };

        let candidates: Vec<(BattleId, Arc<Session>)> = {
            let sessions = self.sessions.read().map_err(|_| ManagerError::LockPoisoned)?;
            sessions
                .battles
                .iter()
                .map(|(&id, session)| (id, Arc::clone(session)))
                .collect()
        };

        let mut expired = Vec::new();
        for (id, session) in candidates {
            let participants = {
                let mut live = session.live.lock().map_err(|_| ManagerError::LockPoisoned)?;
                match live.battle.state() {
                    // Left over from a delete that failed on an earlier pass.
                    BattleState::Cancelled => {}
                    BattleState::CardSelection => {
                        let stale = now
                            .signed_duration_since(live.battle.created_at())
                            .to_std()
                            .is_ok_and(|age| age >= timeout);
                        if !stale {
                            continue;
                        }
                        live.battle.cancel()?;
                        live.revision += 1;
                        info!(battle_id = id.raw(), "battle expired in card selection");
                    }
                    _ => continue,
                }
                live.battle.participants()
            };

            {
                let mut sessions = self.sessions.write().map_err(|_| ManagerError::LockPoisoned)?;
                sessions.release(id, participants);
            }

            self.discard(id, &session)?;
            self.unregister(id, participants)?;
            expired.push(id);
        }

        expired.sort_unstable();
        Ok(expired)
    }

    // === Commands ===

    /// Submit a card from `player`'s collection by name.
    pub fn submit_card(
        &self,
        id: BattleId,
        player: PlayerId,
        card_name: &str,
    ) -> Result<BattleStateView> {
        let card = self
            .catalog
            .card_by_name(card_name)
            .ok_or_else(|| ManagerError::UnknownCard(card_name.to_string()))?;
        if !self.collections.owns(player, card.id)? {
            return Err(ManagerError::CardNotOwned {
                player,
                card: card.name.clone(),
            });
        }

        debug!(battle_id = id.raw(), player = player.raw(), card = %card.name, "submitting card");
        self.command(id, |battle, resolver| {
            battle.submit_card(player, card, resolver)?;
            Ok(battle.snapshot())
        })
    }

    /// Attack with `player`'s card.
    pub fn attack(&self, id: BattleId, player: PlayerId) -> Result<AttackResult> {
        self.command(id, |battle, resolver| battle.attack(player, resolver))
    }

    /// Pass the turn without attacking.
    pub fn end_turn(&self, id: BattleId, player: PlayerId) -> Result<BattleStateView> {
        self.command(id, |battle, resolver| {
            battle.end_turn(player, resolver)?;
            Ok(battle.snapshot())
        })
    }

    /// Concede. The opponent wins and the battle is retired.
    pub fn forfeit(&self, id: BattleId, player: PlayerId) -> Result<BattleStateView> {
        self.command(id, |battle, _| {
            battle.forfeit(player)?;
            Ok(battle.snapshot())
        })
    }

    /// Snapshot of a live battle.
    pub fn status(&self, id: BattleId) -> Result<BattleStateView> {
        let session = self.session(id)?;
        let live = session.live.lock().map_err(|_| ManagerError::LockPoisoned)?;
        Ok(live.battle.snapshot())
    }

    // === Internals ===

    fn session(&self, id: BattleId) -> Result<Arc<Session>> {
        let sessions = self.sessions.read().map_err(|_| ManagerError::LockPoisoned)?;
        sessions
            .battles
            .get(&id)
            .cloned()
            .ok_or(ManagerError::NotFound(id))
    }

    fn capture(&self, session: &Session) -> Result<Capture> {
        let live = session.live.lock().map_err(|_| ManagerError::LockPoisoned)?;
        Capture::of(&live.battle, live.revision)
    }

    /// Run `f` under the battle lock, then persist outside it.
    ///
    /// A battle that reaches a terminal state releases its players at once
    /// and is dropped from memory after a successful save.
    fn command<T>(
        &self,
        id: BattleId,
        f: impl FnOnce(&mut Battle, &AbilityResolver) -> std::result::Result<T, BattleError>,
    ) -> Result<T> {
        let session = self.session(id)?;
        let (value, capture) = {
            let mut live = session.live.lock().map_err(|_| ManagerError::LockPoisoned)?;
            let value = f(&mut live.battle, self.resolver.as_ref())?;
            live.revision += 1;
            (value, Capture::of(&live.battle, live.revision)?)
        };

        let terminal = capture.state.is_terminal();
        if terminal {
            let mut sessions = self.sessions.write().map_err(|_| ManagerError::LockPoisoned)?;
            sessions.release(id, capture.participants);
        }

        self.persist(id, &session, &capture)?;

        if terminal {
            self.unregister(id, capture.participants)?;
            info!(battle_id = id.raw(), state = %capture.state, "battle retired");
        }
        Ok(value)
    }

    /// Write `capture` unless a newer revision is already stored.
    fn persist(&self, id: BattleId, session: &Session, capture: &Capture) -> Result<()> {
        let mut persisted = session.persisted.lock().map_err(|_| ManagerError::LockPoisoned)?;
        if *persisted >= capture.revision {
            debug!(battle_id = id.raw(), revision = capture.revision, "skipping stale save");
            return Ok(());
        }

        self.store.save(id, &capture.bytes).map_err(|err| {
            warn!(battle_id = id.raw(), error = %err, "battle save failed");
            ManagerError::from(err)
        })?;
        *persisted = capture.revision;
        Ok(())
    }

    /// Delete a battle from the store and block any later save of it.
    fn discard(&self, id: BattleId, session: &Session) -> Result<()> {
        let mut persisted = session.persisted.lock().map_err(|_| ManagerError::LockPoisoned)?;
        self.store.delete(id).map_err(|err| {
            warn!(battle_id = id.raw(), error = %err, "battle delete failed");
            ManagerError::from(err)
        })?;
        *persisted = u64::MAX;
        Ok(())
    }

    fn unregister(&self, id: BattleId, participants: [PlayerId; 2]) -> Result<()> {
        let mut sessions = self.sessions.write().map_err(|_| ManagerError::LockPoisoned)?;
        sessions.battles.remove(&id);
        sessions.release(id, participants);
        Ok(())
    }
}
