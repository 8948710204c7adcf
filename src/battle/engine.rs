//! The battle state machine.
//!
//! A `Battle` is one duel between two players, one card each. It owns the
//! cards, the turn order, the log and its own RNG stream, so a battle can
//! be serialized, stored and restored without losing anything.
//!
//! ## Turn Flow
//!
//! 1. Both players submit a card. On the second submission the battle
//!    starts, the first participant gets the turn, and on-play abilities
//!    fire in participant order.
//! 2. The current player attacks (or ends the turn). The defender's dodge
//!    is rolled first; a dodge ends the turn with no damage and no triggers.
//! 3. A connecting attack fires the attacker's on-attack ability, applies
//!    damage, then fires the defender's on-damage ability if it survived
//!    with less health.
//! 4. The turn passes. The turn number goes up each time play returns to
//!    the first participant, and the incoming card's each-turn ability fires.
//!
//! A defeated card ends the battle immediately; nothing fires after death.
//!
//! ## Ability Application
//!
//! The [`AbilityResolver`] is passed into each command rather than stored,
//! so one resolver serves every battle. Passive abilities are applied once,
//! when the card enters play.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{BattleError, Result};
use super::state::{BattleLog, BattleState, TurnPhase};
use super::view::{AttackOutcome, AttackResult, BattleStateView};
use crate::abilities::{
    AbilityResolver, DamageBreakdown, EffectOutcome, ExecutionContext, ExecutionResult,
    ResolvedTarget, TriggerCondition,
};
use crate::cards::{BattleCard, Card};
use crate::core::{BattleId, GameRng, PlayerId, DEFAULT_LOG_TAIL};

/// A duel between two players.
///
/// ## Example
///
/// ```
/// use card_duel::abilities::AbilityResolver;
/// use card_duel::battle::{Battle, BattleState};
/// use card_duel::cards::CardCatalog;
/// use card_duel::core::{BattleId, GameRng, PlayerId};
///
/// let catalog = CardCatalog::standard();
/// let resolver = AbilityResolver::standard();
/// let (a, b) = (PlayerId::new(1), PlayerId::new(2));
///
/// let mut battle = Battle::new(BattleId::new(1), a, b, GameRng::new(42));
/// battle.submit_card(a, catalog.card_by_name("Fire Sprite").unwrap(), &resolver).unwrap();
/// battle.submit_card(b, catalog.card_by_name("Water Drop").unwrap(), &resolver).unwrap();
/// assert_eq!(battle.state(), BattleState::InProgress);
///
/// let result = battle.attack(a, &resolver).unwrap();
/// assert_eq!(result.damage_dealt(), 2);
/// assert_eq!(battle.current_turn(), b);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Battle {
    id: BattleId,
    participants: [PlayerId; 2],
    state: BattleState,
    current_turn: PlayerId,
    turn_number: u32,
    phase: TurnPhase,
    cards: [Option<BattleCard>; 2],
    log: BattleLog,
    winner: Option<PlayerId>,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    log_tail: usize,
    rng: GameRng,
}

impl Battle {
    /// Create a battle in card selection.
    #[must_use]
    pub fn new(id: BattleId, first: PlayerId, second: PlayerId, rng: GameRng) -> Self {
        Self {
            id,
            participants: [first, second],
            state: BattleState::CardSelection,
            current_turn: first,
            turn_number: 1,
            phase: TurnPhase::CardPlay,
            cards: [None, None],
            log: BattleLog::new(),
            winner: None,
            created_at: Utc::now(),
            finished_at: None,
            log_tail: DEFAULT_LOG_TAIL,
            rng,
        }
    }

    /// Set how many log entries snapshots include.
    #[must_use]
    pub fn with_log_tail(mut self, entries: usize) -> Self {
        self.log_tail = entries;
        self
    }

    /// Override the creation time.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> BattleId {
        self.id
    }

    #[must_use]
    pub fn participants(&self) -> [PlayerId; 2] {
        self.participants
    }

    #[must_use]
    pub fn state(&self) -> BattleState {
        self.state
    }

    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    #[must_use]
    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.participants.contains(&player)
    }

    /// The other participant.
    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.index_of(player).map(|i| self.participants[1 - i])
    }

    /// The card `player` has in play.
    #[must_use]
    pub fn card_for(&self, player: PlayerId) -> Option<&BattleCard> {
        self.index_of(player).and_then(|i| self.cards[i].as_ref())
    }

    fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.participants.iter().position(|&p| p == player)
    }

    fn participant_index(&self, player: PlayerId) -> Result<usize> {
        self.index_of(player).ok_or(BattleError::NotAParticipant(player))
    }

    // === Commands ===

    /// Submit `player`'s card.
    ///
    /// The second submission starts the battle and fires on-play abilities,
    /// first participant first.
    pub fn submit_card(
        &mut self,
        player: PlayerId,
        card: &Card,
        resolver: &AbilityResolver,
    ) -> Result<()> {
        let index = self.participant_index(player)?;
        if self.state != BattleState::CardSelection {
            return Err(BattleError::SelectionClosed(self.state));
        }
        if self.cards[index].is_some() {
            return Err(BattleError::AlreadySelected(player));
        }

        self.cards[index] = Some(BattleCard::from_card(card, player));
        self.record(format!("{} selects {}", player, card.name));

        if let [Some(first), Some(second)] = &self.cards {
            let message = format!("Battle begins! {} vs {}", first.name, second.name);
            self.state = BattleState::InProgress;
            self.current_turn = self.participants[0];
            self.phase = TurnPhase::Attack;
            self.record(message);
            info!(battle_id = self.id.raw(), "battle started");

            for i in 0..2 {
                self.fire(i, TriggerCondition::OnPlay, resolver);
                if self.state != BattleState::InProgress {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Attack with `attacker`'s card.
    pub fn attack(&mut self, attacker: PlayerId, resolver: &AbilityResolver) -> Result<AttackResult> {
        let a = self.participant_index(attacker)?;
        if self.state != BattleState::InProgress {
            return Err(BattleError::NotInProgress(self.state));
        }
        if self.current_turn != attacker {
            return Err(BattleError::NotYourTurn(attacker));
        }
        let d = 1 - a;
        let defender = self.participants[d];

        let attacking = self.cards[a].as_ref().ok_or(BattleError::MissingCard(attacker))?;
        if attacking.has_attacked {
            return Err(BattleError::AlreadyAttacked);
        }
        if attacking.stunned {
            return Err(BattleError::Stunned);
        }
        if !attacking.ready_to_attack() {
            return Err(BattleError::CannotAttack);
        }
        let attacker_name = attacking.name.clone();

        let defending = self.cards[d].as_ref().ok_or(BattleError::MissingCard(defender))?;
        let defender_name = defending.name.clone();
        let dodge_chance = defending.dodge_chance;

        if dodge_chance > 0 && self.rng.roll(1..=100) <= dodge_chance {
            self.mark_attacked(a);
            let message = format!("{} dodged {}'s attack!", defender_name, attacker_name);
            self.record(message.clone());
            self.advance_turn(resolver);
            return Ok(self.attack_result(attacker, AttackOutcome::Dodged, Vec::new(), message));
        }

        let mut triggered: Vec<ExecutionResult> =
            self.fire(a, TriggerCondition::OnAttack, resolver).into_iter().collect();

        if self.state != BattleState::InProgress {
            // the on-attack ability finished the defender
            self.mark_attacked(a);
            let outcome = AttackOutcome::Hit {
                damage: DamageBreakdown::default(),
                defeated: true,
            };
            let message = format!("{} defeats {}!", attacker_name, defender_name);
            return Ok(self.attack_result(attacker, outcome, triggered, message));
        }

        let damage = self.cards[a].as_ref().map_or(0, |c| c.current_attack);
        let Some(defending) = self.cards[d].as_mut() else {
            return Err(BattleError::MissingCard(defender));
        };
        let hit = defending.take_damage(damage);
        let alive = defending.is_alive();
        self.mark_attacked(a);
        self.record(format!(
            "{} attacks {} for {} damage!",
            attacker_name, defender_name, hit.health_lost
        ));

        if !alive {
            self.record(format!("{} has been defeated!", defender_name));
            self.finish(attacker);
            let outcome = AttackOutcome::Hit {
                damage: hit,
                defeated: true,
            };
            let message = format!("{} defeats {}!", attacker_name, defender_name);
            return Ok(self.attack_result(attacker, outcome, triggered, message));
        }

        if hit.wounded() {
            triggered.extend(self.fire(d, TriggerCondition::OnDamage, resolver));
        }

        if self.state == BattleState::InProgress {
            self.advance_turn(resolver);
        }

        let outcome = AttackOutcome::Hit {
            damage: hit,
            defeated: false,
        };
        let message = format!(
            "{} deals {} damage to {}!",
            attacker_name, hit.health_lost, defender_name
        );
        Ok(self.attack_result(attacker, outcome, triggered, message))
    }

    /// Pass the turn without attacking. Clears a stun on the passing card.
    pub fn end_turn(&mut self, player: PlayerId, resolver: &AbilityResolver) -> Result<()> {
        let index = self.participant_index(player)?;
        if self.state != BattleState::InProgress {
            return Err(BattleError::NotInProgress(self.state));
        }
        if self.current_turn != player {
            return Err(BattleError::NotYourTurn(player));
        }

        if let Some(card) = self.cards[index].as_mut() {
            if card.stunned {
                card.stunned = false;
                let message = format!("{} recovers from stun", card.name);
                self.record(message);
            }
        }
        self.record(format!("{} ends their turn", player));
        self.advance_turn(resolver);
        Ok(())
    }

    /// Give up. The other participant wins.
    pub fn forfeit(&mut self, player: PlayerId) -> Result<()> {
        let index = self.participant_index(player)?;
        if self.state.is_terminal() {
            return Err(BattleError::AlreadyOver(self.state));
        }

        self.record(format!("{} forfeits", player));
        self.finish(self.participants[1 - index]);
        Ok(())
    }

    /// Cancel a battle that never started.
    pub fn cancel(&mut self) -> Result<()> {
        if self.state != BattleState::CardSelection {
            return Err(BattleError::NotCancellable(self.state));
        }

        self.state = BattleState::Cancelled;
        self.finished_at = Some(Utc::now());
        self.record("Battle cancelled");
        info!(battle_id = self.id.raw(), "battle cancelled");
        Ok(())
    }

    /// Owned projection for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BattleStateView {
        BattleStateView {
            battle_id: self.id,
            state: self.state,
            phase: self.phase,
            participants: self.participants,
            current_turn: self.current_turn,
            turn_number: self.turn_number,
            cards: self.cards.clone(),
            winner: self.winner,
            log: self.log.tail(self.log_tail),
            created_at: self.created_at,
            finished_at: self.finished_at,
        }
    }

    /// Serialize for a battle store.
    pub fn encode(&self) -> std::result::Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore from bytes written by [`Battle::encode`].
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    // === Internals ===

    fn record(&mut self, message: impl Into<String>) {
        self.log.push(self.turn_number, message);
    }

    fn mark_attacked(&mut self, index: usize) {
        if let Some(card) = self.cards[index].as_mut() {
            card.has_attacked = true;
        }
    }

    fn finish(&mut self, winner: PlayerId) {
        self.state = BattleState::Finished;
        self.winner = Some(winner);
        self.finished_at = Some(Utc::now());
        self.record(format!("Battle ends! {} wins!", winner));
        info!(battle_id = self.id.raw(), winner = winner.raw(), "battle finished");
    }

    fn advance_turn(&mut self, resolver: &AbilityResolver) {
        if self.current_turn == self.participants[0] {
            self.current_turn = self.participants[1];
        } else {
            self.current_turn = self.participants[0];
            self.turn_number += 1;
        }

        for card in self.cards.iter_mut().flatten() {
            card.reset_turn_flags();
        }
        self.phase = TurnPhase::Attack;
        self.record(format!("{}'s turn (turn {})", self.current_turn, self.turn_number));

        if let Some(index) = self.index_of(self.current_turn) {
            self.fire(index, TriggerCondition::EachTurn, resolver);
        }
    }

    fn attack_result(
        &self,
        attacker: PlayerId,
        outcome: AttackOutcome,
        triggered: Vec<ExecutionResult>,
        message: String,
    ) -> AttackResult {
        AttackResult {
            attacker,
            outcome,
            triggered,
            winner: self.winner,
            message,
            snapshot: self.snapshot(),
        }
    }

    /// Fire the ability of the card at `index` for `condition`.
    ///
    /// Passive abilities only fire on play.
    fn fire(
        &mut self,
        index: usize,
        condition: TriggerCondition,
        resolver: &AbilityResolver,
    ) -> Option<ExecutionResult> {
        let caster = self.cards[index].as_ref()?;
        let ability = caster.ability?;
        let effect = resolver.effect_for(Some(ability))?;

        let fires = if condition == TriggerCondition::OnPlay {
            resolver.can_trigger(Some(ability), condition)
        } else {
            effect.trigger == condition
        };
        if !fires {
            return None;
        }

        let context = ExecutionContext {
            battle_id: self.id,
            turn: self.turn_number,
            trigger: condition,
        };
        let result = resolver.execute(ability, caster, self.cards[1 - index].as_ref(), &context);
        let caster_name = caster.name.clone();

        debug!(
            battle_id = self.id.raw(),
            ability = ?ability,
            success = result.success,
            "ability fired"
        );

        if result.success {
            self.record(format!("{} uses {}!", caster_name, ability.text()));
            self.apply(index, &result);
        } else {
            self.record(format!("{}'s ability failed: {}", caster_name, result.summary));
        }

        Some(result)
    }

    fn apply(&mut self, caster_index: usize, result: &ExecutionResult) {
        let recipient_index = match result.target {
            Some(ResolvedTarget::Caster) => caster_index,
            Some(ResolvedTarget::Opponent) => 1 - caster_index,
            None => return,
        };
        let caster_name = self.cards[caster_index]
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let Some(recipient) = self.cards[recipient_index].as_mut() else {
            return;
        };
        let name = recipient.name.clone();

        let message = match result.outcome {
            EffectOutcome::Damage(planned) => {
                let hit = recipient.take_damage(planned.raw);
                if !recipient.is_alive() {
                    self.record(format!(
                        "{} takes {} damage from {}'s ability!",
                        name, hit.health_lost, caster_name
                    ));
                    self.record(format!("{} is defeated by {}'s ability!", name, caster_name));
                    self.finish(self.participants[1 - recipient_index]);
                    return;
                }
                format!("{} takes {} damage from {}'s ability!", name, hit.health_lost, caster_name)
            }
            EffectOutcome::Heal { amount } => {
                let healed = recipient.heal(amount);
                format!("{} heals for {} health!", name, healed)
            }
            EffectOutcome::AttackBoost { amount } => {
                recipient.current_attack += amount;
                format!("{}'s attack increases by {}!", name, amount)
            }
            EffectOutcome::Shield { amount } => {
                recipient.shield += amount;
                format!("{} gains {} shield!", name, amount)
            }
            EffectOutcome::Stun => {
                recipient.stunned = true;
                format!("{} is stunned!", name)
            }
            EffectOutcome::Dodge { chance } => {
                recipient.dodge_chance = chance;
                format!("{} gains {}% dodge chance!", name, chance)
            }
            EffectOutcome::AttackDebuff { amount } => {
                let removed = recipient.reduce_attack(amount);
                format!("{}'s attack drops by {}!", name, removed)
            }
            EffectOutcome::DamageReduction { amount } => {
                recipient.damage_reduction += amount;
                format!("{} gains {} armor!", name, amount)
            }
            EffectOutcome::StatBoost { attack, health } => {
                recipient.boost_stats(attack, health);
                format!("{} gains +{}/+{}!", name, attack, health)
            }
            EffectOutcome::Failed(_) => return,
        };
        self.record(message);
    }
}
