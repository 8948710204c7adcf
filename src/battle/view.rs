//! Read-only projections handed to the transport layer.
//!
//! Everything here is owned data. Holding a view never keeps a lock or a
//! reference into a live battle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{BattleState, LogEntry, TurnPhase};
use crate::abilities::{DamageBreakdown, ExecutionResult};
use crate::cards::BattleCard;
use crate::core::{BattleId, PlayerId};

/// Snapshot of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStateView {
    pub battle_id: BattleId,
    pub state: BattleState,
    pub phase: TurnPhase,
    pub participants: [PlayerId; 2],
    pub current_turn: PlayerId,
    pub turn_number: u32,
    /// Cards in participant order.
    pub cards: [Option<BattleCard>; 2],
    pub winner: Option<PlayerId>,
    /// The most recent log entries, oldest first.
    pub log: Vec<LogEntry>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BattleStateView {
    /// The card `player` has in play.
    #[must_use]
    pub fn card_for(&self, player: PlayerId) -> Option<&BattleCard> {
        let index = self.participants.iter().position(|&p| p == player)?;
        self.cards[index].as_ref()
    }

    /// Player whose card's element beats the other's, if any.
    ///
    /// Light and dark beat each other, so a light/dark matchup reports the
    /// first participant.
    #[must_use]
    pub fn element_advantage(&self) -> Option<PlayerId> {
        let [Some(a), Some(b)] = &self.cards else {
            return None;
        };
        if a.element.has_advantage_over(b.element) {
            Some(self.participants[0])
        } else if b.element.has_advantage_over(a.element) {
            Some(self.participants[1])
        } else {
            None
        }
    }
}

/// How an attack landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// The defender dodged; no damage, no triggers.
    Dodged,
    /// The attack connected.
    Hit {
        damage: DamageBreakdown,
        defeated: bool,
    },
}

/// Result of a successful `attack` command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    pub attacker: PlayerId,
    pub outcome: AttackOutcome,
    /// Abilities that fired during the attack, in order.
    pub triggered: Vec<ExecutionResult>,
    pub winner: Option<PlayerId>,
    pub message: String,
    pub snapshot: BattleStateView,
}

impl AttackResult {
    #[must_use]
    pub fn dodged(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Dodged)
    }

    /// Health removed from the defender by the attack itself.
    #[must_use]
    pub fn damage_dealt(&self) -> u32 {
        match self.outcome {
            AttackOutcome::Dodged => 0,
            AttackOutcome::Hit { damage, .. } => damage.health_lost,
        }
    }

    #[must_use]
    pub fn defeated(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit { defeated: true, .. })
    }
}
