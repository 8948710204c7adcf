//! Battle lifecycle types and the event log.
//!
//! ## BattleState
//!
//! ```text
//! CardSelection ──► InProgress ──► Finished
//!       │
//!       └──────────► Cancelled
//! ```
//!
//! Forfeit can jump straight from `CardSelection` to `Finished`.
//!
//! ## BattleLog
//!
//! Append-only list of `LogEntry` backed by `im::Vector`, so snapshots and
//! clones share structure with the live battle.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    /// Waiting for both players to submit a card.
    CardSelection,
    InProgress,
    Finished,
    Cancelled,
}

impl BattleState {
    /// Does a battle in this state still hold its players?
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, BattleState::CardSelection | BattleState::InProgress)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_active()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BattleState::CardSelection => "card_selection",
            BattleState::InProgress => "in_progress",
            BattleState::Finished => "finished",
            BattleState::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BattleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Cards are being chosen.
    CardPlay,
    /// The current player may attack or end the turn.
    Attack,
}

/// One line of the battle log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Append-only battle event log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vector<LogEntry>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time.
    pub fn push(&mut self, turn: u32, message: impl Into<String>) {
        self.entries.push_back(LogEntry {
            turn,
            timestamp: Utc::now(),
            message: message.into(),
        });
    }

    /// The last `n` entries, oldest first.
    #[must_use]
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Does any entry contain `text`?
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_activity() {
        assert!(BattleState::CardSelection.is_active());
        assert!(BattleState::InProgress.is_active());
        assert!(BattleState::Finished.is_terminal());
        assert!(BattleState::Cancelled.is_terminal());
        assert_eq!(format!("{}", BattleState::InProgress), "in_progress");
    }

    #[test]
    fn test_log_tail() {
        let mut log = BattleLog::new();
        for i in 0..8 {
            log.push(1 + i / 2, format!("event {}", i));
        }

        let tail = log.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].message, "event 3");
        assert_eq!(tail[4].message, "event 7");
        assert_eq!(tail[4].turn, 4);
        assert_eq!(log.tail(100).len(), 8);
    }

    #[test]
    fn test_clone_shares_but_does_not_alias() {
        let mut log = BattleLog::new();
        log.push(1, "first");
        let snapshot = log.clone();
        log.push(1, "second");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
        assert!(log.contains("second"));
        assert!(!snapshot.contains("second"));
    }
}
