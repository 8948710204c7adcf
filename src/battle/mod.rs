//! Battle engine: the duel state machine and its projections.
//!
//! ## Key Types
//!
//! - [`Battle`]: One duel, its cards, turn order and log
//! - [`BattleState`] / [`TurnPhase`]: Lifecycle and in-turn phase
//! - [`BattleLog`] / [`LogEntry`]: Append-only event log
//! - [`BattleStateView`]: Owned snapshot for rendering
//! - [`AttackResult`]: What one attack did
//! - [`BattleError`]: Rejected commands

pub mod engine;
pub mod error;
pub mod state;
pub mod view;

pub use engine::Battle;
pub use error::BattleError;
pub use state::{BattleLog, BattleState, LogEntry, TurnPhase};
pub use view::{AttackOutcome, AttackResult, BattleStateView};
