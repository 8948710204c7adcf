//! Battle validation errors.
//!
//! Every variant is a rejected command. A rejected command never changes
//! the battle.

use thiserror::Error;

use super::state::BattleState;
use crate::core::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("{0} is not a participant in this battle")]
    NotAParticipant(PlayerId),

    #[error("{0} has already selected a card")]
    AlreadySelected(PlayerId),

    #[error("card selection is closed (battle is {0})")]
    SelectionClosed(BattleState),

    #[error("battle is not in progress (battle is {0})")]
    NotInProgress(BattleState),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("card has already attacked this turn")]
    AlreadyAttacked,

    #[error("card is stunned")]
    Stunned,

    #[error("card cannot attack")]
    CannotAttack,

    #[error("{0} has no card in play")]
    MissingCard(PlayerId),

    #[error("battle is already over (battle is {0})")]
    AlreadyOver(BattleState),

    #[error("only battles in card selection can be cancelled (battle is {0})")]
    NotCancellable(BattleState),
}

pub type Result<T> = std::result::Result<T, BattleError>;
