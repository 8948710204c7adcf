//! Battle manager errors.

use thiserror::Error;

use crate::battle::BattleError;
use crate::core::{BattleId, PlayerId};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("battle state could not be encoded: {0}")]
    Codec(String),

    #[error("battle {0} not found")]
    NotFound(BattleId),

    #[error("{0} is already in an active battle")]
    PlayerBusy(PlayerId),

    #[error("{0} cannot challenge themselves")]
    SelfChallenge(PlayerId),

    #[error("no card named {0:?}")]
    UnknownCard(String),

    #[error("{player} does not own {card}")]
    CardNotOwned { player: PlayerId, card: String },

    #[error("session lock was poisoned")]
    LockPoisoned,
}

impl From<bincode::Error> for ManagerError {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ManagerError>;
