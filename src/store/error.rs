//! Error types raised by store implementations.

use thiserror::Error;

/// Errors surfaced by collection and battle stores.
///
/// All of these are transient from the engine's point of view: the caller
/// decides whether and when to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
