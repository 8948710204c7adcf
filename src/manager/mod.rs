//! Battle sessions: creation, lookup, commands and persistence.

pub mod error;
#[allow(clippy::module_inception)]
pub mod manager;

pub use error::{ManagerError, Result};
pub use manager::BattleManager;
