//! Pack generation gated by pack tokens.

pub mod opener;

pub use opener::{PackError, PackOpener};
pub use crate::store::PackType;
