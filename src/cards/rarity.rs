//! Rarity tiers and pack drop weights.
//!
//! The tier walk used by pack opening is fixed: common, rare, epic,
//! legendary, mythic. A draw in `1..=100` selects the first tier whose
//! cumulative weight reaches the draw, so ties always resolve in walk order.

use serde::{Deserialize, Serialize};

/// Card rarity class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Tiers in walk order.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Position in walk order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Drop weight per rarity tier, indexed in walk order.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{Rarity, RarityTable};
///
/// let table = RarityTable::default();
/// assert_eq!(table.select(1), Rarity::Common);
/// assert_eq!(table.select(60), Rarity::Common);
/// assert_eq!(table.select(61), Rarity::Rare);
/// assert_eq!(table.select(100), Rarity::Mythic);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityTable {
    weights: [u32; 5],
}

impl Default for RarityTable {
    fn default() -> Self {
        Self::new([60, 25, 10, 4, 1])
    }
}

impl RarityTable {
    /// Create a table from weights in walk order.
    #[must_use]
    pub const fn new(weights: [u32; 5]) -> Self {
        Self { weights }
    }

    /// Weight of a single tier.
    #[must_use]
    pub const fn weight(&self, rarity: Rarity) -> u32 {
        self.weights[rarity.index()]
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Iterate `(rarity, weight)` pairs in walk order.
    pub fn iter(&self) -> impl Iterator<Item = (Rarity, u32)> + '_ {
        Rarity::ALL.iter().map(move |&r| (r, self.weight(r)))
    }

    /// Select the tier for a draw.
    ///
    /// Returns the first tier whose cumulative weight is at least `draw`.
    /// A draw beyond the total falls back to `Common`.
    #[must_use]
    pub fn select(&self, draw: u32) -> Rarity {
        let mut cumulative = 0;
        for (rarity, weight) in self.iter() {
            cumulative += weight;
            if draw <= cumulative {
                return rarity;
            }
        }
        Rarity::Common
    }
}
