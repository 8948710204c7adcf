//! Card elements and the "beats" relation.
//!
//! Every element beats exactly one other element. The relation is not
//! symmetric: fire, earth, air and water form a four-cycle
//! (fire > earth > air > water > fire) while light and dark beat each other.
//! Advantage is informational only; it never scales damage.

use serde::{Deserialize, Serialize};

/// One of the six elemental tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,
}

impl Element {
    /// All elements in table order.
    pub const ALL: [Element; 6] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Light,
        Element::Dark,
    ];

    /// The element this one beats.
    #[must_use]
    pub const fn beats(self) -> Element {
        match self {
            Element::Fire => Element::Earth,
            Element::Water => Element::Fire,
            Element::Earth => Element::Air,
            Element::Air => Element::Water,
            Element::Light => Element::Dark,
            Element::Dark => Element::Light,
        }
    }

    /// Does this element beat `other`?
    #[must_use]
    pub fn has_advantage_over(self, other: Element) -> bool {
        self.beats() == other
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Light => "light",
            Element::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
