//! Battle cards - runtime card state.
//!
//! `BattleCard` is a catalog `Card` brought into one battle by one owner.
//! It tracks everything an ability or attack can change: health, attack,
//! armor, shield, dodge chance and the per-turn flags. Only the battle
//! engine mutates it; everyone else sees copies through snapshots.

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, Keywords};
use super::element::Element;
use super::rarity::Rarity;
use crate::abilities::{AbilityId, DamageBreakdown};
use crate::core::PlayerId;

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleCard {
    /// Catalog card this was built from.
    pub card_id: CardId,
    pub name: String,
    pub element: Element,
    pub rarity: Rarity,
    pub cost: u32,
    pub ability: Option<AbilityId>,
    pub keywords: Keywords,

    /// Player who submitted the card.
    pub owner: PlayerId,

    pub base_attack: u32,
    pub current_attack: u32,
    pub current_health: u32,
    pub max_health: u32,

    /// Percent chance (0-100) to dodge an incoming attack.
    pub dodge_chance: u32,

    /// Flat reduction applied to each hit (armor).
    pub damage_reduction: u32,

    /// Absorption pool consumed before health.
    pub shield: u32,

    pub can_attack: bool,
    pub has_attacked: bool,
    pub stunned: bool,
}

impl BattleCard {
    /// Bring a catalog card into play for `owner`.
    #[must_use]
    pub fn from_card(card: &Card, owner: PlayerId) -> Self {
        Self {
            card_id: card.id,
            name: card.name.clone(),
            element: card.element,
            rarity: card.rarity,
            cost: card.cost,
            ability: card.ability,
            keywords: card.keywords,
            owner,
            base_attack: card.attack,
            current_attack: card.attack,
            current_health: card.health,
            max_health: card.health,
            dodge_chance: 0,
            damage_reduction: 0,
            shield: 0,
            can_attack: true,
            has_attacked: false,
            stunned: false,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Can this card make an attack right now?
    #[must_use]
    pub fn ready_to_attack(&self) -> bool {
        self.is_alive() && self.can_attack && !self.has_attacked && !self.stunned
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keywords) -> bool {
        self.keywords.contains(keyword)
    }

    /// Apply incoming damage: armor, then shield, then health.
    pub fn take_damage(&mut self, raw: u32) -> DamageBreakdown {
        let breakdown =
            DamageBreakdown::compute(raw, self.damage_reduction, self.shield, self.current_health);
        self.shield -= breakdown.absorbed;
        self.current_health -= breakdown.health_lost;
        breakdown
    }

    /// Restore health up to the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health - self.current_health);
        self.current_health += healed;
        healed
    }

    /// Lower current attack, never below zero. Returns the amount removed.
    pub fn reduce_attack(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current_attack);
        self.current_attack -= removed;
        removed
    }

    /// Raise attack, and both max and current health.
    pub fn boost_stats(&mut self, attack: u32, health: u32) {
        self.current_attack += attack;
        self.max_health += health;
        self.current_health += health;
    }

    /// Clear per-turn flags at a turn boundary.
    ///
    /// Every card gets one attack per owning turn, rush or not.
    pub fn reset_turn_flags(&mut self) {
        self.has_attacked = false;
        self.can_attack = true;
    }
}
