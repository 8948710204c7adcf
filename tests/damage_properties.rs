//! Property tests for damage mitigation and healing.

use proptest::prelude::*;

use card_duel::abilities::DamageBreakdown;
use card_duel::cards::{BattleCard, Card, CardId, Element, Rarity};
use card_duel::core::PlayerId;

fn battle_card(health: u32, armor: u32, shield: u32) -> BattleCard {
    let card =
        Card::new(CardId::new(1), "Dummy", Element::Earth, Rarity::Common).with_stats(1, health);
    let mut instance = BattleCard::from_card(&card, PlayerId::new(1));
    instance.damage_reduction = armor;
    instance.shield = shield;
    instance
}

proptest! {
    /// Armor never reduces a real hit below 1, shield soaks first, health floors at 0.
    #[test]
    fn mitigation_order(raw in 1u32..200, armor in 0u32..50, shield in 0u32..50, health in 1u32..100) {
        let hit = DamageBreakdown::compute(raw, armor, shield, health);

        let effective = raw.saturating_sub(armor).max(1);
        prop_assert_eq!(hit.after_armor, effective);
        prop_assert_eq!(hit.absorbed, shield.min(effective));
        prop_assert_eq!(hit.health_lost, (effective - hit.absorbed).min(health));
    }

    /// Applying a hit to a card keeps every pool consistent.
    #[test]
    fn take_damage_never_underflows(raw in 0u32..200, armor in 0u32..20, shield in 0u32..20, health in 1u32..50) {
        let mut card = battle_card(health, armor, shield);
        let hit = card.take_damage(raw);

        prop_assert_eq!(card.shield, shield - hit.absorbed);
        prop_assert_eq!(card.current_health, health - hit.health_lost);
        prop_assert_eq!(card.is_alive(), card.current_health > 0);
        if raw == 0 {
            prop_assert_eq!(hit, DamageBreakdown::default());
        }
    }

    /// Healing never exceeds max health.
    #[test]
    fn heal_is_clamped(health in 2u32..50, damage in 1u32..50, heal in 0u32..100) {
        let mut card = battle_card(health, 0, 0);
        card.take_damage(damage.min(health - 1));
        let before = card.current_health;

        let healed = card.heal(heal);

        prop_assert!(card.current_health <= card.max_health);
        prop_assert_eq!(card.current_health, before + healed);
    }
}
