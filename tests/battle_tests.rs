//! Battle engine integration tests.
//!
//! These drive whole duels through the public API with catalog cards and
//! custom resolvers.

use card_duel::abilities::{
    AbilityEffect, AbilityId, AbilityResolver, EffectKind, TargetScope, TriggerCondition,
};
use card_duel::battle::{AttackOutcome, Battle, BattleError, BattleState};
use card_duel::cards::{Card, CardCatalog, CardId, Element, Rarity};
use card_duel::core::{BattleId, GameRng, PlayerId};

const A: PlayerId = PlayerId(10);
const B: PlayerId = PlayerId(20);

fn custom(name: &str, attack: u32, health: u32) -> Card {
    Card::new(CardId::new(900), name, Element::Air, Rarity::Rare).with_stats(attack, health)
}

fn dodge_resolver(chance: u32) -> AbilityResolver {
    let mut resolver = AbilityResolver::new();
    resolver.register(
        AbilityId::Evasion,
        AbilityEffect::new(EffectKind::Dodge, chance).with_trigger(TriggerCondition::Passive),
    );
    resolver
}

// =============================================================================
// Scenarios
// =============================================================================

/// Fire Sprite against Water Drop, start to finish.
#[test]
fn test_fire_sprite_vs_water_drop() {
    let catalog = CardCatalog::standard();
    let resolver = AbilityResolver::standard();
    let mut battle = Battle::new(BattleId::new(1), A, B, GameRng::new(42));

    let sprite = catalog.card_by_name("Fire Sprite").unwrap();
    let drop = catalog.card_by_name("Water Drop").unwrap();
    assert!(sprite.ability.is_none());
    assert!(drop.ability.is_none());

    battle.submit_card(A, sprite, &resolver).unwrap();
    battle.submit_card(B, drop, &resolver).unwrap();
    assert_eq!(battle.state(), BattleState::InProgress);
    assert_eq!(battle.current_turn(), A);

    let first = battle.attack(A, &resolver).unwrap();
    assert_eq!(first.damage_dealt(), 2);
    assert_eq!(battle.card_for(B).unwrap().current_health, 1);
    assert_eq!(battle.current_turn(), B);
    assert_eq!(battle.turn_number(), 1);

    let second = battle.attack(B, &resolver).unwrap();
    assert!(second.defeated());
    assert_eq!(battle.card_for(A).unwrap().current_health, 0);
    assert_eq!(battle.state(), BattleState::Finished);
    assert_eq!(battle.winner(), Some(B));
    assert!(battle.finished_at().is_some());

    assert_eq!(
        battle.attack(A, &resolver).unwrap_err(),
        BattleError::NotInProgress(BattleState::Finished)
    );
}

/// Forfeit before any card is chosen.
#[test]
fn test_forfeit_in_card_selection() {
    let mut battle = Battle::new(BattleId::new(2), A, B, GameRng::new(1));

    battle.forfeit(A).unwrap();

    assert_eq!(battle.state(), BattleState::Finished);
    assert_eq!(battle.winner(), Some(B));
    assert!(!battle.log().contains(" uses "));
    assert_eq!(battle.forfeit(B), Err(BattleError::AlreadyOver(BattleState::Finished)));
}

/// Forfeit mid-battle hands the win to the opponent.
#[test]
fn test_forfeit_in_progress() {
    let resolver = AbilityResolver::standard();
    let mut battle = Battle::new(BattleId::new(3), A, B, GameRng::new(1));
    battle.submit_card(A, &custom("X", 1, 5), &resolver).unwrap();
    battle.submit_card(B, &custom("Y", 1, 5), &resolver).unwrap();

    battle.forfeit(B).unwrap();

    assert_eq!(battle.winner(), Some(A));
    assert!(battle.snapshot().log.iter().any(|e| e.message.contains("forfeits")));
}

// =============================================================================
// Dodge
// =============================================================================

/// A certain dodge stops every attack and still passes the turn.
#[test]
fn test_dodge_chance_100() {
    let resolver = dodge_resolver(100);
    let mut battle = Battle::new(BattleId::new(4), A, B, GameRng::new(9));
    battle.submit_card(A, &custom("Hammer", 3, 100), &resolver).unwrap();
    battle
        .submit_card(B, &custom("Ghost", 1, 5).with_ability(AbilityId::Evasion), &resolver)
        .unwrap();
    assert_eq!(battle.card_for(B).unwrap().dodge_chance, 100);

    for _ in 0..25 {
        let result = battle.attack(A, &resolver).unwrap();
        assert_eq!(result.outcome, AttackOutcome::Dodged);
        assert_eq!(result.damage_dealt(), 0);
        assert_eq!(battle.current_turn(), B);

        battle.attack(B, &resolver).unwrap();
    }

    assert_eq!(battle.card_for(B).unwrap().current_health, 5);
    assert_eq!(battle.card_for(A).unwrap().current_health, 75);
}

/// With no dodge chance the RNG is never consulted and every attack lands.
#[test]
fn test_dodge_chance_0() {
    let resolver = dodge_resolver(0);
    for seed in 0..20 {
        let mut battle = Battle::new(BattleId::new(5), A, B, GameRng::new(seed));
        battle
            .submit_card(A, &custom("Jab", 1, 50).with_ability(AbilityId::Evasion), &resolver)
            .unwrap();
        battle
            .submit_card(B, &custom("Jab", 1, 50).with_ability(AbilityId::Evasion), &resolver)
            .unwrap();

        for _ in 0..10 {
            assert!(!battle.attack(A, &resolver).unwrap().dodged());
            assert!(!battle.attack(B, &resolver).unwrap().dodged());
        }
        assert_eq!(battle.card_for(A).unwrap().current_health, 40);
        assert_eq!(battle.card_for(B).unwrap().current_health, 40);
    }
}

// =============================================================================
// Turn Order
// =============================================================================

/// Turns alternate strictly and the turn number tracks full rounds.
#[test]
fn test_turn_alternation() {
    let resolver = AbilityResolver::standard();
    let mut battle = Battle::new(BattleId::new(6), A, B, GameRng::new(3));
    battle.submit_card(A, &custom("Left", 1, 30), &resolver).unwrap();
    battle.submit_card(B, &custom("Right", 1, 30), &resolver).unwrap();

    for round in 1..=5 {
        assert_eq!(battle.turn_number(), round);
        assert_eq!(battle.current_turn(), A);
        battle.attack(A, &resolver).unwrap();

        assert_eq!(battle.current_turn(), B);
        assert_eq!(battle.turn_number(), round);
        assert_eq!(battle.attack(A, &resolver).unwrap_err(), BattleError::NotYourTurn(A));
        battle.attack(B, &resolver).unwrap();
    }

    assert_eq!(battle.turn_number(), 6);
}

/// A stunned card sits out until its owner ends the turn.
#[test]
fn test_stun_needs_end_turn() {
    let mut resolver = AbilityResolver::new();
    resolver.register(
        AbilityId::Shock,
        AbilityEffect::new(EffectKind::Stun, 1)
            .with_target(TargetScope::Opponent)
            .with_trigger(TriggerCondition::OnAttack),
    );

    let mut battle = Battle::new(BattleId::new(7), A, B, GameRng::new(3));
    battle
        .submit_card(A, &custom("Zapper", 1, 10).with_ability(AbilityId::Shock), &resolver)
        .unwrap();
    battle.submit_card(B, &custom("Target", 1, 10), &resolver).unwrap();

    let result = battle.attack(A, &resolver).unwrap();
    assert_eq!(result.triggered.len(), 1);
    assert!(battle.card_for(B).unwrap().stunned);

    assert_eq!(battle.attack(B, &resolver).unwrap_err(), BattleError::Stunned);
    battle.end_turn(B, &resolver).unwrap();

    assert!(!battle.card_for(B).unwrap().stunned);
    assert_eq!(battle.current_turn(), A);
    assert_eq!(battle.turn_number(), 2);
}

/// A stored battle picks up exactly where it left off.
#[test]
fn test_encoded_battle_resumes() {
    let resolver = AbilityResolver::standard();
    let mut battle = Battle::new(BattleId::new(8), A, B, GameRng::new(11));
    battle.submit_card(A, &custom("Left", 2, 9), &resolver).unwrap();
    battle.submit_card(B, &custom("Right", 1, 9), &resolver).unwrap();
    battle.attack(A, &resolver).unwrap();

    let mut restored = Battle::decode(&battle.encode().unwrap()).unwrap();
    assert_eq!(restored.snapshot(), battle.snapshot());

    battle.attack(B, &resolver).unwrap();
    restored.attack(B, &resolver).unwrap();
    assert_eq!(restored.card_for(A), battle.card_for(A));
    assert_eq!(restored.current_turn(), A);
}
