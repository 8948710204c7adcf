//! Ability resolution.
//!
//! The `AbilityResolver` maps ability ids to effect descriptors and
//! computes what an effect would do to the cards in play. It never
//! mutates a card: `execute` returns an [`ExecutionResult`] and the battle
//! engine applies the outcome.
//!
//! Resolution failures (unknown ability, missing target) are reported in
//! the result, never raised. A battle keeps going when an ability fizzles.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ability::AbilityId;
use super::damage::DamageBreakdown;
use super::effect::{AbilityEffect, EffectKind, TargetScope, TriggerCondition};
use crate::cards::BattleCard;
use crate::core::BattleId;

/// Where an ability is being executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionContext {
    pub battle_id: BattleId,
    pub turn: u32,
    pub trigger: TriggerCondition,
}

/// Why an ability did nothing.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ExecutionFailure {
    #[error("no effect registered for {0:?}")]
    UnknownAbility(AbilityId),

    #[error("{0:?} needs a target but none is in play")]
    MissingTarget(AbilityId),
}

/// The card an effect lands on, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedTarget {
    Caster,
    Opponent,
}

/// Typed result of one effect, one variant per kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    Damage(DamageBreakdown),
    Heal { amount: u32 },
    AttackBoost { amount: u32 },
    Shield { amount: u32 },
    Stun,
    Dodge { chance: u32 },
    AttackDebuff { amount: u32 },
    DamageReduction { amount: u32 },
    StatBoost { attack: u32, health: u32 },
    Failed(ExecutionFailure),
}

/// Result of [`AbilityResolver::execute`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub ability: AbilityId,
    pub success: bool,
    /// The registered effect, if any.
    pub effect: Option<AbilityEffect>,
    pub target: Option<ResolvedTarget>,
    pub outcome: EffectOutcome,
    /// Human-readable description.
    pub summary: String,
}

impl ExecutionResult {
    fn failed(ability: AbilityId, effect: Option<AbilityEffect>, failure: ExecutionFailure) -> Self {
        Self {
            ability,
            success: false,
            effect,
            target: None,
            summary: format!("{} failed to activate: {}", ability.name(), failure),
            outcome: EffectOutcome::Failed(failure),
        }
    }

    /// Effect kind, if the ability is registered.
    #[must_use]
    pub fn kind(&self) -> Option<EffectKind> {
        self.effect.map(|e| e.kind)
    }

    /// Effect magnitude, or 0 when unregistered.
    #[must_use]
    pub fn magnitude(&self) -> u32 {
        self.effect.map_or(0, |e| e.magnitude)
    }

    /// Registered target scope, if any.
    #[must_use]
    pub fn scope(&self) -> Option<TargetScope> {
        self.effect.map(|e| e.target)
    }
}

/// Registry of ability effects.
///
/// ## Example
///
/// ```
/// use card_duel::abilities::{AbilityId, AbilityResolver, TriggerCondition};
///
/// let resolver = AbilityResolver::standard();
///
/// assert!(resolver.can_trigger(Some(AbilityId::BurnOnPlay), TriggerCondition::OnPlay));
/// assert!(!resolver.can_trigger(Some(AbilityId::BurnOnPlay), TriggerCondition::OnAttack));
///
/// // Decorative abilities and blank cards have no effect.
/// assert!(resolver.effect_for(Some(AbilityId::Draw)).is_none());
/// assert!(resolver.effect_for(None).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityResolver {
    effects: FxHashMap<AbilityId, AbilityEffect>,
}

impl AbilityResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with every ability that matters in a one-card duel.
    #[must_use]
    pub fn standard() -> Self {
        use AbilityId as A;
        use EffectKind as K;
        use TargetScope as T;
        use TriggerCondition as C;

        let table: [(AbilityId, EffectKind, u32, TargetScope, TriggerCondition); 24] = [
            (A::BurnOnPlay, K::Damage, 1, T::Opponent, C::OnPlay),
            (A::BurnExtra, K::AttackBoost, 1, T::Caster, C::OnAttack),
            (A::BurnEnemy, K::Damage, 1, T::Opponent, C::OnPlay),
            (A::Shock, K::Stun, 1, T::Opponent, C::OnAttack),
            (A::Lightning, K::Damage, 3, T::Any, C::OnPlay),
            (A::HealOnPlay, K::Heal, 1, T::Caster, C::OnPlay),
            (A::HealTwo, K::Heal, 2, T::Caster, C::OnPlay),
            (A::HealAlly, K::Heal, 1, T::AllAllies, C::OnPlay),
            (A::Tsunami, K::Heal, 3, T::AllAllies, C::OnPlay),
            (A::Armor, K::DamageReduction, 1, T::Caster, C::Passive),
            (A::Shield, K::Shield, 1, T::Caster, C::OnPlay),
            (A::Protection, K::Shield, 1, T::AllAllies, C::OnPlay),
            (A::Evasion, K::Dodge, 50, T::Caster, C::Passive),
            (A::Dodge, K::Dodge, 75, T::Caster, C::Passive),
            (A::PhaseDodge, K::Dodge, 25, T::Caster, C::Passive),
            (A::StealthDodge, K::Dodge, 50, T::Caster, C::Passive),
            (A::Rage, K::AttackBoost, 1, T::Caster, C::OnDamage),
            (A::Blessing, K::StatBoost, 1, T::AllAllies, C::OnPlay),
            (A::Fear, K::AttackDebuff, 1, T::Opponent, C::OnPlay),
            (A::Curse, K::AttackDebuff, 1, T::Opponent, C::OnPlay),
            (A::Growth, K::StatBoost, 1, T::Caster, C::EachTurn),
            (A::Inferno, K::Damage, 2, T::AllOpponents, C::OnPlay),
            (A::Tentacles, K::Damage, 1, T::AllOpponents, C::OnAttack),
            (A::Earthquake, K::Stun, 1, T::AllOpponents, C::OnPlay),
        ];

        let mut resolver = Self::new();
        for (id, kind, magnitude, target, trigger) in table {
            resolver.register(
                id,
                AbilityEffect::new(kind, magnitude)
                    .with_target(target)
                    .with_trigger(trigger),
            );
        }
        resolver
    }

    /// Register an effect.
    ///
    /// Registered effects are immutable: returns `false` and keeps the
    /// existing entry if `id` is already registered.
    pub fn register(&mut self, id: AbilityId, effect: AbilityEffect) -> bool {
        if self.effects.contains_key(&id) {
            return false;
        }
        self.effects.insert(id, effect);
        true
    }

    /// Effect for an ability. Blank and unregistered abilities have none.
    #[must_use]
    pub fn effect_for(&self, ability: Option<AbilityId>) -> Option<&AbilityEffect> {
        ability.and_then(|id| self.effects.get(&id))
    }

    /// True iff the ability's trigger is `condition` or passive.
    #[must_use]
    pub fn can_trigger(&self, ability: Option<AbilityId>, condition: TriggerCondition) -> bool {
        self.effect_for(ability)
            .is_some_and(|effect| effect.fires_on(condition))
    }

    /// Abilities whose trigger is exactly `condition`, sorted.
    #[must_use]
    pub fn abilities_by_trigger(&self, condition: TriggerCondition) -> Vec<AbilityId> {
        let mut ids: Vec<_> = self
            .effects
            .iter()
            .filter(|(_, effect)| effect.trigger == condition)
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Every registered ability, sorted.
    #[must_use]
    pub fn registered(&self) -> Vec<AbilityId> {
        let mut ids: Vec<_> = self.effects.keys().copied().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Compute the outcome of `ability` cast by `caster` against `target`.
    ///
    /// Pure: neither card is modified.
    #[must_use]
    pub fn execute(
        &self,
        ability: AbilityId,
        caster: &BattleCard,
        target: Option<&BattleCard>,
        context: &ExecutionContext,
    ) -> ExecutionResult {
        let Some(&effect) = self.effects.get(&ability) else {
            return ExecutionResult::failed(ability, None, ExecutionFailure::UnknownAbility(ability));
        };

        let (resolved, recipient) = if effect.target.is_friendly() {
            (ResolvedTarget::Caster, caster)
        } else {
            match target {
                Some(card) => (ResolvedTarget::Opponent, card),
                None => {
                    return ExecutionResult::failed(
                        ability,
                        Some(effect),
                        ExecutionFailure::MissingTarget(ability),
                    );
                }
            }
        };

        let m = effect.magnitude;
        let (outcome, message) = match effect.kind {
            EffectKind::Damage => {
                let hit = DamageBreakdown::compute(
                    m,
                    recipient.damage_reduction,
                    recipient.shield,
                    recipient.current_health,
                );
                let msg = format!("dealt {} damage to {}", hit.health_lost, recipient.name);
                (EffectOutcome::Damage(hit), msg)
            }
            EffectKind::Heal => {
                let amount = m.min(recipient.max_health - recipient.current_health);
                (EffectOutcome::Heal { amount }, format!("healed {} for {}", recipient.name, amount))
            }
            EffectKind::AttackBoost => (
                EffectOutcome::AttackBoost { amount: m },
                format!("{} attack increased by {}", recipient.name, m),
            ),
            EffectKind::Shield => (
                EffectOutcome::Shield { amount: m },
                format!("{} gains {} shield", recipient.name, m),
            ),
            EffectKind::Stun => (EffectOutcome::Stun, format!("{} is stunned", recipient.name)),
            EffectKind::Dodge => {
                let chance = m.min(100);
                (
                    EffectOutcome::Dodge { chance },
                    format!("{} dodge chance set to {}%", recipient.name, chance),
                )
            }
            EffectKind::AttackDebuff => {
                let amount = m.min(recipient.current_attack);
                (
                    EffectOutcome::AttackDebuff { amount },
                    format!("{} attack reduced by {}", recipient.name, amount),
                )
            }
            EffectKind::DamageReduction => (
                EffectOutcome::DamageReduction { amount: m },
                format!("{} gains {} armor", recipient.name, m),
            ),
            EffectKind::StatBoost => (
                EffectOutcome::StatBoost { attack: m, health: m },
                format!("{} gains +{}/+{}", recipient.name, m, m),
            ),
        };

        tracing::trace!(
            battle_id = context.battle_id.raw(),
            turn = context.turn,
            ability = ?ability,
            trigger = ?context.trigger,
            "ability resolved"
        );

        ExecutionResult {
            ability,
            success: true,
            effect: Some(effect),
            target: Some(resolved),
            outcome,
            summary: format!("{}: {}", ability.name(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Element, Rarity};
    use crate::core::PlayerId;

    fn card(name: &str, attack: u32, health: u32, owner: u64) -> BattleCard {
        let def = Card::new(CardId::new(1), name, Element::Fire, Rarity::Common)
            .with_stats(attack, health);
        BattleCard::from_card(&def, PlayerId::new(owner))
    }

    fn ctx(trigger: TriggerCondition) -> ExecutionContext {
        ExecutionContext {
            battle_id: BattleId::new(1),
            turn: 1,
            trigger,
        }
    }

    #[test]
    fn test_standard_registry() {
        let resolver = AbilityResolver::standard();

        assert_eq!(resolver.len(), 24);
        let burn = resolver.effect_for(Some(AbilityId::BurnOnPlay)).unwrap();
        assert_eq!(burn.kind, EffectKind::Damage);
        assert_eq!(burn.target, TargetScope::Opponent);
        assert!(resolver.effect_for(Some(AbilityId::Devour)).is_none());
    }

    #[test]
    fn test_register_does_not_overwrite() {
        let mut resolver = AbilityResolver::standard();
        let replacement = AbilityEffect::new(EffectKind::Heal, 99);

        assert!(!resolver.register(AbilityId::BurnOnPlay, replacement));
        let kept = resolver.effect_for(Some(AbilityId::BurnOnPlay)).unwrap();
        assert_eq!(kept.kind, EffectKind::Damage);
    }

    #[test]
    fn test_can_trigger_passive_matches_everything() {
        let resolver = AbilityResolver::standard();

        assert!(resolver.can_trigger(Some(AbilityId::Armor), TriggerCondition::OnAttack));
        assert!(resolver.can_trigger(Some(AbilityId::Rage), TriggerCondition::OnDamage));
        assert!(!resolver.can_trigger(Some(AbilityId::Rage), TriggerCondition::OnPlay));
        assert!(!resolver.can_trigger(None, TriggerCondition::OnPlay));
        assert!(!resolver.can_trigger(Some(AbilityId::Swift), TriggerCondition::OnPlay));
    }

    #[test]
    fn test_abilities_by_trigger() {
        let resolver = AbilityResolver::standard();

        let on_attack = resolver.abilities_by_trigger(TriggerCondition::OnAttack);
        assert_eq!(
            on_attack,
            vec![AbilityId::BurnExtra, AbilityId::Shock, AbilityId::Tentacles]
        );
        assert_eq!(
            resolver.abilities_by_trigger(TriggerCondition::EachTurn),
            vec![AbilityId::Growth]
        );
        assert!(resolver.abilities_by_trigger(TriggerCondition::OnDeath).is_empty());
        assert_eq!(resolver.registered().len(), 24);
    }

    #[test]
    fn test_execute_damage_is_pure() {
        let resolver = AbilityResolver::standard();
        let caster = card("Cinder Beast", 2, 3, 1);
        let mut target = card("Stone Beetle", 2, 1, 2);
        target.damage_reduction = 1;
        let before = target.clone();

        let result = resolver.execute(
            AbilityId::BurnOnPlay,
            &caster,
            Some(&target),
            &ctx(TriggerCondition::OnPlay),
        );

        assert!(result.success);
        assert_eq!(result.kind(), Some(EffectKind::Damage));
        assert_eq!(result.magnitude(), 1);
        assert_eq!(result.target, Some(ResolvedTarget::Opponent));
        match result.outcome {
            EffectOutcome::Damage(hit) => {
                assert_eq!(hit.after_armor, 1);
                assert_eq!(hit.health_lost, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(target, before);
    }

    #[test]
    fn test_execute_heal_is_clamped() {
        let resolver = AbilityResolver::standard();
        let mut caster = card("Light Fairy", 2, 3, 1);
        caster.current_health = 2;

        let result = resolver.execute(AbilityId::HealTwo, &caster, None, &ctx(TriggerCondition::OnPlay));

        assert!(result.success);
        assert_eq!(result.target, Some(ResolvedTarget::Caster));
        assert_eq!(result.outcome, EffectOutcome::Heal { amount: 1 });
    }

    #[test]
    fn test_execute_debuff_floors_at_zero() {
        let resolver = AbilityResolver::standard();
        let caster = card("Night Terror", 5, 1, 1);
        let target = card("Coral Guard", 0, 5, 2);

        let result = resolver.execute(AbilityId::Fear, &caster, Some(&target), &ctx(TriggerCondition::OnPlay));
        assert_eq!(result.outcome, EffectOutcome::AttackDebuff { amount: 0 });
    }

    #[test]
    fn test_missing_target_is_reported() {
        let resolver = AbilityResolver::standard();
        let caster = card("Lightning Bird", 3, 3, 1);

        let result = resolver.execute(AbilityId::Shock, &caster, None, &ctx(TriggerCondition::OnAttack));

        assert!(!result.success);
        assert_eq!(
            result.outcome,
            EffectOutcome::Failed(ExecutionFailure::MissingTarget(AbilityId::Shock))
        );
        assert!(result.summary.contains("failed"));
    }

    #[test]
    fn test_unknown_ability_is_reported() {
        let resolver = AbilityResolver::standard();
        let caster = card("Crystal Miner", 1, 3, 1);

        let result = resolver.execute(AbilityId::Draw, &caster, None, &ctx(TriggerCondition::OnPlay));

        assert!(!result.success);
        assert!(result.effect.is_none());
        assert_eq!(
            result.outcome,
            EffectOutcome::Failed(ExecutionFailure::UnknownAbility(AbilityId::Draw))
        );
    }

    #[test]
    fn test_dodge_and_stat_boost() {
        let resolver = AbilityResolver::standard();
        let caster = card("World Tree", 5, 12, 1);

        let dodge = resolver.execute(AbilityId::Dodge, &caster, None, &ctx(TriggerCondition::Passive));
        assert_eq!(dodge.outcome, EffectOutcome::Dodge { chance: 75 });

        let growth = resolver.execute(AbilityId::Growth, &caster, None, &ctx(TriggerCondition::EachTurn));
        assert_eq!(growth.outcome, EffectOutcome::StatBoost { attack: 1, health: 1 });
        assert_eq!(growth.summary, "Growth: World Tree gains +1/+1");
    }
}
