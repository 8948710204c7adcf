//! Effect descriptors.
//!
//! An `AbilityEffect` says what an ability does (kind and magnitude), who
//! it touches (target scope) and when it fires (trigger). Descriptors are
//! plain data; the resolver turns them into outcomes.

use serde::{Deserialize, Serialize};

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Deal damage through armor and shield.
    Damage,
    /// Restore health up to the maximum.
    Heal,
    /// Permanently raise attack.
    AttackBoost,
    /// Add to the shield pool.
    Shield,
    /// Prevent the target's next attack.
    Stun,
    /// Set the dodge chance (percent).
    Dodge,
    /// Lower attack, floor 0.
    AttackDebuff,
    /// Add armor.
    DamageReduction,
    /// +N attack and +N health.
    StatBoost,
}

impl EffectKind {
    /// Snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Damage => "damage",
            EffectKind::Heal => "heal",
            EffectKind::AttackBoost => "attack_boost",
            EffectKind::Shield => "shield",
            EffectKind::Stun => "stun",
            EffectKind::Dodge => "dodge",
            EffectKind::AttackDebuff => "attack_debuff",
            EffectKind::DamageReduction => "damage_reduction",
            EffectKind::StatBoost => "stat_boost",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Who an effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// The caster.
    #[serde(rename = "self")]
    Caster,
    Opponent,
    AllOpponents,
    AllAllies,
    /// Any card; in a duel this is the opponent.
    Any,
}

impl TargetScope {
    /// Does this scope land on the caster's side?
    #[must_use]
    pub const fn is_friendly(self) -> bool {
        matches!(self, TargetScope::Caster | TargetScope::AllAllies)
    }
}

/// When an effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    OnPlay,
    OnAttack,
    OnDamage,
    OnDeath,
    /// Always in force; applied once when the card enters play.
    Passive,
    EachTurn,
}

/// A registered effect descriptor.
///
/// ## Example
///
/// ```
/// use card_duel::abilities::{AbilityEffect, EffectKind, TargetScope, TriggerCondition};
///
/// let burn = AbilityEffect::new(EffectKind::Damage, 1)
///     .with_target(TargetScope::Opponent)
///     .with_trigger(TriggerCondition::OnPlay);
///
/// assert_eq!(burn.magnitude, 1);
/// assert!(!burn.target.is_friendly());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEffect {
    pub kind: EffectKind,
    pub magnitude: u32,
    pub target: TargetScope,
    pub trigger: TriggerCondition,
}

impl AbilityEffect {
    /// Create an effect that targets the caster when played.
    #[must_use]
    pub const fn new(kind: EffectKind, magnitude: u32) -> Self {
        Self {
            kind,
            magnitude,
            target: TargetScope::Caster,
            trigger: TriggerCondition::OnPlay,
        }
    }

    #[must_use]
    pub const fn with_target(mut self, target: TargetScope) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub const fn with_trigger(mut self, trigger: TriggerCondition) -> Self {
        self.trigger = trigger;
        self
    }

    /// Does this effect fire on `condition`? Passive effects always do.
    #[must_use]
    pub fn fires_on(&self, condition: TriggerCondition) -> bool {
        self.trigger == condition || self.trigger == TriggerCondition::Passive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on() {
        let rage = AbilityEffect::new(EffectKind::AttackBoost, 1)
            .with_trigger(TriggerCondition::OnDamage);
        assert!(rage.fires_on(TriggerCondition::OnDamage));
        assert!(!rage.fires_on(TriggerCondition::OnPlay));

        let armor = AbilityEffect::new(EffectKind::DamageReduction, 1)
            .with_trigger(TriggerCondition::Passive);
        assert!(armor.fires_on(TriggerCondition::OnPlay));
        assert!(armor.fires_on(TriggerCondition::EachTurn));
    }

    #[test]
    fn test_scope_serde_names() {
        assert_eq!(serde_json::to_string(&TargetScope::Caster).unwrap(), "\"self\"");
        assert_eq!(
            serde_json::to_string(&TargetScope::AllOpponents).unwrap(),
            "\"all_opponents\""
        );
        assert_eq!(format!("{}", EffectKind::DamageReduction), "damage_reduction");
    }
}
