//! The damage mitigation rule shared by attacks and damage abilities.
//!
//! Order is fixed:
//! 1. armor subtracts a flat amount, but a positive hit always deals at least 1
//! 2. the shield pool absorbs what is left, up to its size
//! 3. health takes the remainder, never going below zero

use serde::{Deserialize, Serialize};

/// How a single hit was mitigated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Incoming damage before mitigation.
    pub raw: u32,
    /// Damage left after armor.
    pub after_armor: u32,
    /// Damage soaked by the shield pool.
    pub absorbed: u32,
    /// Health actually removed.
    pub health_lost: u32,
}

impl DamageBreakdown {
    /// Compute the mitigation of `raw` damage against a defender.
    ///
    /// ```
    /// use card_duel::abilities::DamageBreakdown;
    ///
    /// // 5 damage into 2 armor, 1 shield, 10 health
    /// let hit = DamageBreakdown::compute(5, 2, 1, 10);
    /// assert_eq!(hit.after_armor, 3);
    /// assert_eq!(hit.absorbed, 1);
    /// assert_eq!(hit.health_lost, 2);
    /// ```
    #[must_use]
    pub fn compute(raw: u32, armor: u32, shield: u32, health: u32) -> Self {
        if raw == 0 {
            return Self::default();
        }

        let after_armor = raw.saturating_sub(armor).max(1);
        let absorbed = shield.min(after_armor);
        let health_lost = (after_armor - absorbed).min(health);

        Self {
            raw,
            after_armor,
            absorbed,
            health_lost,
        }
    }

    /// Did the hit reach health?
    #[must_use]
    pub fn wounded(&self) -> bool {
        self.health_lost > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_damage_is_a_no_op() {
        assert_eq!(DamageBreakdown::compute(0, 3, 2, 5), DamageBreakdown::default());
    }

    #[test]
    fn test_armor_floor_of_one() {
        let hit = DamageBreakdown::compute(2, 5, 0, 5);
        assert_eq!(hit.after_armor, 1);
        assert_eq!(hit.health_lost, 1);
    }

    #[test]
    fn test_shield_absorbs_before_health() {
        let hit = DamageBreakdown::compute(3, 0, 5, 5);
        assert_eq!(hit.absorbed, 3);
        assert_eq!(hit.health_lost, 0);
        assert!(!hit.wounded());
    }

    #[test]
    fn test_overkill_is_capped_by_health() {
        let hit = DamageBreakdown::compute(10, 1, 2, 3);
        assert_eq!(hit.after_armor, 9);
        assert_eq!(hit.absorbed, 2);
        assert_eq!(hit.health_lost, 3);
    }
}
