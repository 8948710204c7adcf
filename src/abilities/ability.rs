//! Stable ability identifiers.
//!
//! Cards refer to abilities by `AbilityId`, never by their display text.
//! Rewording a sentence in [`AbilityId::text`] cannot break the effect
//! registry.

use serde::{Deserialize, Serialize};

/// Identifier for every ability printed on a card.
///
/// Some abilities have no battle effect in a one-card duel (draw, rebirth,
/// devour and friends). They still have an id and text so cards can
/// display them; the resolver simply has no entry for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityId {
    // damage
    BurnOnPlay,
    BurnExtra,
    BurnEnemy,
    Shock,
    Lightning,
    Backstab,
    Immolate,

    // healing
    HealOnPlay,
    HealTwo,
    HealAlly,
    Radiance,
    Tsunami,

    // defense
    Armor,
    Shield,
    IceShield,
    DivineShield,
    Protection,

    // keywords
    Rush,
    Flying,
    Stealth,
    Taunt,
    Swift,

    // evasion
    Evasion,
    Dodge,
    PhaseDodge,
    StealthDodge,

    // stats
    Rage,
    Blessing,
    Fear,
    Curse,
    Growth,

    // special
    Rebirth,
    RebirthToHand,
    Draw,
    Sacrifice,
    Freeze,

    // area
    Inferno,
    Tentacles,
    Earthquake,
    Tempest,

    // complex
    Molten,
    Drain,
    Ambush,
    Reflect,
    Devour,
    Consume,

    // flavor
    Illuminate,
    Purify,
    PhaseUnblockable,
    TidalWave,
    Fortress,
    Immortal,
    Flood,
    Dominion,
}

impl AbilityId {
    /// Every ability id.
    pub const ALL: [AbilityId; 54] = [
        AbilityId::BurnOnPlay,
        AbilityId::BurnExtra,
        AbilityId::BurnEnemy,
        AbilityId::Shock,
        AbilityId::Lightning,
        AbilityId::Backstab,
        AbilityId::Immolate,
        AbilityId::HealOnPlay,
        AbilityId::HealTwo,
        AbilityId::HealAlly,
        AbilityId::Radiance,
        AbilityId::Tsunami,
        AbilityId::Armor,
        AbilityId::Shield,
        AbilityId::IceShield,
        AbilityId::DivineShield,
        AbilityId::Protection,
        AbilityId::Rush,
        AbilityId::Flying,
        AbilityId::Stealth,
        AbilityId::Taunt,
        AbilityId::Swift,
        AbilityId::Evasion,
        AbilityId::Dodge,
        AbilityId::PhaseDodge,
        AbilityId::StealthDodge,
        AbilityId::Rage,
        AbilityId::Blessing,
        AbilityId::Fear,
        AbilityId::Curse,
        AbilityId::Growth,
        AbilityId::Rebirth,
        AbilityId::RebirthToHand,
        AbilityId::Draw,
        AbilityId::Sacrifice,
        AbilityId::Freeze,
        AbilityId::Inferno,
        AbilityId::Tentacles,
        AbilityId::Earthquake,
        AbilityId::Tempest,
        AbilityId::Molten,
        AbilityId::Drain,
        AbilityId::Ambush,
        AbilityId::Reflect,
        AbilityId::Devour,
        AbilityId::Consume,
        AbilityId::Illuminate,
        AbilityId::Purify,
        AbilityId::PhaseUnblockable,
        AbilityId::TidalWave,
        AbilityId::Fortress,
        AbilityId::Immortal,
        AbilityId::Flood,
        AbilityId::Dominion,
    ];

    /// Display text printed on the card.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            AbilityId::BurnOnPlay => "Burn: Deal 1 damage when played",
            AbilityId::BurnExtra => "Burn: Deal 1 extra damage",
            AbilityId::BurnEnemy => "Burn: Deal 1 damage to enemy",
            AbilityId::Shock => "Shock: Stun target",
            AbilityId::Lightning => "Lightning: Deal 3 damage to any target",
            AbilityId::Backstab => "Backstab: Deal double damage to damaged enemies",
            AbilityId::Immolate => "Immolate: Destroy to deal 5 damage",
            AbilityId::HealOnPlay => "Heal: Restore 1 health when played",
            AbilityId::HealTwo => "Heal: Restore 2 health",
            AbilityId::HealAlly => "Heal: Restore 1 health to ally",
            AbilityId::Radiance => "Radiance: Heal all allies to full",
            AbilityId::Tsunami => "Tsunami: Heal all allies",
            AbilityId::Armor => "Armor: Reduce damage by 1",
            AbilityId::Shield => "Shield: Absorb next attack",
            AbilityId::IceShield => "Ice Shield: Reflect damage",
            AbilityId::DivineShield => "Divine Shield: Immune to damage for 1 turn",
            AbilityId::Protection => "Protection: Shield allies",
            AbilityId::Rush => "Rush: Can attack immediately",
            AbilityId::Flying => "Flying: Cannot be blocked",
            AbilityId::Stealth => "Stealth: Cannot be targeted",
            AbilityId::Taunt => "Taunt: Enemies must attack this first",
            AbilityId::Swift => "Swift: Attack first",
            AbilityId::Evasion => "Evasion: 50% chance to dodge attacks",
            AbilityId::Dodge => "Dodge: 75% evasion chance",
            AbilityId::PhaseDodge => "Phase: 25% dodge chance",
            AbilityId::StealthDodge => "Stealth: 50% dodge chance",
            AbilityId::Rage => "Rage: +1 attack when damaged",
            AbilityId::Blessing => "Blessing: Boost ally stats",
            AbilityId::Fear => "Fear: Reduce enemy attack",
            AbilityId::Curse => "Curse: Reduce enemy attack by 1",
            AbilityId::Growth => "Growth: Gain +1/+1 each turn",
            AbilityId::Rebirth => "Rebirth: Return when destroyed",
            AbilityId::RebirthToHand => "Rebirth: Return to hand when destroyed",
            AbilityId::Draw => "Draw: Draw a card when played",
            AbilityId::Sacrifice => "Sacrifice: Destroy to draw card",
            AbilityId::Freeze => "Freeze: Skip enemy turn",
            AbilityId::Inferno => "Inferno: Deal damage to all enemies",
            AbilityId::Tentacles => "Tentacles: Attack all enemies",
            AbilityId::Earthquake => "Earthquake: Stun all enemies",
            AbilityId::Tempest => "Tempest: All creatures gain flying",
            AbilityId::Molten => "Molten: Damage attackers",
            AbilityId::Drain => "Drain: Heal when dealing damage",
            AbilityId::Ambush => "Ambush: +2 attack if enemy damaged",
            AbilityId::Reflect => "Reflect: Return spell damage",
            AbilityId::Devour => "Devour: Destroy any card and gain its stats",
            AbilityId::Consume => "Consume: Destroy ally to gain +3/+3",
            AbilityId::Illuminate => "Illuminate: Reveal enemy hand",
            AbilityId::Purify => "Purify: Remove negative effects",
            AbilityId::PhaseUnblockable => "Phase: Cannot be blocked",
            AbilityId::TidalWave => "Tidal Wave: Return all cards to hand",
            AbilityId::Fortress => "Fortress: Cannot be targeted by spells",
            AbilityId::Immortal => "Immortal: Cannot be destroyed by spells",
            AbilityId::Flood => "Flood: Reset all cards to base stats",
            AbilityId::Dominion => "Dominion: Control all flying creatures",
        }
    }

    /// Short name, the text before the colon.
    #[must_use]
    pub fn name(self) -> &'static str {
        let text = self.text();
        text.split_once(':').map_or(text, |(name, _)| name)
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
