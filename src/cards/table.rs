//! The standard card set.
//!
//! 64 cards: 28 common, 18 rare, 12 epic, 6 legendary. No mythic card
//! exists yet, so mythic pack draws fall back to legendary.
//! Ids are assigned in table order starting at 1.

use super::definition::{Card, CardId, Keywords};
use super::element::Element;
use super::rarity::Rarity;
use crate::abilities::AbilityId;

struct Entry {
    name: &'static str,
    element: Element,
    rarity: Rarity,
    attack: u32,
    health: u32,
    cost: u32,
    ability: Option<AbilityId>,
    keywords: Keywords,
    art: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    name: &'static str,
    element: Element,
    rarity: Rarity,
    attack: u32,
    health: u32,
    cost: u32,
    ability: Option<AbilityId>,
    art: &'static str,
) -> Entry {
    Entry {
        name,
        element,
        rarity,
        attack,
        health,
        cost,
        ability,
        keywords: Keywords::empty(),
        art,
    }
}

const fn keyword(mut e: Entry, keywords: Keywords) -> Entry {
    e.keywords = keywords;
    e
}

use AbilityId as A;
use Element::{Air, Dark, Earth, Fire, Light, Water};
use Rarity::{Common, Epic, Legendary, Rare};

const STANDARD: [Entry; 64] = [
    // common
    entry("Fire Sprite", Fire, Common, 2, 1, 1, None, " /^\\\n( o )\n \\v/"),
    entry("Flame Imp", Fire, Common, 3, 2, 2, None, " /^^^\\\n( >o< )\n  \\_/"),
    keyword(
        entry("Ember Scout", Fire, Common, 1, 2, 1, Some(A::Rush), "  /\\\n ( * )\n  \\_/"),
        Keywords::RUSH,
    ),
    entry("Cinder Beast", Fire, Common, 2, 3, 3, Some(A::BurnOnPlay), " /^^^\\\n( >=< )\n  \\_/"),
    entry("Water Drop", Water, Common, 1, 3, 1, None, "  ~\n (~)\n  ~"),
    entry("Stream Fish", Water, Common, 2, 2, 2, None, " ><>\n~~~~\n ><>"),
    entry("Tide Caller", Water, Common, 1, 4, 2, Some(A::HealOnPlay), "  ~~~\n ( o )\n  ~~~"),
    keyword(
        entry("Coral Guard", Water, Common, 0, 5, 2, Some(A::Taunt), " ^^^^^\n^  o  ^\n ^^^^^"),
        Keywords::TAUNT,
    ),
    entry("Rock Pebble", Earth, Common, 1, 4, 2, None, " ###\n#####\n ###"),
    entry("Mud Golem", Earth, Common, 3, 3, 3, None, " ###\n# O #\n ###"),
    entry("Stone Beetle", Earth, Common, 2, 1, 1, Some(A::Armor), " /###\\\n( o o )\n \\___/"),
    entry("Crystal Miner", Earth, Common, 1, 3, 2, Some(A::Draw), "  ###\n # o #\n  ###"),
    entry("Wind Wisp", Air, Common, 3, 1, 1, None, " ~~~\n~ o ~\n ~~~"),
    entry("Cloud Sprite", Air, Common, 2, 3, 2, None, " ~~~~\n(  o )\n ~~~~"),
    keyword(
        entry("Gust Rider", Air, Common, 2, 2, 2, Some(A::Flying), "  /\\\n ( o )\n  \\_/"),
        Keywords::FLYING,
    ),
    entry("Zephyr Dancer", Air, Common, 1, 1, 1, Some(A::Evasion), "   ^\n  /|\\\n ( o )"),
    entry("Light Spark", Light, Common, 1, 1, 1, Some(A::Illuminate), "   *\n  /|\\\n   o"),
    entry("Dawn Wisp", Light, Common, 2, 2, 2, Some(A::Purify), "  ***\n ( o )\n  ***"),
    entry("Radiant Orb", Light, Common, 0, 3, 1, Some(A::Shield), "  ***\n * O *\n  ***"),
    entry("Holy Priest", Light, Common, 1, 3, 2, Some(A::HealAlly), "   *\n  /|\\\n ( o )\n  /|\\"),
    keyword(
        entry("Divine Messenger", Light, Common, 2, 1, 1, Some(A::Flying), "  ***\n * /|\\ *\n ( o )"),
        Keywords::FLYING,
    ),
    entry("Sacred Flame", Light, Common, 3, 1, 2, Some(A::BurnEnemy), "   *\n  ***\n   *"),
    keyword(
        entry("Shadow Wisp", Dark, Common, 2, 1, 1, Some(A::Stealth), "  ...\n ( x )\n  ..."),
        Keywords::STEALTH,
    ),
    entry("Void Spawn", Dark, Common, 1, 2, 1, Some(A::Drain), "  ###\n # x #\n  ###"),
    entry("Night Crawler", Dark, Common, 3, 1, 2, Some(A::Ambush), " /xxx\\\n( x x )\n \\___/"),
    entry("Dark Cultist", Dark, Common, 2, 2, 2, Some(A::Sacrifice), "  xxx\n ( x )\n  /|\\"),
    entry("Shade Walker", Dark, Common, 1, 3, 2, Some(A::PhaseDodge), "  ...\n . x .\n  /|\\"),
    entry("Cursed Spirit", Dark, Common, 2, 1, 1, Some(A::Curse), "  xxx\n ( x )\n  xxx"),
    // rare
    entry("Fire Wolf", Fire, Rare, 4, 3, 3, Some(A::BurnExtra), "  /\\_/\\\n ( o.o )\n  > ^ <"),
    entry("Lava Elemental", Fire, Rare, 3, 4, 4, Some(A::Molten), "  /^^^\\\n ( >=< )\n  \\___/"),
    entry("Flame Phoenix", Fire, Rare, 2, 2, 3, Some(A::Rebirth), "   /\\\n  /  \\\n ( ** )\n  \\__/"),
    entry("Ice Mage", Water, Rare, 3, 4, 4, Some(A::Freeze), "   /|\\\n  /*|*\\\n ( o o )"),
    entry(
        "Tidal Kraken",
        Water,
        Rare,
        5,
        3,
        4,
        Some(A::Tentacles),
        "  ~~~~~\n ~(o o)~\n~  \\_/  ~\n ~~~~~",
    ),
    entry(
        "Frost Guardian",
        Water,
        Rare,
        1,
        6,
        4,
        Some(A::IceShield),
        "  ^^^^^\n ^ o o ^\n^  _  ^\n ^^^^^",
    ),
    entry("Stone Giant", Earth, Rare, 5, 5, 5, Some(A::Armor), "  #####\n #  O  #\n #  _  #\n  #####"),
    entry("Crystal Golem", Earth, Rare, 4, 4, 4, Some(A::Reflect), "  #***#\n # * * #\n #  _  #\n  #####"),
    entry("Mountain Troll", Earth, Rare, 6, 2, 4, Some(A::Rage), "  #####\n # >O< #\n #  ^  #\n  #####"),
    entry("Storm Eagle", Air, Rare, 4, 2, 3, Some(A::Swift), "  \\   /\n   \\_/\n  (o o)\n   ^^^"),
    entry("Lightning Bird", Air, Rare, 3, 3, 3, Some(A::Shock), "   /\\\n  /  \\\n ( ^^ )\n  \\__/"),
    entry("Wind Dancer", Air, Rare, 2, 4, 3, Some(A::Dodge), "   ^\n  /|\\\n ( o )\n  /|\\"),
    entry("Light Fairy", Light, Rare, 2, 3, 3, Some(A::HealTwo), "   *\n  /|\\\n ( o )\n  /|\\"),
    entry("Solar Angel", Light, Rare, 4, 4, 5, Some(A::Blessing), "   ***\n  /|\\\n ( o )\n  /|\\"),
    entry("Radiant Knight", Light, Rare, 3, 5, 4, Some(A::Protection), "   /|\\\n  [***]\n ( o )\n  /|\\"),
    keyword(
        entry("Shadow Cat", Dark, Rare, 3, 2, 2, Some(A::StealthDodge), "  /\\_/\\\n ( -.o )\n  > ^ <"),
        Keywords::STEALTH,
    ),
    entry(
        "Void Walker",
        Dark,
        Rare,
        4,
        3,
        4,
        Some(A::PhaseUnblockable),
        "  .....\n . x x .\n .  _  .\n  .....",
    ),
    entry("Night Terror", Dark, Rare, 5, 1, 3, Some(A::Fear), "  xxxxx\n x >o< x\n x  ^  x\n  xxxxx"),
    // epic
    entry(
        "Fire Dragon",
        Fire,
        Epic,
        6,
        5,
        6,
        Some(A::Inferno),
        "   /\\_/\\\n  /  o  \\\n |  ___  |\n  \\  ^  /\n   \\___/",
    ),
    entry(
        "Inferno Beast",
        Fire,
        Epic,
        7,
        4,
        6,
        Some(A::Immolate),
        "  /^^^^^\\\n ( >===< )\n  \\  ^  /\n   \\___/",
    ),
    entry(
        "Water Leviathan",
        Water,
        Epic,
        5,
        7,
        7,
        Some(A::Tsunami),
        "  ~~~~~~~\n ~  o o  ~\n~   ___   ~\n ~  \\_/  ~\n  ~~~~~~~",
    ),
    entry(
        "Ocean Master",
        Water,
        Epic,
        4,
        8,
        7,
        Some(A::TidalWave),
        "  ~~~~~~~\n ~ /|\\ ~\n~  o o  ~\n ~  _  ~\n  ~~~~~~~",
    ),
    entry(
        "Earth Titan",
        Earth,
        Epic,
        7,
        6,
        7,
        Some(A::Earthquake),
        "  #######\n # O   O #\n #   _   #\n #  \\_/  #\n  #######",
    ),
    entry(
        "Stone Warden",
        Earth,
        Epic,
        5,
        9,
        8,
        Some(A::Fortress),
        "  #######\n # [***] #\n #  O O  #\n #   _   #\n  #######",
    ),
    entry(
        "Sky Lord",
        Air,
        Epic,
        6,
        4,
        5,
        Some(A::Lightning),
        "    /|\\\n   / | \\\n  |  *  |\n   \\ | /\n    \\|/",
    ),
    entry(
        "Storm Caller",
        Air,
        Epic,
        5,
        5,
        6,
        Some(A::Tempest),
        "   ^^^^^\n  ^ /|\\ ^\n ^  o o  ^\n  ^  _  ^\n   ^^^^^",
    ),
    entry(
        "Dawn Bringer",
        Light,
        Epic,
        6,
        6,
        7,
        Some(A::Radiance),
        "   *****\n  * /|\\ *\n * ( o ) *\n  * /|\\ *\n   *****",
    ),
    entry(
        "Light Avatar",
        Light,
        Epic,
        5,
        7,
        6,
        Some(A::DivineShield),
        "   *****\n  *  |  *\n * (***) *\n  * /|\\ *\n   *****",
    ),
    entry(
        "Shadow Assassin",
        Dark,
        Epic,
        8,
        3,
        6,
        Some(A::Backstab),
        "  .......\n . /xxx\\ .\n. ( x x ) .\n . \\___/ .\n  .......",
    ),
    entry(
        "Void Lord",
        Dark,
        Epic,
        6,
        5,
        7,
        Some(A::Consume),
        "  xxxxxxx\n x  ___  x\n x (o o) x\n x  \\_/  x\n  xxxxxxx",
    ),
    // legendary
    entry(
        "Phoenix God",
        Light,
        Legendary,
        8,
        8,
        9,
        Some(A::RebirthToHand),
        "     /|\\\n    / | \\\n   |  *  |\n  /|\\ | /|\\\n / | \\|/ | \\\n|  |  *  |  |\n \\ |     | /\n  \\|_____|/",
    ),
    entry(
        "Void Demon",
        Dark,
        Legendary,
        9,
        6,
        8,
        Some(A::Devour),
        "   #######\n  # \\   / #\n #   \\_/   #\n#  (o) (o)  #\n #    ^    #\n  # \\_-_/ #\n   #######",
    ),
    entry(
        "Eternal Flame",
        Fire,
        Legendary,
        10,
        5,
        9,
        Some(A::Immortal),
        "   /^^^^^\\\n  / ===== \\\n | (  *  ) |\n  \\ ===== /\n   \\^^^^^/",
    ),
    entry(
        "Primordial Sea",
        Water,
        Legendary,
        6,
        10,
        10,
        Some(A::Flood),
        "  ~~~~~~~~~\n ~ ~~~~~~~ ~\n~  ( *** )  ~\n ~ ~~~~~~~ ~\n  ~~~~~~~~~",
    ),
    entry(
        "World Tree",
        Earth,
        Legendary,
        5,
        12,
        10,
        Some(A::Growth),
        "    #####\n   # *** #\n  #  ***  #\n #   ***   #\n#    ***    #\n     ###",
    ),
    entry(
        "Sky Sovereign",
        Air,
        Legendary,
        8,
        7,
        9,
        Some(A::Dominion),
        "   ^^^^^^^\n  ^ ***** ^\n ^ ( *** ) ^\n  ^ ***** ^\n   ^^^^^^^",
    ),
];

/// Build the standard card set.
#[must_use]
pub fn standard_cards() -> Vec<Card> {
    STANDARD
        .iter()
        .zip(1u32..)
        .map(|(e, id)| {
            let mut card = Card::new(CardId::new(id), e.name, e.element, e.rarity)
                .with_stats(e.attack, e.health)
                .with_cost(e.cost)
                .with_keywords(e.keywords)
                .with_art(e.art);
            card.ability = e.ability;
            card
        })
        .collect()
}
