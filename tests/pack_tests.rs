//! Pack opening integration tests.

use std::sync::Arc;
use std::thread;

use card_duel::cards::{CardCatalog, Rarity, RarityTable};
use card_duel::core::{ConfigError, EngineConfig, GameRng, PlayerId};
use card_duel::packs::{PackError, PackOpener};
use card_duel::store::{CollectionStore, InMemoryCollectionStore, PackType};

fn opener(seed: u64) -> (PackOpener, Arc<InMemoryCollectionStore>) {
    let store = Arc::new(InMemoryCollectionStore::new());
    let opener = PackOpener::new(
        Arc::new(CardCatalog::standard()),
        store.clone(),
        &EngineConfig::default().with_seed(seed),
    )
    .unwrap();
    (opener, store)
}

fn owned(store: &InMemoryCollectionStore, player: PlayerId) -> u32 {
    store.collection(player).unwrap().iter().map(|&(_, qty)| qty).sum()
}

// =============================================================================
// Tokens
// =============================================================================

/// No token, no pack, and nothing changes.
#[test]
fn test_open_without_token() {
    let (opener, store) = opener(1);
    let player = PlayerId::new(1);

    let err = opener.open(player, &PackType::standard()).unwrap_err();
    assert_eq!(
        err,
        PackError::NoToken {
            player,
            pack_type: PackType::standard()
        }
    );
    assert_eq!(owned(&store, player), 0);
}

/// Each open spends exactly one token.
#[test]
fn test_one_token_per_open() {
    let (opener, store) = opener(2);
    let player = PlayerId::new(2);
    let standard = PackType::standard();
    store.add_tokens(player, &standard, 3).unwrap();

    for remaining in (0..3).rev() {
        let cards = opener.open(player, &standard).unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(store.token_balance(player, &standard).unwrap(), remaining);
    }
    assert_eq!(owned(&store, player), 9);

    assert!(matches!(opener.open(player, &standard), Err(PackError::NoToken { .. })));
    assert_eq!(owned(&store, player), 9);
}

/// Tokens for one pack type do not open another.
#[test]
fn test_tokens_are_per_pack_type() {
    let (opener, store) = opener(3);
    let player = PlayerId::new(3);
    store.add_tokens(player, &PackType::new("premium"), 1).unwrap();

    assert!(opener.open(player, &PackType::standard()).is_err());
    assert!(opener.open(player, &PackType::new("premium")).is_ok());
}

/// Racing opens never spend the last token twice.
#[test]
fn test_concurrent_opens_spend_each_token_once() {
    let (opener, store) = opener(4);
    let opener = Arc::new(opener);
    let player = PlayerId::new(4);
    store.add_tokens(player, &PackType::standard(), 5).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let opener = Arc::clone(&opener);
            thread::spawn(move || opener.open(player, &PackType::standard()).is_ok())
        })
        .collect();

    let opened = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();
    assert_eq!(opened, 5);
    assert_eq!(store.token_balance(player, &PackType::standard()).unwrap(), 0);
    assert_eq!(owned(&store, player), 15);
}

// =============================================================================
// Distribution
// =============================================================================

/// 10,000 tier draws land near 60/25/10/4/1.
#[test]
fn test_rarity_distribution() {
    let (opener, _) = opener(5);
    let mut rng = GameRng::new(2024);
    let mut counts = [0u32; 5];

    for _ in 0..10_000 {
        counts[opener.draw_rarity(&mut rng).index()] += 1;
    }

    let expected = RarityTable::default();
    for rarity in Rarity::ALL {
        let observed = f64::from(counts[rarity.index()]) / 100.0;
        let target = f64::from(expected.weight(rarity));
        assert!(
            (observed - target).abs() < 1.5,
            "{rarity}: observed {observed:.2}%, expected {target}%"
        );
    }
}

/// Drawn cards follow the tier weights, with mythic draws falling back to legendary.
#[test]
fn test_simulated_cards_by_rarity() {
    let (opener, _) = opener(6);
    let cards = opener.simulate(10_000).unwrap();

    let share = |r: Rarity| cards.iter().filter(|c| c.rarity == r).count() as f64 / 100.0;
    assert!((share(Rarity::Common) - 60.0).abs() < 2.0);
    assert!((share(Rarity::Rare) - 25.0).abs() < 2.0);
    assert!((share(Rarity::Epic) - 10.0).abs() < 1.5);
    assert!((share(Rarity::Legendary) - 5.0).abs() < 1.0);
    assert_eq!(share(Rarity::Mythic), 0.0);
}

/// A config that fails validation never produces an opener.
#[test]
fn test_invalid_config_is_rejected() {
    let store = Arc::new(InMemoryCollectionStore::new());
    let config = EngineConfig::default().with_seed(8).with_cards_per_pack(0);

    let built = PackOpener::new(Arc::new(CardCatalog::standard()), store, &config);
    assert_eq!(built.err(), Some(ConfigError::EmptyPack));
}

/// Asking for an empty pack fails before any token is spent.
#[test]
fn test_zero_card_open_spends_nothing() {
    let (opener, store) = opener(9);
    let player = PlayerId::new(9);
    store.add_tokens(player, &PackType::standard(), 1).unwrap();

    assert_eq!(
        opener.open_with(player, &PackType::standard(), 0),
        Err(PackError::EmptyPack)
    );
    assert_eq!(store.token_balance(player, &PackType::standard()).unwrap(), 1);
    assert_eq!(owned(&store, player), 0);
}

/// Custom weights are honored.
#[test]
fn test_custom_weights() {
    let store = Arc::new(InMemoryCollectionStore::new());
    let config = EngineConfig::default()
        .with_seed(7)
        .with_rarity_weights(RarityTable::new([0, 0, 100, 0, 0]));
    let opener = PackOpener::new(Arc::new(CardCatalog::standard()), store, &config).unwrap();

    assert_eq!(opener.drop_rates().weight(Rarity::Epic), 100);
    assert!(opener.simulate(50).unwrap().iter().all(|c| c.rarity == Rarity::Epic));
}
