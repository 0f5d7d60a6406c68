use hunter_game::{
    BrawlOutcome, Difficulty, Hunter, Item, PriceList, Shop, Terrain, TerrainKind, Town, TownEvent,
    Treasure, draw_town_treasure, generate_terrain,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashMap;

const SAMPLE_SIZE: usize = 6000;
const TOLERANCE: f64 = 0.025;

fn rate(count: usize) -> f64 {
    let total = f64::from(u32::try_from(SAMPLE_SIZE).expect("sample size fits"));
    f64::from(u32::try_from(count).expect("count fits")) / total
}

#[test]
fn terrain_draws_are_uniform_over_six_kinds() {
    let mut rng = SmallRng::seed_from_u64(0x7E44_A1);
    let mut counts: HashMap<TerrainKind, usize> = HashMap::new();
    for _ in 0..SAMPLE_SIZE {
        *counts.entry(generate_terrain(&mut rng).kind()).or_default() += 1;
    }
    assert_eq!(counts.len(), TerrainKind::ALL.len());
    for kind in TerrainKind::ALL {
        let observed = rate(counts[&kind]);
        assert!(
            (observed - 1.0 / 6.0).abs() <= TOLERANCE,
            "{kind:?} drifted: observed {observed:.4}"
        );
    }
}

#[test]
fn town_treasure_never_rolls_dust() {
    let mut rng = SmallRng::seed_from_u64(0xD057);
    let mut counts: HashMap<Treasure, usize> = HashMap::new();
    for _ in 0..SAMPLE_SIZE {
        *counts.entry(draw_town_treasure(&mut rng)).or_default() += 1;
    }
    assert!(!counts.contains_key(&Treasure::Dust));
    for treasure in [Treasure::Crown, Treasure::Trophy, Treasure::Gem] {
        let observed = rate(counts[&treasure]);
        assert!(
            (observed - 1.0 / 3.0).abs() <= TOLERANCE,
            "{treasure:?} drifted: observed {observed:.4}"
        );
    }
}

#[test]
fn town_toughness_tracks_configured_rate() {
    let mut rng = SmallRng::seed_from_u64(0x70_06);
    let shop = Shop::new(0.5, PriceList::default());
    let tough = (0..SAMPLE_SIZE)
        .filter(|_| Town::new(shop.clone(), 0.75, Difficulty::Hard, &mut rng).is_tough())
        .count();
    let observed = rate(tough);
    assert!(
        (observed - 0.75).abs() <= TOLERANCE,
        "toughness drifted: observed {observed:.4}"
    );
}

#[test]
fn sword_brawls_stay_within_payout_bounds() {
    let mut rng = SmallRng::seed_from_u64(0x5_0D);
    let town = Town::from_parts(
        Shop::new(0.5, PriceList::default()),
        Terrain::new(TerrainKind::Desert),
        Treasure::Gem,
        true,
        Difficulty::Normal,
    );
    let mut hunter = Hunter::new("Ivan", 0);
    hunter.add_item_to_kit(Item::Sword);
    for _ in 0..SAMPLE_SIZE {
        let before = hunter.gold();
        town.look_for_trouble(&mut hunter, &mut rng);
        let delta = hunter.gold() - before;
        assert!((1..=10).contains(&delta), "sword payout out of range: {delta}");
    }
}

#[test]
fn bare_handed_brawls_stay_within_bounds() {
    let mut rng = SmallRng::seed_from_u64(0xF157);
    for (tough, difficulty, expected_quiet) in [
        (true, Difficulty::Normal, 0.66),
        (false, Difficulty::Normal, 0.33),
        (true, Difficulty::Easy, 0.40),
        (false, Difficulty::Easy, 0.20),
    ] {
        let town = Town::from_parts(
            Shop::new(0.5, PriceList::default()),
            Terrain::new(TerrainKind::Plains),
            Treasure::Gem,
            tough,
            difficulty,
        );
        let mut hunter = Hunter::new("Ivan", 1_000_000);
        let mut quiet = 0usize;
        for _ in 0..SAMPLE_SIZE {
            let before = hunter.gold();
            let report = town.look_for_trouble(&mut hunter, &mut rng);
            let delta = hunter.gold() - before;
            match report.event {
                TownEvent::Brawl(BrawlOutcome::NoTrouble) => {
                    quiet += 1;
                    assert_eq!(delta, 0);
                }
                TownEvent::Brawl(BrawlOutcome::Won { .. }) => {
                    assert!((1..=10).contains(&delta));
                }
                TownEvent::Brawl(BrawlOutcome::Lost { .. }) => {
                    assert!((-10..=-1).contains(&delta));
                }
                other => panic!("unexpected brawl event {other:?}"),
            }
        }
        let observed = rate(quiet);
        assert!(
            (observed - expected_quiet).abs() <= TOLERANCE,
            "no-trouble rate drifted for tough={tough} {difficulty}: observed {observed:.4}"
        );
    }
}
