//! The player's hunter: gold, kit and collected treasure.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;

use crate::config::DigRules;
use crate::items::Item;
use crate::rng::{RandomSource, chance};
use crate::treasure::{TREASURE_TABLE, Treasure};

/// Treasure collection; at most the three collectible kinds are ever stored.
pub type TreasureSet = SmallVec<[Treasure; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigOutcome {
    Gold { amount: i32 },
    Dirt,
}

impl DigOutcome {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Gold { amount } => format!("You dug up {amount} gold!"),
            Self::Dirt => "You dug but only found dirt.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunter {
    name: String,
    gold: i32,
    #[serde(default)]
    kit: BTreeSet<Item>,
    #[serde(default)]
    treasures: TreasureSet,
}

impl Hunter {
    #[must_use]
    pub fn new(name: impl Into<String>, starting_gold: i32) -> Self {
        Self {
            name: name.into(),
            gold: starting_gold,
            kit: BTreeSet::new(),
            treasures: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn gold(&self) -> i32 {
        self.gold
    }

    /// Add or remove gold; the balance may go negative.
    pub fn change_gold(&mut self, delta: i32) {
        self.gold = self.gold.saturating_add(delta);
    }

    pub fn set_gold(&mut self, gold: i32) {
        self.gold = gold;
    }

    #[must_use]
    pub fn has_item_in_kit(&self, item: Item) -> bool {
        self.kit.contains(&item)
    }

    /// Returns false when the item was already carried.
    pub fn add_item_to_kit(&mut self, item: Item) -> bool {
        self.kit.insert(item)
    }

    /// Returns false when the item was not carried.
    pub fn remove_item_from_kit(&mut self, item: Item) -> bool {
        self.kit.remove(&item)
    }

    pub fn add_all_items(&mut self) {
        self.kit.extend(Item::ALL);
    }

    #[must_use]
    pub fn kit(&self) -> impl Iterator<Item = Item> + '_ {
        self.kit.iter().copied()
    }

    #[must_use]
    pub fn has_sword(&self) -> bool {
        self.has_item_in_kit(Item::Sword)
    }

    #[must_use]
    pub fn has_shovel(&self) -> bool {
        self.has_item_in_kit(Item::Shovel)
    }

    /// Store a treasure. Returns false if it is already owned; dust is never kept.
    pub fn add_treasure(&mut self, treasure: Treasure) -> bool {
        if !treasure.is_collectible() || self.treasures.contains(&treasure) {
            return false;
        }
        self.treasures.push(treasure);
        true
    }

    #[must_use]
    pub fn has_treasure(&self, treasure: Treasure) -> bool {
        self.treasures.contains(&treasure)
    }

    #[must_use]
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    #[must_use]
    pub fn has_all_treasures(&self) -> bool {
        TREASURE_TABLE
            .iter()
            .filter(|treasure| treasure.is_collectible())
            .all(|treasure| self.treasures.contains(treasure))
    }

    #[must_use]
    pub const fn is_bankrupt(&self) -> bool {
        self.gold < 0
    }

    /// Dig once for gold. Callers gate on shovel ownership and per-town repeats.
    pub fn dig<R: RandomSource + ?Sized>(&mut self, rng: &mut R, rules: &DigRules) -> DigOutcome {
        let outcome = if chance(rng, rules.find_chance) {
            let amount = rules.gold.roll(rng);
            self.change_gold(amount);
            DigOutcome::Gold { amount }
        } else {
            DigOutcome::Dirt
        };
        log::debug!("{} dug: {outcome:?}", self.name);
        outcome
    }
}

impl fmt::Display for Hunter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has {} gold", self.name, self.gold)?;
        if self.kit.is_empty() {
            write!(f, "\nKit: (empty)")?;
        } else {
            let kit: Vec<&str> = self.kit.iter().map(|item| item.label()).collect();
            write!(f, "\nKit: {}", kit.join(", "))?;
        }
        if self.treasures.is_empty() {
            write!(f, "\nTreasures: none")
        } else {
            let found: Vec<&str> = self.treasures.iter().map(|t| t.phrase()).collect();
            write!(f, "\nTreasures: {}", found.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoldRange;
    use crate::rng::ScriptedRolls;

    #[test]
    fn gold_can_go_negative() {
        let mut hunter = Hunter::new("Ivan", 3);
        hunter.change_gold(-5);
        assert_eq!(hunter.gold(), -2);
        assert!(hunter.is_bankrupt());
    }

    #[test]
    fn kit_tracks_possession_only() {
        let mut hunter = Hunter::new("Ivan", 10);
        assert!(hunter.add_item_to_kit(Item::Rope));
        assert!(!hunter.add_item_to_kit(Item::Rope));
        assert!(hunter.has_item_in_kit(Item::Rope));
        assert!(hunter.remove_item_from_kit(Item::Rope));
        assert!(!hunter.remove_item_from_kit(Item::Rope));
        assert!(!hunter.has_item_in_kit(Item::Rope));
    }

    #[test]
    fn add_all_items_grants_sword_and_shovel() {
        let mut hunter = Hunter::new("Tester", 0);
        hunter.add_all_items();
        assert!(hunter.has_sword());
        assert!(hunter.has_shovel());
        assert_eq!(hunter.kit().count(), Item::ALL.len());
    }

    #[test]
    fn treasures_reject_duplicates_and_dust() {
        let mut hunter = Hunter::new("Ivan", 10);
        assert!(hunter.add_treasure(Treasure::Gem));
        assert!(!hunter.add_treasure(Treasure::Gem));
        assert!(!hunter.add_treasure(Treasure::Dust));
        assert_eq!(hunter.treasures(), &[Treasure::Gem]);
        assert!(!hunter.has_all_treasures());
        hunter.add_treasure(Treasure::Crown);
        hunter.add_treasure(Treasure::Trophy);
        assert!(hunter.has_all_treasures());
    }

    #[test]
    fn dig_finds_gold_or_dirt() {
        let rules = DigRules {
            find_chance: 0.5,
            gold: GoldRange::new(1, 20),
        };
        let mut hunter = Hunter::new("Ivan", 0);
        let mut rolls = ScriptedRolls::new([0.1, 0.5, 0.9]);
        assert_eq!(hunter.dig(&mut rolls, &rules), DigOutcome::Gold { amount: 11 });
        assert_eq!(hunter.gold(), 11);
        assert_eq!(hunter.dig(&mut rolls, &rules), DigOutcome::Dirt);
        assert_eq!(hunter.gold(), 11);
        assert_eq!(rolls.draws(), 3);
    }

    #[test]
    fn display_lists_kit_and_treasure() {
        let mut hunter = Hunter::new("Ivan", 7);
        assert_eq!(hunter.to_string(), "Ivan has 7 gold\nKit: (empty)\nTreasures: none");
        hunter.add_item_to_kit(Item::Water);
        hunter.add_item_to_kit(Item::Rope);
        hunter.add_treasure(Treasure::Crown);
        assert_eq!(hunter.to_string(), "Ivan has 7 gold\nKit: Water, Rope\nTreasures: a crown");
    }
}
