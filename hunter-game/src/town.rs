//! Town turn actions and their effect on the visiting hunter.
//!
//! A [`Town`] is founded with one terrain, one hidden treasure and a toughness
//! flag, all drawn at construction. Each action borrows the hunter for the
//! duration of the call and answers with a [`TownReport`] carrying the text
//! shown to the player.
//!
//! Draw order per action:
//! - founding: terrain, toughness, treasure
//! - [`Town::look_for_trouble`]: sword payout, or trouble roll then payout and
//!   win roll when a fight starts
//! - [`Town::leave_town`]: one breakage roll on a successful crossing, none in
//!   easy mode
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TownRules;
use crate::difficulty::Difficulty;
use crate::hunter::Hunter;
use crate::items::Item;
use crate::rng::{RandomSource, chance};
use crate::shop::{Shop, ShopMode};
use crate::terrain::{Terrain, TerrainKind, generate_terrain};
use crate::treasure::{Treasure, draw_town_treasure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrawlOutcome {
    /// The brawler saw the hunter's sword and paid up.
    Yielded { gold: i32 },
    NoTrouble,
    Won { gold: i32 },
    Lost { gold: i32 },
}

impl BrawlOutcome {
    /// Signed change applied to the hunter's gold.
    #[must_use]
    pub const fn gold_delta(&self) -> i32 {
        match *self {
            Self::Yielded { gold } | Self::Won { gold } => gold,
            Self::Lost { gold } => -gold,
            Self::NoTrouble => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(Treasure),
    AlreadyOwned(Treasure),
    AlreadySearched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TownEvent {
    Arrived {
        tough_town: bool,
    },
    Crossed {
        terrain: TerrainKind,
        item: Item,
        item_lost: bool,
    },
    Blocked {
        terrain: TerrainKind,
        item: Item,
    },
    LeftShop {
        mode: ShopMode,
    },
    Brawl(BrawlOutcome),
    Search(SearchOutcome),
    DugGold,
}

/// Result of one town action.
///
/// `success` is true when the action achieved what the hunter wanted: arriving,
/// crossing, visiting the shop, gaining gold in a brawl, finding new treasure
/// or recording a dig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownReport {
    pub success: bool,
    pub message: String,
    pub event: TownEvent,
}

impl TownReport {
    fn new(success: bool, message: impl Into<String>, event: TownEvent) -> Self {
        Self {
            success,
            message: message.into(),
            event,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    shop: Shop,
    terrain: Terrain,
    treasure: Treasure,
    tough_town: bool,
    difficulty: Difficulty,
    rules: TownRules,
    searched: bool,
    dug_gold: bool,
}

impl Town {
    /// Found a town with the default town rules.
    pub fn new<R: RandomSource + ?Sized>(
        shop: Shop,
        toughness: f64,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Self {
        Self::generate(shop, toughness, difficulty, TownRules::default(), rng)
    }

    /// Found a town, drawing terrain, toughness and treasure in that order.
    pub fn generate<R: RandomSource + ?Sized>(
        shop: Shop,
        toughness: f64,
        difficulty: Difficulty,
        rules: TownRules,
        rng: &mut R,
    ) -> Self {
        let terrain = generate_terrain(rng);
        let tough_town = chance(rng, toughness);
        let treasure = draw_town_treasure(rng);
        log::debug!("founded town: terrain={terrain} tough={tough_town} treasure={treasure}");
        Self::from_parts(shop, terrain, treasure, tough_town, difficulty).with_rules(rules)
    }

    /// Build a town with fixed contents and default rules.
    #[must_use]
    pub fn from_parts(
        shop: Shop,
        terrain: Terrain,
        treasure: Treasure,
        tough_town: bool,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            shop,
            terrain,
            treasure,
            tough_town,
            difficulty,
            rules: TownRules::default(),
            searched: false,
            dug_gold: false,
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: TownRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    #[must_use]
    pub const fn treasure(&self) -> Treasure {
        self.treasure
    }

    #[must_use]
    pub const fn is_tough(&self) -> bool {
        self.tough_town
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    #[must_use]
    pub const fn is_searched(&self) -> bool {
        self.searched
    }

    #[must_use]
    pub const fn is_dug_gold(&self) -> bool {
        self.dug_gold
    }

    pub fn hunter_arrives(&self, hunter: &Hunter) -> TownReport {
        let mood = if self.tough_town {
            "It's pretty rough around here, so watch yourself."
        } else {
            "We're just a sleepy little town with mild mannered folk."
        };
        TownReport::new(
            true,
            format!("Welcome to town, {}.\n{mood}", hunter.name()),
            TownEvent::Arrived {
                tough_town: self.tough_town,
            },
        )
    }

    /// Cross the surrounding terrain. Succeeds iff the hunter carries the
    /// required item; a successful crossing may break it.
    pub fn leave_town<R: RandomSource + ?Sized>(
        &self,
        hunter: &mut Hunter,
        rng: &mut R,
    ) -> TownReport {
        let item = self.terrain.required_item();
        let terrain = self.terrain.kind();
        if !hunter.has_item_in_kit(item) {
            return TownReport::new(
                false,
                format!(
                    "You can't leave town, {}. You don't have a {item}.",
                    hunter.name()
                ),
                TownEvent::Blocked { terrain, item },
            );
        }

        let mut message = format!("You used your {item} to cross the {}.", self.terrain);
        let item_lost = self.check_item_break(rng);
        if item_lost {
            hunter.remove_item_from_kit(item);
            message.push_str(&format!("\nUnfortunately, you have lost your {item}."));
        }
        TownReport::new(
            true,
            message,
            TownEvent::Crossed {
                terrain,
                item,
                item_lost,
            },
        )
    }

    /// Visit the shop. Any message from the shop replaces the default one.
    pub fn enter_shop(
        &self,
        hunter: &mut Hunter,
        mode: ShopMode,
        pick: Option<Item>,
    ) -> TownReport {
        let mut message = String::from("You have left the shop.");
        if let Some(shop_message) = self.shop.enter(hunter, mode, pick) {
            message = shop_message;
        }
        TownReport::new(true, message, TownEvent::LeftShop { mode })
    }

    /// Pick a fight for gold. Repeatable; odds depend on toughness and difficulty.
    pub fn look_for_trouble<R: RandomSource + ?Sized>(
        &self,
        hunter: &mut Hunter,
        rng: &mut R,
    ) -> TownReport {
        let outcome = self.resolve_brawl(hunter.has_sword(), rng);
        hunter.change_gold(outcome.gold_delta());
        log::debug!("brawl outcome: {outcome:?}");

        let message = match outcome {
            BrawlOutcome::Yielded { gold } => format!(
                "The brawler, seeing your sword, realizes he picked a losing fight and gives you his gold\nYou won the brawl and receive {gold} gold."
            ),
            BrawlOutcome::NoTrouble => "You couldn't find any trouble".to_string(),
            BrawlOutcome::Won { gold } => format!(
                "You want trouble, stranger!  You got it!\nOof! Umph! Ow!\nOkay, stranger! You proved yer mettle. Here, take my gold.\nYou won the brawl and receive {gold} gold."
            ),
            BrawlOutcome::Lost { gold } => format!(
                "You want trouble, stranger!  You got it!\nOof! Umph! Ow!\nThat'll teach you to go lookin' fer trouble in MY town! Now pay up!\nYou lost the brawl and pay {gold} gold."
            ),
        };
        let success = outcome.gold_delta() > 0;
        TownReport::new(success, message, TownEvent::Brawl(outcome))
    }

    fn resolve_brawl<R: RandomSource + ?Sized>(
        &self,
        has_sword: bool,
        rng: &mut R,
    ) -> BrawlOutcome {
        if has_sword {
            return BrawlOutcome::Yielded {
                gold: self.rules.brawl_gold.roll(rng),
            };
        }

        let no_trouble = self.no_trouble_chance();
        if rng.next_unit() <= no_trouble {
            return BrawlOutcome::NoTrouble;
        }
        let gold = self.rules.brawl_gold.roll(rng);
        if rng.next_unit() > no_trouble {
            BrawlOutcome::Won { gold }
        } else {
            BrawlOutcome::Lost { gold }
        }
    }

    /// Threshold used for both the trouble roll and the win roll.
    #[must_use]
    pub const fn no_trouble_chance(&self) -> f64 {
        self.rules
            .no_trouble
            .lookup(self.tough_town, self.difficulty.is_easy())
    }

    /// Search for this town's treasure. The hunter's collection is always
    /// offered the treasure first; a searched town only reports that fact.
    pub fn hunt_for_treasure(&mut self, hunter: &mut Hunter) -> TownReport {
        let found = hunter.add_treasure(self.treasure);
        let outcome = if self.searched {
            SearchOutcome::AlreadySearched
        } else if !found {
            self.searched = true;
            SearchOutcome::AlreadyOwned(self.treasure)
        } else {
            self.searched = true;
            SearchOutcome::Found(self.treasure)
        };

        let message = match outcome {
            SearchOutcome::AlreadySearched => "You have already searched this town.".to_string(),
            SearchOutcome::AlreadyOwned(Treasure::Dust) => {
                "You found dust. Pure garbage, you threw it out as soon as you could.".to_string()
            }
            SearchOutcome::AlreadyOwned(treasure) => {
                format!("You already have {treasure} in your inventory.")
            }
            SearchOutcome::Found(treasure) => format!("You searched the town and found {treasure}"),
        };
        TownReport::new(
            matches!(outcome, SearchOutcome::Found(_)),
            message,
            TownEvent::Search(outcome),
        )
    }

    /// Mark the town as dug. One-way.
    pub fn set_dug_gold(&mut self) -> TownReport {
        self.dug_gold = true;
        TownReport::new(true, String::new(), TownEvent::DugGold)
    }

    fn check_item_break<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        if self.difficulty.is_easy() {
            return false;
        }
        chance(rng, self.rules.item_break_chance)
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "This nice little town is surrounded by {}.", self.terrain)
    }
}
