//! Tunable game rules, loadable from JSON.
//!
//! Every field has a default, so `{}` is a complete config. Values are checked
//! by [`GameConfig::validate`] before a session uses them.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::difficulty::Difficulty;
use crate::items::Item;
use crate::rng::{RandomSource, roll_range};

/// Errors raised when config invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: i32,
        value: i32,
    },
    #[error("{field} range invalid (min {min} > max {max})")]
    GoldRangeInverted {
        field: &'static str,
        min: i32,
        max: i32,
    },
    #[error("price for {item} must be positive (got {price})")]
    NonPositivePrice { item: Item, price: i32 },
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RangeViolation {
            field,
            min: 0.0,
            max: 1.0,
            value,
        })
    }
}

/// Inclusive gold amount range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRange {
    pub min: i32,
    pub max: i32,
}

impl GoldRange {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> i32 {
        roll_range(rng, self.min, self.max)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min < 1 {
            return Err(ConfigError::MinViolation {
                field,
                min: 1,
                value: self.min,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::GoldRangeInverted {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Chance that looking for trouble finds nobody, keyed on town toughness and easy mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoTroubleTable {
    #[serde(default = "NoTroubleTable::default_tough")]
    pub tough: f64,
    #[serde(default = "NoTroubleTable::default_tough_easy")]
    pub tough_easy: f64,
    #[serde(default = "NoTroubleTable::default_mild")]
    pub mild: f64,
    #[serde(default = "NoTroubleTable::default_mild_easy")]
    pub mild_easy: f64,
}

impl NoTroubleTable {
    const fn default_tough() -> f64 {
        0.66
    }

    const fn default_tough_easy() -> f64 {
        0.40
    }

    const fn default_mild() -> f64 {
        0.33
    }

    const fn default_mild_easy() -> f64 {
        0.20
    }

    #[must_use]
    pub const fn lookup(&self, tough_town: bool, easy: bool) -> f64 {
        match (tough_town, easy) {
            (true, false) => self.tough,
            (true, true) => self.tough_easy,
            (false, false) => self.mild,
            (false, true) => self.mild_easy,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("town.no_trouble.tough", self.tough)?;
        check_probability("town.no_trouble.tough_easy", self.tough_easy)?;
        check_probability("town.no_trouble.mild", self.mild)?;
        check_probability("town.no_trouble.mild_easy", self.mild_easy)
    }
}

impl Default for NoTroubleTable {
    fn default() -> Self {
        Self {
            tough: Self::default_tough(),
            tough_easy: Self::default_tough_easy(),
            mild: Self::default_mild(),
            mild_easy: Self::default_mild_easy(),
        }
    }
}

/// Odds and payouts applied inside a town.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TownRules {
    #[serde(default)]
    pub no_trouble: NoTroubleTable,
    #[serde(default = "TownRules::default_item_break_chance")]
    pub item_break_chance: f64,
    #[serde(default = "TownRules::default_brawl_gold")]
    pub brawl_gold: GoldRange,
}

impl TownRules {
    const fn default_item_break_chance() -> f64 {
        0.5
    }

    const fn default_brawl_gold() -> GoldRange {
        GoldRange::new(1, 10)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.no_trouble.validate()?;
        check_probability("town.item_break_chance", self.item_break_chance)?;
        self.brawl_gold.validate("town.brawl_gold")
    }
}

impl Default for TownRules {
    fn default() -> Self {
        Self {
            no_trouble: NoTroubleTable::default(),
            item_break_chance: Self::default_item_break_chance(),
            brawl_gold: Self::default_brawl_gold(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigRules {
    #[serde(default = "DigRules::default_find_chance")]
    pub find_chance: f64,
    #[serde(default = "DigRules::default_gold")]
    pub gold: GoldRange,
}

impl DigRules {
    const fn default_find_chance() -> f64 {
        0.5
    }

    const fn default_gold() -> GoldRange {
        GoldRange::new(1, 20)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("dig.find_chance", self.find_chance)?;
        self.gold.validate("dig.gold")
    }
}

impl Default for DigRules {
    fn default() -> Self {
        Self {
            find_chance: Self::default_find_chance(),
            gold: Self::default_gold(),
        }
    }
}

/// Shop prices in gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceList {
    pub water: i32,
    pub rope: i32,
    pub machete: i32,
    pub boots: i32,
    pub horse: i32,
    pub boat: i32,
    pub shovel: i32,
    pub sword: i32,
}

impl PriceList {
    #[must_use]
    pub const fn cost(&self, item: Item) -> i32 {
        match item {
            Item::Water => self.water,
            Item::Rope => self.rope,
            Item::Machete => self.machete,
            Item::Boots => self.boots,
            Item::Horse => self.horse,
            Item::Boat => self.boat,
            Item::Shovel => self.shovel,
            Item::Sword => self.sword,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for item in Item::ALL {
            let price = self.cost(item);
            if price <= 0 {
                return Err(ConfigError::NonPositivePrice { item, price });
            }
        }
        Ok(())
    }
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            water: 2,
            rope: 4,
            machete: 6,
            boots: 6,
            horse: 12,
            boat: 20,
            shovel: 8,
            sword: 10,
        }
    }
}

/// Per-difficulty town and shop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    /// Probability that each new town is tough.
    pub toughness: f64,
    /// Fraction of the price paid back when selling.
    pub markdown: f64,
    pub starting_gold: i32,
}

impl ModeSettings {
    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        let (toughness, markdown, starting_gold) = match difficulty {
            Difficulty::Normal => (
                "modes.normal.toughness",
                "modes.normal.markdown",
                "modes.normal.starting_gold",
            ),
            Difficulty::Hard => (
                "modes.hard.toughness",
                "modes.hard.markdown",
                "modes.hard.starting_gold",
            ),
            Difficulty::Easy => (
                "modes.easy.toughness",
                "modes.easy.markdown",
                "modes.easy.starting_gold",
            ),
        };
        check_probability(toughness, self.toughness)?;
        check_probability(markdown, self.markdown)?;
        if self.starting_gold < 0 {
            return Err(ConfigError::MinViolation {
                field: starting_gold,
                min: 0,
                value: self.starting_gold,
            });
        }
        Ok(())
    }

    fn merge_overlay(self, overlay: &ModeSettingsOverlay) -> Self {
        Self {
            toughness: overlay.toughness.unwrap_or(self.toughness),
            markdown: overlay.markdown.unwrap_or(self.markdown),
            starting_gold: overlay.starting_gold.unwrap_or(self.starting_gold),
        }
    }
}

/// Partial overlay of one mode's settings; missing fields keep that mode's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModeSettingsOverlay {
    toughness: Option<f64>,
    markdown: Option<f64>,
    starting_gold: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModeTableOverlay {
    normal: ModeSettingsOverlay,
    hard: ModeSettingsOverlay,
    easy: ModeSettingsOverlay,
}

impl From<ModeTableOverlay> for ModeTable {
    fn from(overlay: ModeTableOverlay) -> Self {
        Self {
            normal: Self::default_normal().merge_overlay(&overlay.normal),
            hard: Self::default_hard().merge_overlay(&overlay.hard),
            easy: Self::default_easy().merge_overlay(&overlay.easy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModeTableOverlay")]
pub struct ModeTable {
    pub normal: ModeSettings,
    pub hard: ModeSettings,
    pub easy: ModeSettings,
}

impl ModeTable {
    const fn default_normal() -> ModeSettings {
        ModeSettings {
            toughness: 0.4,
            markdown: 0.5,
            starting_gold: 10,
        }
    }

    const fn default_hard() -> ModeSettings {
        ModeSettings {
            toughness: 0.75,
            markdown: 0.25,
            starting_gold: 10,
        }
    }

    const fn default_easy() -> ModeSettings {
        ModeSettings {
            toughness: 0.4,
            markdown: 1.0,
            starting_gold: 20,
        }
    }

    #[must_use]
    pub const fn settings(&self, difficulty: Difficulty) -> ModeSettings {
        match difficulty {
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Easy => self.easy,
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            normal: Self::default_normal(),
            hard: Self::default_hard(),
            easy: Self::default_easy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub modes: ModeTable,
    #[serde(default)]
    pub town: TownRules,
    #[serde(default)]
    pub dig: DigRules,
    #[serde(default)]
    pub shop: PriceList,
    /// Gold granted by the test kit.
    #[serde(default = "GameConfig::default_test_kit_gold")]
    pub test_kit_gold: i32,
}

impl GameConfig {
    const fn default_test_kit_gold() -> i32 {
        100
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns an error when a probability, price or gold range is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.modes.normal.validate(Difficulty::Normal)?;
        self.modes.hard.validate(Difficulty::Hard)?;
        self.modes.easy.validate(Difficulty::Easy)?;
        self.town.validate()?;
        self.dig.validate()?;
        self.shop.validate()?;
        if self.test_kit_gold < 0 {
            return Err(ConfigError::MinViolation {
                field: "test_kit_gold",
                min: 0,
                value: self.test_kit_gold,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn mode(&self, difficulty: Difficulty) -> ModeSettings {
        self.modes.settings(difficulty)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            modes: ModeTable::default(),
            town: TownRules::default(),
            dig: DigRules::default(),
            shop: PriceList::default(),
            test_kit_gold: Self::default_test_kit_gold(),
        }
    }
}
