//! Treasure Hunter Game Engine
//!
//! Platform-agnostic core logic for Treasure Hunter: a hunter wanders from town
//! to town, trading at shops, brawling for gold and searching for the crown,
//! the trophy and the gem. Front ends drive a [`GameSession`] one [`Command`]
//! at a time; all randomness flows through [`RandomSource`] so every decision
//! can be scripted in tests.

pub mod config;
pub mod difficulty;
pub mod error;
pub mod hunter;
pub mod items;
pub mod numbers;
pub mod rng;
pub mod session;
pub mod shop;
pub mod terrain;
pub mod town;
pub mod treasure;

// Re-export commonly used types
pub use config::{
    ConfigError, DigRules, GameConfig, GoldRange, ModeSettings, ModeTable, NoTroubleTable,
    PriceList, TownRules,
};
pub use difficulty::Difficulty;
pub use error::ParseError;
pub use hunter::{DigOutcome, Hunter, TreasureSet};
pub use items::Item;
pub use rng::{
    CountingRng, RandomSource, RngBundle, ScriptedRolls, chance, roll_die, roll_index, roll_range,
};
pub use session::{Command, GameSession, SessionStatus, SessionSummary};
pub use shop::{Shop, ShopError, ShopMode};
pub use terrain::{Terrain, TerrainKind, generate_terrain};
pub use town::{BrawlOutcome, SearchOutcome, Town, TownEvent, TownReport};
pub use treasure::{Treasure, draw_town_treasure};
