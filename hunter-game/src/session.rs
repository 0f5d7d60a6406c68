//! Game session tying one hunter to the current town.
//!
//! The session owns the hunter, the RNG streams and whichever town the hunter
//! is in. It dispatches one [`Command`] per turn and replaces the town when the
//! hunter crosses its terrain.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ConfigError, GameConfig};
use crate::difficulty::Difficulty;
use crate::hunter::Hunter;
use crate::items::Item;
use crate::rng::RngBundle;
use crate::shop::{Shop, ShopMode};
use crate::town::{BrawlOutcome, Town, TownEvent};
use crate::treasure::Treasure;

pub const INVALID_CHOICE: &str = "Yikes! That's an invalid option! Try again.";
pub const NO_SHOVEL: &str = "You can't dig for gold without a shovel!";
pub const ALREADY_DUG: &str = "You already dug for gold in this town";
pub const GAME_OVER: &str = "GAME OVER, You have lost all your gold!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Shop { mode: ShopMode, pick: Option<Item> },
    Move,
    LookForTrouble,
    Dig,
    Hunt,
    Exit,
}

impl Command {
    /// Parse a menu line such as `"l"` or `"b rope"`. Returns `None` for
    /// anything that is not a menu choice.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut tokens = input.split_whitespace();
        let choice = tokens.next()?.to_ascii_lowercase();
        let rest = tokens.next();
        let command = match choice.as_str() {
            "b" | "s" => {
                let mode = choice.parse::<ShopMode>().ok()?;
                let pick = match rest {
                    Some(word) => Some(word.parse::<Item>().ok()?),
                    None => None,
                };
                return Some(Self::Shop { mode, pick });
            }
            "m" => Self::Move,
            "l" => Self::LookForTrouble,
            "d" => Self::Dig,
            "h" => Self::Hunt,
            "x" => Self::Exit,
            _ => return None,
        };
        rest.is_none().then_some(command)
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Shop {
                mode: ShopMode::Buy,
                ..
            } => "b",
            Self::Shop {
                mode: ShopMode::Sell,
                ..
            } => "s",
            Self::Move => "m",
            Self::LookForTrouble => "l",
            Self::Dig => "d",
            Self::Hunt => "h",
            Self::Exit => "x",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Playing,
    Exited,
    Bankrupt,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Playing => "playing",
            Self::Exited => "exited",
            Self::Bankrupt => "bankrupt",
        };
        f.write_str(label)
    }
}

/// End-of-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub hunter: String,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub status: SessionStatus,
    pub gold: i32,
    pub turns: u32,
    pub towns_visited: u32,
    pub treasures: Vec<Treasure>,
    pub kit: Vec<Item>,
    pub brawls_won: u32,
    pub brawls_lost: u32,
    /// Crown, trophy and gem all collected. The session keeps running.
    pub has_all_treasures: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    difficulty: Difficulty,
    seed: u64,
    rng: RngBundle,
    hunter: Hunter,
    town: Town,
    latest_news: String,
    departure_news: Option<String>,
    status: SessionStatus,
    turns: u32,
    towns_visited: u32,
    brawls_won: u32,
    brawls_lost: u32,
}

impl GameSession {
    /// Start a session: create the hunter and found the first town.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(
        name: impl Into<String>,
        difficulty: Difficulty,
        seed: u64,
        config: GameConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = RngBundle::from_user_seed(seed);
        let hunter = Hunter::new(name, config.mode(difficulty).starting_gold);
        let town = found_town(&config, difficulty, &mut rng);
        let mut session = Self {
            config,
            difficulty,
            seed,
            rng,
            hunter,
            town,
            latest_news: String::new(),
            departure_news: None,
            status: SessionStatus::Playing,
            turns: 0,
            towns_visited: 0,
            brawls_won: 0,
            brawls_lost: 0,
        };
        session.arrive();
        Ok(session)
    }

    /// Top up gold and grant every item.
    pub fn enable_test_kit(&mut self) {
        self.hunter.set_gold(self.config.test_kit_gold);
        self.hunter.add_all_items();
        log::info!("test kit enabled for {}", self.hunter.name());
    }

    #[must_use]
    pub const fn hunter(&self) -> &Hunter {
        &self.hunter
    }

    #[must_use]
    pub const fn town(&self) -> &Town {
        &self.town
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn latest_news(&self) -> &str {
        &self.latest_news
    }

    /// Message from the town just left, set only on the turn of a crossing.
    #[must_use]
    pub fn departure_news(&self) -> Option<&str> {
        self.departure_news.as_deref()
    }

    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    #[must_use]
    pub const fn towns_visited(&self) -> u32 {
        self.towns_visited
    }

    #[must_use]
    pub const fn rng(&self) -> &RngBundle {
        &self.rng
    }

    /// Parse and apply one line of menu input.
    pub fn apply_input(&mut self, input: &str) -> SessionStatus {
        match Command::parse(input) {
            Some(command) => self.apply(command),
            None => {
                self.latest_news = INVALID_CHOICE.to_string();
                self.status
            }
        }
    }

    /// Play one turn.
    pub fn apply(&mut self, command: Command) -> SessionStatus {
        if self.status.is_over() {
            return self.status;
        }
        self.turns = self.turns.saturating_add(1);
        self.departure_news = None;
        log::debug!("turn {}: {command:?}", self.turns);

        match command {
            Command::Shop { mode, pick } => {
                let report = self.town.enter_shop(&mut self.hunter, mode, pick);
                self.record(report.event, report.message);
            }
            Command::Move => {
                let report = self.town.leave_town(&mut self.hunter, self.rng.crossing());
                if report.success {
                    self.departure_news = Some(report.message);
                    self.town = found_town(&self.config, self.difficulty, &mut self.rng);
                    self.arrive();
                } else {
                    self.record(report.event, report.message);
                }
            }
            Command::LookForTrouble => {
                let rng = self.rng.brawl();
                let report = self.town.look_for_trouble(&mut self.hunter, rng);
                self.record(report.event, report.message);
            }
            Command::Dig => self.dig(),
            Command::Hunt => {
                let report = self.town.hunt_for_treasure(&mut self.hunter);
                if report.success && self.hunter.has_all_treasures() {
                    log::info!("{} collected every treasure", self.hunter.name());
                }
                self.record(report.event, report.message);
            }
            Command::Exit => {
                self.latest_news = format!("Fare thee well, {}!", self.hunter.name());
                self.status = SessionStatus::Exited;
            }
        }

        self.check_end();
        self.status
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            hunter: self.hunter.name().to_string(),
            difficulty: self.difficulty,
            seed: self.seed,
            status: self.status,
            gold: self.hunter.gold(),
            turns: self.turns,
            towns_visited: self.towns_visited,
            treasures: self.hunter.treasures().to_vec(),
            kit: self.hunter.kit().collect(),
            brawls_won: self.brawls_won,
            brawls_lost: self.brawls_lost,
            has_all_treasures: self.hunter.has_all_treasures(),
        }
    }

    fn arrive(&mut self) {
        self.towns_visited = self.towns_visited.saturating_add(1);
        let report = self.town.hunter_arrives(&self.hunter);
        log::info!(
            "{} entered town #{} ({}, tough={})",
            self.hunter.name(),
            self.towns_visited,
            self.town.terrain(),
            self.town.is_tough()
        );
        self.record(report.event, report.message);
    }

    fn dig(&mut self) {
        if !self.town.is_dug_gold() && self.hunter.has_shovel() {
            let outcome = self.hunter.dig(self.rng.dig(), &self.config.dig);
            self.town.set_dug_gold();
            self.latest_news = outcome.message();
        } else if !self.hunter.has_shovel() {
            self.latest_news = NO_SHOVEL.to_string();
        } else {
            self.latest_news = ALREADY_DUG.to_string();
        }
    }

    fn record(&mut self, event: TownEvent, message: String) {
        match event {
            TownEvent::Brawl(BrawlOutcome::Yielded { .. } | BrawlOutcome::Won { .. }) => {
                self.brawls_won = self.brawls_won.saturating_add(1);
            }
            TownEvent::Brawl(BrawlOutcome::Lost { .. }) => {
                self.brawls_lost = self.brawls_lost.saturating_add(1);
            }
            _ => {}
        }
        self.latest_news = message;
    }

    fn check_end(&mut self) {
        if !self.status.is_over() && self.hunter.is_bankrupt() {
            self.status = SessionStatus::Bankrupt;
            log::info!("{} went bankrupt after {} turns", self.hunter.name(), self.turns);
        }
    }
}

fn found_town(config: &GameConfig, difficulty: Difficulty, rng: &mut RngBundle) -> Town {
    let mode = config.mode(difficulty);
    let shop = Shop::new(mode.markdown, config.shop);
    Town::generate(shop, mode.toughness, difficulty, config.town, rng.town())
}
