use std::fmt;

use clap::ValueEnum;
use hunter_game::{Command, GameSession, Item, ShopMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::report::TurnLog;

/// Policy interface for automated play.
pub trait PlayerPolicy {
    /// Name used for logging and reports.
    fn name(&self) -> &'static str;

    /// Pick the next command for the current turn.
    fn pick_command(&mut self, session: &GameSession) -> Command;
}

/// Built-in autoplay strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayStrategy {
    /// Searches every town, buys what it needs and moves on.
    Explorer,
    /// Picks menu options at random.
    Reckless,
}

impl AutoplayStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Explorer => "Explorer",
            Self::Reckless => "Reckless",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy> {
        match self {
            Self::Explorer => Box::new(ExplorerPolicy::new(seed)),
            Self::Reckless => Box::new(RecklessPolicy::new(seed)),
        }
    }
}

impl fmt::Display for AutoplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct ExplorerPolicy {
    rng: ChaCha20Rng,
}

impl ExplorerPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn affordable(session: &GameSession, item: Item, reserve: i32) -> bool {
        let hunter = session.hunter();
        !hunter.has_item_in_kit(item)
            && hunter.gold() - session.town().shop().buy_price(item) >= reserve
    }
}

const fn buy(item: Item) -> Command {
    Command::Shop {
        mode: ShopMode::Buy,
        pick: Some(item),
    }
}

impl PlayerPolicy for ExplorerPolicy {
    fn name(&self) -> &'static str {
        "Explorer"
    }

    fn pick_command(&mut self, session: &GameSession) -> Command {
        let town = session.town();
        let hunter = session.hunter();
        if !town.is_searched() {
            return Command::Hunt;
        }
        if hunter.has_shovel() && !town.is_dug_gold() {
            return Command::Dig;
        }

        let required = town.terrain().required_item();
        if !hunter.has_item_in_kit(required) {
            return if Self::affordable(session, required, 0) {
                buy(required)
            } else {
                Command::LookForTrouble
            };
        }
        for item in [Item::Sword, Item::Shovel] {
            if Self::affordable(session, item, 5) {
                return buy(item);
            }
        }

        if self.rng.gen_bool(0.7) {
            Command::Move
        } else {
            Command::LookForTrouble
        }
    }
}

struct RecklessPolicy {
    rng: ChaCha20Rng,
}

impl RecklessPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn random_item(&mut self) -> Item {
        Item::ALL[self.rng.gen_range(0..Item::ALL.len())]
    }
}

impl PlayerPolicy for RecklessPolicy {
    fn name(&self) -> &'static str {
        "Reckless"
    }

    fn pick_command(&mut self, _session: &GameSession) -> Command {
        match self.rng.gen_range(0..6) {
            0 => buy(self.random_item()),
            1 => Command::Shop {
                mode: ShopMode::Sell,
                pick: Some(self.random_item()),
            },
            2 => Command::Move,
            3 => Command::Dig,
            4 => Command::Hunt,
            _ => Command::LookForTrouble,
        }
    }
}

/// Play until the session ends or `max_turns` commands have been applied.
pub fn run_autoplay(
    session: &mut GameSession,
    policy: &mut dyn PlayerPolicy,
    max_turns: u32,
) -> Vec<TurnLog> {
    let mut entries = Vec::new();
    for _ in 0..max_turns {
        let command = policy.pick_command(session);
        let status = session.apply(command);
        log::debug!("{} chose {command:?} -> {status}", policy.name());
        entries.push(TurnLog {
            turn: session.turns(),
            command,
            departure: session.departure_news().map(str::to_string),
            news: session.latest_news().to_string(),
            gold: session.hunter().gold(),
        });
        if status.is_over() {
            break;
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_game::{Difficulty, GameConfig, SessionStatus};

    fn session(seed: u64) -> GameSession {
        GameSession::new("Auto", Difficulty::Normal, seed, GameConfig::default()).unwrap()
    }

    #[test]
    fn explorer_searches_before_anything_else() {
        let game = session(1);
        let mut policy = AutoplayStrategy::Explorer.create_policy(1);
        assert_eq!(policy.pick_command(&game), Command::Hunt);
    }

    #[test]
    fn autoplay_respects_turn_limit() {
        let mut game = session(5);
        let mut policy = AutoplayStrategy::Reckless.create_policy(5);
        let log = run_autoplay(&mut game, policy.as_mut(), 12);
        assert!(log.len() <= 12);
        assert_eq!(log.len(), usize::try_from(game.turns()).unwrap());
        if log.len() < 12 {
            assert!(game.status().is_over());
        }
    }

    #[test]
    fn autoplay_is_deterministic_per_seed() {
        let run = |seed| {
            let mut game = session(seed);
            let mut policy = AutoplayStrategy::Explorer.create_policy(seed);
            let log = run_autoplay(&mut game, policy.as_mut(), 60);
            (log, game.summary())
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn stops_once_session_is_over() {
        let mut game = session(3);
        game.apply(Command::Exit);
        let mut policy = AutoplayStrategy::Reckless.create_policy(3);
        let log = run_autoplay(&mut game, policy.as_mut(), 10);
        assert_eq!(log.len(), 1);
        assert_eq!(game.status(), SessionStatus::Exited);
        assert_eq!(game.turns(), 1);
    }
}
