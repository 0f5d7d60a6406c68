//! Collectible treasures, one seeded per town.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rng::{RandomSource, roll_index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Treasure {
    Crown,
    Trophy,
    Gem,
    Dust,
}

/// Full treasure table; dust sits last.
pub const TREASURE_TABLE: [Treasure; 4] = [
    Treasure::Crown,
    Treasure::Trophy,
    Treasure::Gem,
    Treasure::Dust,
];

/// The town draw only indexes this many entries of [`TREASURE_TABLE`], so dust
/// is never seeded as a town's treasure.
pub const SEEDABLE_TREASURES: usize = 3;

impl Treasure {
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Crown => "a crown",
            Self::Trophy => "a trophy",
            Self::Gem => "a gem",
            Self::Dust => "dust",
        }
    }

    /// Whether this treasure counts towards a full collection.
    #[must_use]
    pub const fn is_collectible(self) -> bool {
        !matches!(self, Self::Dust)
    }
}

impl fmt::Display for Treasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

pub fn draw_town_treasure<R: RandomSource + ?Sized>(rng: &mut R) -> Treasure {
    let idx = roll_index(rng, SEEDABLE_TREASURES);
    let treasure = TREASURE_TABLE[idx];
    log::debug!("treasure roll {idx} -> {treasure}");
    treasure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;

    #[test]
    fn draw_never_reaches_dust() {
        let mut rolls = ScriptedRolls::new([0.0, 0.34, 0.67, 0.999_999, 1.0]);
        let drawn: Vec<Treasure> = (0..5).map(|_| draw_town_treasure(&mut rolls)).collect();
        assert_eq!(
            drawn,
            vec![
                Treasure::Crown,
                Treasure::Trophy,
                Treasure::Gem,
                Treasure::Gem,
                Treasure::Gem
            ]
        );
    }

    #[test]
    fn phrases_read_naturally() {
        assert_eq!(Treasure::Crown.to_string(), "a crown");
        assert_eq!(Treasure::Dust.to_string(), "dust");
        assert!(!Treasure::Dust.is_collectible());
    }
}
