//! Terrain surrounding a town and the item needed to cross it.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::items::Item;
use crate::rng::{RandomSource, roll_die};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Mountains,
    Ocean,
    Plains,
    Desert,
    Jungle,
    Marsh,
}

impl TerrainKind {
    /// Ordered by the die face that selects them.
    pub const ALL: [Self; 6] = [
        Self::Mountains,
        Self::Ocean,
        Self::Plains,
        Self::Desert,
        Self::Jungle,
        Self::Marsh,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mountains => "Mountains",
            Self::Ocean => "Ocean",
            Self::Plains => "Plains",
            Self::Desert => "Desert",
            Self::Jungle => "Jungle",
            Self::Marsh => "Marsh",
        }
    }

    #[must_use]
    pub const fn required_item(self) -> Item {
        match self {
            Self::Mountains => Item::Rope,
            Self::Ocean => Item::Boat,
            Self::Plains => Item::Horse,
            Self::Desert => Item::Water,
            Self::Jungle => Item::Machete,
            Self::Marsh => Item::Boots,
        }
    }

    const fn from_face(face: i32) -> Self {
        match face {
            1 => Self::Mountains,
            2 => Self::Ocean,
            3 => Self::Plains,
            4 => Self::Desert,
            5 => Self::Jungle,
            _ => Self::Marsh,
        }
    }
}

/// Immutable crossing requirement fixed when a town is founded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terrain {
    kind: TerrainKind,
}

impl Terrain {
    #[must_use]
    pub const fn new(kind: TerrainKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub const fn required_item(&self) -> Item {
        self.kind.required_item()
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick one of the six terrains with a single d6 roll.
pub fn generate_terrain<R: RandomSource + ?Sized>(rng: &mut R) -> Terrain {
    let face = roll_die(rng, 6);
    let terrain = Terrain::new(TerrainKind::from_face(face));
    log::debug!("terrain roll {face} -> {}", terrain.name());
    terrain
}
