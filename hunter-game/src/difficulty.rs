//! Session-wide difficulty chosen once before the first town.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Easy,
}

impl Difficulty {
    /// Easy mode softens brawl odds and stops crossing items from breaking.
    #[must_use]
    pub const fn is_easy(self) -> bool {
        matches!(self, Self::Easy)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "n" => Ok(Self::Normal),
            "hard" | "h" => Ok(Self::Hard),
            "easy" | "e" => Ok(Self::Easy),
            other => Err(ParseError::UnknownDifficulty(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_easy_is_easy() {
        assert!(Difficulty::Easy.is_easy());
        assert!(!Difficulty::Normal.is_easy());
        assert!(!Difficulty::Hard.is_easy());
    }

    #[test]
    fn parses_names_and_initials() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("e".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }
}
