//! Kit items a hunter can carry, buy and sell.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Water,
    Rope,
    Machete,
    Boots,
    Horse,
    Boat,
    Shovel,
    Sword,
}

impl Item {
    /// Every item, in shop display order.
    pub const ALL: [Self; 8] = [
        Self::Water,
        Self::Rope,
        Self::Machete,
        Self::Boots,
        Self::Horse,
        Self::Boat,
        Self::Shovel,
        Self::Sword,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Rope => "rope",
            Self::Machete => "machete",
            Self::Boots => "boots",
            Self::Horse => "horse",
            Self::Boat => "boat",
            Self::Shovel => "shovel",
            Self::Sword => "sword",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Rope => "Rope",
            Self::Machete => "Machete",
            Self::Boots => "Boots",
            Self::Horse => "Horse",
            Self::Boat => "Boat",
            Self::Shovel => "Shovel",
            Self::Sword => "Sword",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Item {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|item| item.key() == wanted)
            .ok_or_else(|| ParseError::UnknownItem(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("ROPE".parse::<Item>(), Ok(Item::Rope));
        assert_eq!(" machete ".parse::<Item>(), Ok(Item::Machete));
        assert_eq!("lantern".parse::<Item>(), Err(ParseError::UnknownItem("lantern".to_string())));
    }

    #[test]
    fn keys_match_serde_names() {
        for item in Item::ALL {
            let json = serde_json::to_string(&item).unwrap();
            assert_eq!(json, format!("\"{}\"", item.key()));
        }
    }
}
