//! Trading counter found in every town.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::PriceList;
use crate::error::ParseError;
use crate::hunter::Hunter;
use crate::items::Item;
use crate::numbers::floor_f64_to_i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopMode {
    Buy,
    Sell,
}

impl fmt::Display for ShopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("buy"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for ShopMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "buy" => Ok(Self::Buy),
            "s" | "sell" => Ok(Self::Sell),
            other => Err(ParseError::UnknownShopMode(other.to_string())),
        }
    }
}

/// Reasons a trade is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("You already have a {0}.")]
    AlreadyOwned(Item),
    #[error("A {item} costs {cost} gold and you only have {gold}.")]
    InsufficientGold { item: Item, cost: i32, gold: i32 },
    #[error("You don't have a {0} to sell.")]
    NotOwned(Item),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    markdown: f64,
    prices: PriceList,
}

impl Shop {
    #[must_use]
    pub const fn new(markdown: f64, prices: PriceList) -> Self {
        Self { markdown, prices }
    }

    #[must_use]
    pub const fn markdown(&self) -> f64 {
        self.markdown
    }

    #[must_use]
    pub const fn buy_price(&self, item: Item) -> i32 {
        self.prices.cost(item)
    }

    /// What the shop pays back, rounded down.
    #[must_use]
    pub fn sell_price(&self, item: Item) -> i32 {
        floor_f64_to_i32(f64::from(self.prices.cost(item)) * self.markdown)
    }

    /// Price list for the given counter.
    #[must_use]
    pub fn listing(&self, mode: ShopMode) -> Vec<(Item, i32)> {
        Item::ALL
            .into_iter()
            .map(|item| match mode {
                ShopMode::Buy => (item, self.buy_price(item)),
                ShopMode::Sell => (item, self.sell_price(item)),
            })
            .collect()
    }

    /// Sell an item to the hunter, returning the gold spent.
    ///
    /// # Errors
    ///
    /// Returns an error if the hunter already owns the item or cannot afford it.
    pub fn buy(&self, hunter: &mut Hunter, item: Item) -> Result<i32, ShopError> {
        if hunter.has_item_in_kit(item) {
            return Err(ShopError::AlreadyOwned(item));
        }
        let cost = self.buy_price(item);
        if hunter.gold() < cost {
            return Err(ShopError::InsufficientGold {
                item,
                cost,
                gold: hunter.gold(),
            });
        }
        hunter.change_gold(-cost);
        hunter.add_item_to_kit(item);
        Ok(cost)
    }

    /// Buy an item back from the hunter, returning the gold paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the hunter does not carry the item.
    pub fn sell(&self, hunter: &mut Hunter, item: Item) -> Result<i32, ShopError> {
        if !hunter.remove_item_from_kit(item) {
            return Err(ShopError::NotOwned(item));
        }
        let paid = self.sell_price(item);
        hunter.change_gold(paid);
        Ok(paid)
    }

    /// Run one visit. `None` for `pick` means the hunter walked out without
    /// trading, and no shop message is produced.
    pub fn enter(&self, hunter: &mut Hunter, mode: ShopMode, pick: Option<Item>) -> Option<String> {
        let item = pick?;
        let message = match mode {
            ShopMode::Buy => self.buy(hunter, item).map(|cost| {
                format!("Ye' got yerself a {item} for {cost} gold. Come again soon.")
            }),
            ShopMode::Sell => self
                .sell(hunter, item)
                .map(|paid| format!("You sold your {item} for {paid} gold.")),
        };
        log::debug!("shop {mode} {item}: {message:?}");
        Some(message.unwrap_or_else(|err| err.to_string()))
    }
}
