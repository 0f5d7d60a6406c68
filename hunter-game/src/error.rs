//! Errors raised while reading player or config text into game values.
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("unknown difficulty: {0} (expected normal, hard or easy)")]
    UnknownDifficulty(String),
    #[error("unknown shop mode: {0} (expected b or s)")]
    UnknownShopMode(String),
}
