use std::fmt;
use thiserror::Error;

/// The kind of entity a lookup failed to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    Deck(i64),
    Spread(i64),
    Card { deck_id: i64, tarot_index: i64 },
    CardId(i64),
    TarotIndex(i64),
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::Deck(id) => write!(f, "deck {}", id),
            NotFound::Spread(id) => write!(f, "spread {}", id),
            NotFound::Card {
                deck_id,
                tarot_index,
            } => write!(f, "card {} in deck {}", tarot_index, deck_id),
            NotFound::CardId(id) => write!(f, "card {}", id),
            NotFound::TarotIndex(idx) => write!(f, "cards with tarot index {}", idx),
        }
    }
}

#[derive(Error, Debug)]
pub enum ArcanaError {
    /// A reading save-string that cannot be parsed.
    #[error("Format error: {0}")]
    Format(String),

    #[error("Not found: {0}")]
    NotFound(NotFound),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ArcanaError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArcanaError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ArcanaError>;
