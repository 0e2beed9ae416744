//! Catalog entities.
//!
//! Everything here is owned by the entity store and treated as read-only by
//! the rest of the crate. The only per-request values are [`ThrownCard`] and
//! the layout result (see [`crate::layout`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tarot indices below this value belong to the major arcana.
pub const MAJOR_ARCANA_COUNT: u8 = 22;

/// Number of cards in a full tarot deck.
pub const TAROT_CARD_COUNT: u8 = 78;

/// Canonical suit identity, shared across decks regardless of display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SuitKind {
    Wands = 0,
    Cups = 1,
    Swords = 2,
    Pentacles = 3,
}

impl SuitKind {
    pub const ALL: [SuitKind; 4] = [
        SuitKind::Wands,
        SuitKind::Cups,
        SuitKind::Swords,
        SuitKind::Pentacles,
    ];

    pub fn as_i64(self) -> i64 {
        self as u8 as i64
    }
}

impl TryFrom<u8> for SuitKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SuitKind::Wands),
            1 => Ok(SuitKind::Cups),
            2 => Ok(SuitKind::Swords),
            3 => Ok(SuitKind::Pentacles),
            other => Err(format!("suit must be between 0 and 3, got {}", other)),
        }
    }
}

impl From<SuitKind> for u8 {
    fn from(kind: SuitKind) -> u8 {
        kind as u8
    }
}

impl fmt::Display for SuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuitKind::Wands => "Wands",
            SuitKind::Cups => "Cups",
            SuitKind::Swords => "Swords",
            SuitKind::Pentacles => "Pentacles",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningSet {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Flavor text for one tarot index within one meaning set.
///
/// `tarot_index` is not a foreign key: a meaning may exist for an index no
/// deck has a card for, and a card may have no meaning at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    pub id: i64,
    pub meaning_set_id: i64,
    pub tarot_index: u8,
    pub predictions: String,
    pub keywords: String,
    pub reversed_predictions: String,
    pub reversed_keywords: String,
}

impl Meaning {
    /// The empty meaning shown when nothing was written for a card.
    pub fn placeholder(meaning_set_id: i64, tarot_index: u8) -> Self {
        Self {
            meaning_set_id,
            tarot_index,
            ..Self::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub meaning_set_id: i64,
}

/// A deck's name for one of the four canonical suits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suit {
    pub id: i64,
    pub deck_id: i64,
    pub suit: SuitKind,
    pub name: String,
}

/// Which half of the deck a card belongs to. Minor cards carry the extra
/// fields the suit and rank filters act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "arcana", rename_all = "lowercase")]
pub enum Arcana {
    Major,
    Minor { suit_id: i64, rank: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub deck_id: i64,
    pub tarot_index: u8,
    pub title: String,
    pub caption: String,
    pub description: String,
    #[serde(flatten)]
    pub arcana: Arcana,
}

impl Card {
    pub fn is_major(&self) -> bool {
        matches!(self.arcana, Arcana::Major)
    }

    pub fn is_minor(&self) -> bool {
        !self.is_major()
    }

    pub fn suit_id(&self) -> Option<i64> {
        match self.arcana {
            Arcana::Minor { suit_id, .. } => Some(suit_id),
            Arcana::Major => None,
        }
    }

    pub fn rank(&self) -> Option<u8> {
        match self.arcana {
            Arcana::Minor { rank, .. } => Some(rank),
            Arcana::Major => None,
        }
    }

    /// "The Tower" for majors, "Three of Cups" for minors. Falls back to the
    /// bare title when the card's suit is not among `suits`.
    pub fn display_name(&self, suits: &[Suit]) -> String {
        match self.suit_id() {
            Some(suit_id) => match suits.iter().find(|s| s.id == suit_id) {
                Some(suit) => format!("{} of {}", self.title, suit.name),
                None => self.title.clone(),
            },
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub description: String,
}

/// One slot of a spread. `index` is the draw order; the coordinates are a
/// grid cell with the origin at the top left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPosition {
    pub id: i64,
    pub spread_id: i64,
    pub index: u32,
    pub x_coordinate: u32,
    pub y_coordinate: u32,
    pub title: String,
    pub description: String,
}

/// A card as it landed in a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThrownCard {
    pub card: Card,
    pub reversed: bool,
}

impl ThrownCard {
    pub fn new(card: Card, reversed: bool) -> Self {
        Self { card, reversed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minor(suit_id: i64) -> Card {
        Card {
            id: 40,
            deck_id: 1,
            tarot_index: 40,
            title: "Three".into(),
            caption: String::new(),
            description: String::new(),
            arcana: Arcana::Minor { suit_id, rank: 3 },
        }
    }

    #[test]
    fn display_name_uses_deck_suit_name() {
        let suits = vec![Suit {
            id: 7,
            deck_id: 1,
            suit: SuitKind::Cups,
            name: "Chalices".into(),
        }];
        assert_eq!(minor(7).display_name(&suits), "Three of Chalices");
        assert_eq!(minor(8).display_name(&suits), "Three");
    }

    #[test]
    fn card_json_flattens_arcana() {
        let json = serde_json::to_value(minor(7)).unwrap();
        assert_eq!(json["arcana"], "minor");
        assert_eq!(json["suit_id"], 7);
        assert_eq!(json["rank"], 3);

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back.rank(), Some(3));
    }

    #[test]
    fn suit_kind_rejects_out_of_range() {
        assert!(SuitKind::try_from(4).is_err());
        let parsed: SuitKind = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, SuitKind::Swords);
    }
}
