//! # Storage Layer
//!
//! The catalog (decks, suits, cards, meanings, spreads and their positions) is
//! owned by an external store. The core only reads from it, through the
//! [`EntityStore`] trait.
//!
//! ## What a store must provide
//!
//! - Lookups by id, failing with [`ArcanaError::NotFound`](crate::error::ArcanaError).
//! - Execution of a compiled [`Query`] over cards or spreads: filters, OR
//!   clauses, sort keys, and the position-count aggregate spreads are sized by.
//! - Min/max aggregates over tarot indices, optionally scoped to a deck.
//! - The card ↔ deck ↔ meaning set join used by keyword search.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: holds a [`Catalog`] in memory. Used by tests
//!   and as the engine behind the file store.
//! - [`fs::FileStore`]: loads the catalog from `catalog.json` in the data
//!   directory.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/arcana/
//! ├── catalog.json    # Every entity, one array per kind
//! ├── config.json     # ArcanaConfig
//! └── session.json    # Selected deck
//! ```

use crate::error::Result;
use crate::model::{Card, CardPosition, Deck, Meaning, MeaningSet, Spread, Suit, SuitKind};
use crate::query::{Field, Query, Record, TextField};
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// Every entity of the catalog, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub meaning_sets: Vec<MeaningSet>,
    pub meanings: Vec<Meaning>,
    pub decks: Vec<Deck>,
    pub suits: Vec<Suit>,
    pub cards: Vec<Card>,
    pub spreads: Vec<Spread>,
    pub positions: Vec<CardPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Min,
    Max,
}

/// Which tarot indices an aggregate runs over: those strictly below or
/// strictly above `pivot`, optionally within one deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRange {
    Below(u8),
    Above(u8),
}

impl IndexRange {
    pub fn contains(self, index: u8) -> bool {
        match self {
            IndexRange::Below(pivot) => index < pivot,
            IndexRange::Above(pivot) => index > pivot,
        }
    }
}

/// A card joined with the canonical suit of its deck suit.
#[derive(Debug, Clone)]
pub struct CardRow {
    pub card: Card,
    pub suit: Option<SuitKind>,
}

impl Record for CardRow {
    fn id(&self) -> i64 {
        self.card.id
    }

    fn number(&self, field: Field) -> Option<i64> {
        match field {
            Field::Id => Some(self.card.id),
            Field::Deck => Some(self.card.deck_id),
            Field::TarotIndex => Some(self.card.tarot_index as i64),
            Field::Suit => self.suit.map(SuitKind::as_i64),
            Field::Rank => self.card.rank().map(i64::from),
            Field::Size => None,
        }
    }

    fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Title => Some(&self.card.title),
            TextField::Caption => Some(&self.card.caption),
            TextField::Description => Some(&self.card.description),
        }
    }

    fn is_minor(&self) -> bool {
        self.card.is_minor()
    }
}

/// A spread annotated with its number of positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpreadRow {
    pub spread: Spread,
    pub size: usize,
}

impl Record for SpreadRow {
    fn id(&self) -> i64 {
        self.spread.id
    }

    fn number(&self, field: Field) -> Option<i64> {
        match field {
            Field::Id => Some(self.spread.id),
            Field::Size => Some(self.size as i64),
            _ => None,
        }
    }

    fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Title => Some(&self.spread.title),
            TextField::Description => Some(&self.spread.description),
            TextField::Caption => None,
        }
    }
}

/// Read-only access to the tarot catalog.
pub trait EntityStore {
    fn list_decks(&self) -> Result<Vec<Deck>>;

    fn get_deck(&self, id: i64) -> Result<Deck>;

    /// Suits of one deck, ordered by canonical suit.
    fn suits_for_deck(&self, deck_id: i64) -> Result<Vec<Suit>>;

    fn get_card_by_id(&self, id: i64) -> Result<Card>;

    /// The card holding `tarot_index` in `deck_id`.
    fn get_card(&self, deck_id: i64, tarot_index: i64) -> Result<Card>;

    /// All cards, ordered by id.
    fn list_cards(&self) -> Result<Vec<Card>>;

    fn query_cards(&self, query: &Query) -> Result<Vec<Card>>;

    /// Min or max tarot index within `range`, `None` when nothing qualifies.
    fn tarot_index_aggregate(
        &self,
        deck_id: Option<i64>,
        range: IndexRange,
        aggregate: Aggregate,
    ) -> Result<Option<u8>>;

    /// Meanings whose keywords contain `term`, case-insensitively, ordered by
    /// meaning set.
    fn meanings_with_keyword(&self, term: &str) -> Result<Vec<Meaning>>;

    /// Ids of the cards with `tarot_index` whose deck uses `meaning_set_id`.
    fn card_ids_for_meaning(&self, tarot_index: u8, meaning_set_id: i64) -> Result<Vec<i64>>;

    /// Zero-or-one lookup; the first match wins if the catalog holds duplicates.
    fn find_meaning(&self, meaning_set_id: i64, tarot_index: u8) -> Result<Option<Meaning>>;

    /// Meanings for one tarot index across every meaning set.
    fn meanings_for_index(&self, tarot_index: u8) -> Result<Vec<Meaning>>;

    fn list_spreads(&self) -> Result<Vec<Spread>>;

    fn get_spread(&self, id: i64) -> Result<Spread>;

    /// Positions of a spread in draw order.
    fn positions_for_spread(&self, spread_id: i64) -> Result<Vec<CardPosition>>;

    fn query_spreads(&self, query: &Query) -> Result<Vec<SpreadRow>>;
}
