//! # Adjacency Finder
//!
//! Tarot indices are dense in a full deck but a catalog may hold partial
//! decks, so "previous card" and "next card" are the nearest occupied indices
//! on either side. The walk wraps: the last card's next is the first card,
//! and a deck with a single card is its own neighbor both ways.

use crate::error::Result;
use crate::store::{Aggregate, EntityStore, IndexRange};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub previous: u8,
    pub next: u8,
}

/// Nearest occupied indices around `tarot_index`, within `deck_id` when
/// given and across every deck otherwise.
pub fn nearest_neighbors<S: EntityStore>(
    store: &S,
    tarot_index: u8,
    deck_id: Option<i64>,
) -> Result<Neighbors> {
    let below = IndexRange::Below(tarot_index);
    let above = IndexRange::Above(tarot_index);

    let previous = match store.tarot_index_aggregate(deck_id, below, Aggregate::Max)? {
        Some(index) => index,
        None => store
            .tarot_index_aggregate(deck_id, above, Aggregate::Max)?
            .unwrap_or(tarot_index),
    };

    let next = match store.tarot_index_aggregate(deck_id, above, Aggregate::Min)? {
        Some(index) => index,
        None => store
            .tarot_index_aggregate(deck_id, below, Aggregate::Min)?
            .unwrap_or(tarot_index),
    };

    Ok(Neighbors { previous, next })
}
