//! A reading: a spread laid out with cards from one deck.
//!
//! Without a `cards` option the cards are dealt at random, so every run is
//! a new reading. With one, the save-string is replayed. A save-string that
//! does not fit the spread and deck yields the page with an error and no
//! cards rather than a failure.

use super::helpers::{deck_links, found};
use super::{deck_list, spread_list, CmdMessage, CmdResult, NavLink, Placement, ReadingView, View};
use crate::codec::{decode_reading, encode_reading};
use crate::config::ArcanaConfig;
use crate::draw::draw_reading;
use crate::error::{ArcanaError, NotFound, Result};
use crate::layout::{compute_layout, max_coordinates};
use crate::model::{Card, Deck};
use crate::options::{OptionKey, OptionSet};
use crate::query::{Cmp, Field, Query};
use crate::store::EntityStore;
use rand::Rng;

pub fn run<S: EntityStore, R: Rng + ?Sized>(
    store: &S,
    config: &ArcanaConfig,
    spread_id: i64,
    deck_id: i64,
    options: &OptionSet,
    session_deck: Option<i64>,
    rng: &mut R,
) -> Result<CmdResult> {
    let Some(spread) = found(store.get_spread(spread_id))? else {
        return Ok(spread_list::run(store, config, options, session_deck)?
            .fallback_for(NotFound::Spread(spread_id)));
    };
    let Some(deck) = found(store.get_deck(deck_id))? else {
        return Ok(deck_list::run(store, config, options)?.fallback_for(NotFound::Deck(deck_id)));
    };

    let positions = store.positions_for_spread(spread.id)?;
    let (max_x, max_y) = max_coordinates(&positions);
    let layout = compute_layout(&positions, max_x, max_y, &config.layout);

    let mut messages = Vec::new();
    let (thrown, error) = match options.get(OptionKey::Cards.as_str()) {
        Some(encoded) => match decode_reading(store, encoded, positions.len(), deck.id) {
            Ok(thrown) => (thrown, None),
            Err(e @ (ArcanaError::Format(_) | ArcanaError::NotFound(_))) => {
                tracing::warn!(spread = spread.id, deck = deck.id, error = %e, "saved reading rejected");
                let message = format!("Problem loading saved reading. {}", e);
                messages.push(CmdMessage::error(message.clone()));
                (Vec::new(), Some(message))
            }
            Err(e) => return Err(e),
        },
        None => {
            let cards = deck_cards(store, deck.id)?;
            if cards.len() < positions.len() {
                messages.push(CmdMessage::warning(format!(
                    "{} has {} cards, fewer than the {} positions of {}",
                    deck.name,
                    cards.len(),
                    positions.len(),
                    spread.title
                )));
            }
            (draw_reading(&cards, positions.len(), rng, config.reversal_chance), None)
        }
    };

    let save_string = error.is_none().then(|| encode_reading(&thrown, &positions));
    let suits = store.suits_for_deck(deck.id)?;
    let placements = positions
        .iter()
        .zip(&thrown)
        .zip(&layout.offsets)
        .map(|((position, thrown), offset)| Placement {
            position: position.clone(),
            name: thrown.card.display_name(&suits),
            thrown: thrown.clone(),
            offset: *offset,
        })
        .collect();

    let session_deck = session_link(store, session_deck.unwrap_or(config.default_deck_id))?;

    let mut result = CmdResult::new(View::Reading(Box::new(ReadingView {
        layout,
        placements,
        save_string,
        error,
        decks: deck_links(&sorted_decks(store)?),
        spreads: spread_links(store)?,
        session_deck,
        spread,
        deck,
    })));
    for message in messages {
        result.add_message(message);
    }
    Ok(result)
}

fn deck_cards<S: EntityStore>(store: &S, deck_id: i64) -> Result<Vec<Card>> {
    let mut query = Query::new();
    query.filter(Field::Deck, Cmp::Eq, deck_id);
    store.query_cards(&query)
}

fn sorted_decks<S: EntityStore>(store: &S) -> Result<Vec<Deck>> {
    let mut decks = store.list_decks()?;
    decks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(decks)
}

fn spread_links<S: EntityStore>(store: &S) -> Result<Vec<NavLink>> {
    let mut spreads = store.list_spreads()?;
    spreads.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(spreads
        .into_iter()
        .map(|s| NavLink {
            id: s.id,
            name: s.title,
        })
        .collect())
}

/// The session's deck, named. A remembered deck that has since vanished
/// keeps its id with an empty name.
fn session_link<S: EntityStore>(store: &S, deck_id: i64) -> Result<NavLink> {
    let name = found(store.get_deck(deck_id))?
        .map(|d| d.name)
        .unwrap_or_default();
    Ok(NavLink { id: deck_id, name })
}
