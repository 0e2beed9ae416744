//! Reading settings and the random reading shortcut. Both resolve to a
//! [`ReadingTarget`] rather than a page: the caller opens the reading.

use super::helpers::found;
use super::{deck_list, spread_list, CmdMessage, CmdResult, ReadingTarget, View};
use crate::config::ArcanaConfig;
use crate::draw::pick;
use crate::error::Result;
use crate::options::{validate_integer, OptionKey, OptionSet};
use crate::store::EntityStore;
use rand::Rng;

/// Picks the deck for readings of `spread_id` from the `deck` option.
///
/// A missing or non-integer `deck` means the default deck. The choice is
/// only remembered for the session when the deck exists; the target uses it
/// either way.
pub fn update_reading_settings<S: EntityStore>(
    store: &S,
    config: &ArcanaConfig,
    spread_id: i64,
    options: &OptionSet,
) -> Result<CmdResult> {
    let deck_id = validate_integer(options, OptionKey::Deck.as_str())
        .value
        .unwrap_or(config.default_deck_id);

    let session_deck = found(store.get_deck(deck_id))?.map(|deck| deck.id);
    let mut result = CmdResult::new(View::ReadingTarget(ReadingTarget {
        spread_id,
        deck_id,
        session_deck,
    }));
    match session_deck {
        Some(_) => result.add_message(CmdMessage::success(format!(
            "Readings will use deck {}",
            deck_id
        ))),
        None => tracing::debug!(deck = deck_id, "not remembering unknown deck"),
    }
    Ok(result)
}

/// A reading of a random spread with a random deck.
pub fn random_reading<S: EntityStore, R: Rng + ?Sized>(
    store: &S,
    config: &ArcanaConfig,
    rng: &mut R,
) -> Result<CmdResult> {
    let decks = store.list_decks()?;
    let Some(deck) = pick(&decks, rng) else {
        return Ok(deck_list::run(store, config, &OptionSet::new())?
            .with_message(CmdMessage::warning("There are no decks to read with")));
    };

    let spreads = store.list_spreads()?;
    let Some(spread) = pick(&spreads, rng) else {
        return Ok(spread_list::run(store, config, &OptionSet::new(), None)?
            .with_message(CmdMessage::warning("There are no spreads to read")));
    };

    Ok(CmdResult::new(View::ReadingTarget(ReadingTarget {
        spread_id: spread.id,
        deck_id: deck.id,
        session_deck: None,
    })))
}
