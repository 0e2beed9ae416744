use super::helpers::{card_entries, found};
use super::{deck_list, CmdResult, DeckDetailView, View};
use crate::compile::{compile_list_query, ListKind};
use crate::config::ArcanaConfig;
use crate::error::{NotFound, Result};
use crate::options::OptionSet;
use crate::store::EntityStore;

/// The cards of one deck. Falls back to the deck list when the deck is
/// missing.
pub fn run<S: EntityStore>(
    store: &S,
    config: &ArcanaConfig,
    deck_id: i64,
    options: &OptionSet,
) -> Result<CmdResult> {
    let Some(deck) = found(store.get_deck(deck_id))? else {
        return Ok(deck_list::run(store, config, options)?.fallback_for(NotFound::Deck(deck_id)));
    };

    let compiled = compile_list_query(store, ListKind::DeckCards(deck_id), options)?;
    let cards = store.query_cards(&compiled.query)?;

    let (page, options) = config.paginator().paginate(cards, &compiled.options);
    let page = page.try_map_items(|cards| card_entries(store, cards))?;
    let suits = store.suits_for_deck(deck_id)?;

    Ok(CmdResult::new(View::DeckDetail(DeckDetailView {
        deck,
        page,
        options,
        suits,
    })))
}
