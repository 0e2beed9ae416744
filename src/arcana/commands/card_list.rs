use super::helpers::{card_entries, deck_links};
use super::{CardListView, CmdResult, View};
use crate::compile::{compile_list_query, ListKind};
use crate::config::ArcanaConfig;
use crate::error::Result;
use crate::options::OptionSet;
use crate::store::EntityStore;

/// All cards across decks, filtered, sorted and paginated by `options`.
pub fn run<S: EntityStore>(store: &S, config: &ArcanaConfig, options: &OptionSet) -> Result<CmdResult> {
    let compiled = compile_list_query(store, ListKind::Cards, options)?;
    let cards = store.query_cards(&compiled.query)?;

    let (page, options) = config.paginator().paginate(cards, &compiled.options);
    let page = page.try_map_items(|cards| card_entries(store, cards))?;

    let decks = store.list_decks()?;
    let suits = match decks.first() {
        Some(first) => store.suits_for_deck(first.id)?,
        None => Vec::new(),
    };

    Ok(CmdResult::new(View::CardList(CardListView {
        page,
        options,
        decks: deck_links(&decks),
        suits,
    })))
}
