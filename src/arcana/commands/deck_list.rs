use super::{CmdResult, DeckEntry, DeckListView, View};
use crate::config::ArcanaConfig;
use crate::error::Result;
use crate::options::OptionSet;
use crate::store::EntityStore;

/// Every deck with its suits, paginated.
pub fn run<S: EntityStore>(store: &S, config: &ArcanaConfig, options: &OptionSet) -> Result<CmdResult> {
    let mut entries = Vec::new();
    for deck in store.list_decks()? {
        let suits = store.suits_for_deck(deck.id)?;
        entries.push(DeckEntry { deck, suits });
    }

    let (page, options) = config.paginator().paginate(entries, options);
    Ok(CmdResult::new(View::DeckList(DeckListView { page, options })))
}
