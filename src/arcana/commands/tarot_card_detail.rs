use super::helpers::{card_entries, card_nav, cards_at_index, related_cards};
use super::{card_list, CmdResult, TarotCardDetailView, View};
use crate::adjacency::nearest_neighbors;
use crate::config::ArcanaConfig;
use crate::error::{NotFound, Result};
use crate::model::Meaning;
use crate::options::OptionSet;
use crate::store::EntityStore;

/// Every deck's card at one tarot index.
///
/// Neighbors span all decks. The side menu shows the configured default
/// deck. Falls back to the full card list when no deck has the index.
pub fn run<S: EntityStore>(
    store: &S,
    config: &ArcanaConfig,
    tarot_index: i64,
    options: &OptionSet,
) -> Result<CmdResult> {
    let cards = match u8::try_from(tarot_index) {
        Ok(index) => cards_at_index(store, index)?,
        Err(_) => Vec::new(),
    };
    let Some(index) = cards.first().map(|c| c.tarot_index) else {
        return Ok(card_list::run(store, config, options)?.fallback_for(NotFound::TarotIndex(tarot_index)));
    };

    let meaning = store
        .meanings_for_index(index)?
        .into_iter()
        .next()
        .unwrap_or_else(|| Meaning::placeholder(0, index));

    let (page, options) = config.paginator().paginate(cards, options);
    let page = page.try_map_items(|cards| card_entries(store, cards))?;

    Ok(CmdResult::new(View::TarotCardDetail(Box::new(TarotCardDetailView {
        tarot_index: index,
        page,
        options,
        meaning,
        neighbors: nearest_neighbors(store, index, None)?,
        nav: card_nav(store, config.default_deck_id)?,
        related: related_cards(store, index)?,
    }))))
}
