use super::helpers::{card_entry, card_nav, found, related_cards};
use super::{deck_detail, CardDetailView, CmdResult, View};
use crate::adjacency::nearest_neighbors;
use crate::config::ArcanaConfig;
use crate::error::{NotFound, Result};
use crate::model::Meaning;
use crate::options::OptionSet;
use crate::store::EntityStore;

/// One card of one deck, with its meaning and neighbors in the deck.
///
/// Falls back to the deck's card list when the deck has no card at
/// `tarot_index`; a missing meaning shows as a placeholder.
pub fn run<S: EntityStore>(
    store: &S,
    config: &ArcanaConfig,
    deck_id: i64,
    tarot_index: i64,
    options: &OptionSet,
) -> Result<CmdResult> {
    let Some(card) = found(store.get_card(deck_id, tarot_index))? else {
        return Ok(deck_detail::run(store, config, deck_id, options)?
            .fallback_for(NotFound::Card { deck_id, tarot_index }));
    };
    let index = card.tarot_index;

    let meaning = match found(store.get_deck(deck_id))? {
        Some(deck) => store
            .find_meaning(deck.meaning_set_id, index)?
            .unwrap_or_else(|| Meaning::placeholder(deck.meaning_set_id, index)),
        None => Meaning::placeholder(0, index),
    };

    Ok(CmdResult::new(View::CardDetail(Box::new(CardDetailView {
        card: card_entry(store, card)?,
        meaning,
        neighbors: nearest_neighbors(store, index, Some(deck_id))?,
        nav: card_nav(store, deck_id)?,
        related: related_cards(store, index)?,
    }))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::Neighbors;

    use crate::store::memory::fixtures::StoreFixture;

    fn detail(deck_id: i64, tarot_index: i64) -> CmdResult {
        let store = StoreFixture::sample().store;
        run(&store, &ArcanaConfig::default(), deck_id, tarot_index, &OptionSet::new()).unwrap()
    }

    #[test]
    fn shows_card_with_meaning_and_neighbors() {
        let result = detail(1, 38);
        let View::CardDetail(v) = result.view else {
            panic!("expected card detail");
        };
        assert_eq!(v.card.name, "Three of Cups");
        assert_eq!(v.meaning.keywords, "celebration, friendship");
        assert_eq!(v.neighbors, Neighbors { previous: 22, next: 43 });
        let related: Vec<&str> = v.related.iter().map(|r| r.deck_name.as_str()).collect();
        assert_eq!(related, vec!["Rider", "Thoth"]);
    }

    #[test]
    fn meaning_follows_the_decks_meaning_set() {
        let View::CardDetail(v) = detail(2, 38).view else {
            panic!("expected card detail");
        };
        assert_eq!(v.meaning.keywords, "abundance, friendship");
    }

    #[test]
    fn missing_meaning_is_a_placeholder() {
        let View::CardDetail(v) = detail(1, 21).view else {
            panic!("expected card detail");
        };
        assert!(v.meaning.is_placeholder());
        assert_eq!(v.meaning.tarot_index, 21);
        assert_eq!(v.neighbors, Neighbors { previous: 1, next: 22 });
    }

    #[test]
    fn last_card_wraps_to_first() {
        let View::CardDetail(v) = detail(1, 77).view else {
            panic!("expected card detail");
        };
        assert_eq!(v.neighbors, Neighbors { previous: 59, next: 0 });
    }

    #[test]
    fn card_missing_from_deck_falls_back_to_deck() {
        let result = detail(2, 21);
        assert!(matches!(result.view, View::DeckDetail(_)));
        assert_eq!(
            result.missing,
            Some(NotFound::Card {
                deck_id: 2,
                tarot_index: 21
            })
        );
    }

    #[test]
    fn missing_deck_falls_through_to_deck_list() {
        let result = detail(9, 0);
        assert!(matches!(result.view, View::DeckList(_)));
        assert_eq!(result.messages.len(), 2);
    }
}
