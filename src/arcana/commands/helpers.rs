use super::{CardEntry, CardNav, NavLink, RelatedCard};
use crate::error::{ArcanaError, Result};
use crate::model::{Card, Deck, Suit};
use crate::query::{Cmp, Field, Query};
use crate::store::EntityStore;
use std::collections::BTreeMap;

/// Turns a not-found lookup into `None`, keeping every other error.
pub fn found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ArcanaError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Attaches display names to `cards`, looking up each deck and its suits
/// once.
pub fn card_entries<S: EntityStore>(store: &S, cards: Vec<Card>) -> Result<Vec<CardEntry>> {
    let mut decks: BTreeMap<i64, (String, Vec<Suit>)> = BTreeMap::new();
    let mut entries = Vec::with_capacity(cards.len());

    for card in cards {
        if !decks.contains_key(&card.deck_id) {
            let name = found(store.get_deck(card.deck_id))?
                .map(|d| d.name)
                .unwrap_or_default();
            let suits = store.suits_for_deck(card.deck_id)?;
            decks.insert(card.deck_id, (name, suits));
        }
        let (deck_name, suits) = &decks[&card.deck_id];
        entries.push(CardEntry {
            name: card.display_name(suits),
            deck_name: deck_name.clone(),
            card,
        });
    }

    Ok(entries)
}

pub fn card_entry<S: EntityStore>(store: &S, card: Card) -> Result<CardEntry> {
    let mut entries = card_entries(store, vec![card])?;
    entries
        .pop()
        .ok_or_else(|| ArcanaError::Store("card entry lost".to_string()))
}

/// Cards holding `tarot_index`, one per deck, ordered by deck.
pub fn cards_at_index<S: EntityStore>(store: &S, tarot_index: u8) -> Result<Vec<Card>> {
    let mut query = Query::new();
    query.filter(Field::TarotIndex, Cmp::Eq, tarot_index as i64);
    query.sort = vec![Field::Deck];
    store.query_cards(&query)
}

pub fn related_cards<S: EntityStore>(store: &S, tarot_index: u8) -> Result<Vec<RelatedCard>> {
    let mut related = Vec::new();
    for card in cards_at_index(store, tarot_index)? {
        if let Some(deck) = found(store.get_deck(card.deck_id))? {
            related.push(RelatedCard {
                deck_id: deck.id,
                deck_name: deck.name,
            });
        }
    }
    Ok(related)
}

/// The card menu for `deck_id`. Empty when the deck does not exist.
pub fn card_nav<S: EntityStore>(store: &S, deck_id: i64) -> Result<CardNav> {
    let mut query = Query::new();
    query.filter(Field::Deck, Cmp::Eq, deck_id);
    query.sort = vec![Field::TarotIndex];
    let cards = store.query_cards(&query)?;

    let (majors, mut minors): (Vec<Card>, Vec<Card>) =
        cards.into_iter().partition(Card::is_major);
    minors.sort_by_key(|c| (c.suit_id(), c.tarot_index));

    let empty_suits = store
        .suits_for_deck(deck_id)?
        .into_iter()
        .filter(|suit| !minors.iter().any(|c| c.suit_id() == Some(suit.id)))
        .collect();

    Ok(CardNav {
        first_major: majors.first().map(|c| c.tarot_index),
        first_minor: minors.first().map(|c| c.tarot_index),
        majors,
        minors,
        empty_suits,
    })
}

pub fn deck_links(decks: &[Deck]) -> Vec<NavLink> {
    decks
        .iter()
        .map(|d| NavLink {
            id: d.id,
            name: d.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotFound;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn found_only_swallows_not_found() {
        assert_eq!(found(Ok(3)).unwrap(), Some(3));
        let missing: Result<i32> = Err(ArcanaError::NotFound(NotFound::Deck(9)));
        assert_eq!(found(missing).unwrap(), None);
        let broken: Result<i32> = Err(ArcanaError::Store("disk".into()));
        assert!(found(broken).is_err());
    }

    #[test]
    fn entries_use_deck_suit_names() {
        let store = StoreFixture::sample().store;
        let cards = vec![
            store.get_card_by_id(10).unwrap(),
            store.get_card_by_id(8).unwrap(),
            store.get_card_by_id(1).unwrap(),
        ];
        let entries = card_entries(&store, cards).unwrap();
        let names: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.deck_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Three of Chalices", "Thoth"),
                ("King of Coins", "Rider"),
                ("The Fool", "Rider"),
            ]
        );
    }

    #[test]
    fn nav_splits_majors_and_minors() {
        let store = StoreFixture::sample().store;
        let nav = card_nav(&store, 1).unwrap();

        let majors: Vec<u8> = nav.majors.iter().map(|c| c.tarot_index).collect();
        assert_eq!(majors, vec![0, 1, 21]);
        assert_eq!(nav.minors.len(), 5);
        assert_eq!(nav.first_major, Some(0));
        assert_eq!(nav.first_minor, Some(22));
        assert!(nav.empty_suits.is_empty());
    }

    #[test]
    fn nav_reports_empty_suits() {
        let store = StoreFixture::sample().store;
        // Thoth has Chalices cards but no Blades.
        let nav = card_nav(&store, 2).unwrap();
        let empty: Vec<&str> = nav.empty_suits.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(empty, vec!["Blades"]);

        let nav = card_nav(&store, 3).unwrap();
        assert_eq!(nav.first_minor, None);
    }

    #[test]
    fn related_cards_span_decks() {
        let store = StoreFixture::sample().store;
        let related = related_cards(&store, 0).unwrap();
        let decks: Vec<i64> = related.iter().map(|r| r.deck_id).collect();
        assert_eq!(decks, vec![1, 2]);
    }
}
