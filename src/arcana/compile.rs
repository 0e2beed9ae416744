//! # Filter/Sort Compiler
//!
//! Turns a raw [`OptionSet`] into a [`Query`] plus the *effective* option set,
//! i.e. what the list view should show as selected and carry into its links.
//!
//! ## Recognized options
//!
//! | option     | values                     | effect                                   |
//! |------------|----------------------------|------------------------------------------|
//! | `deck`     | integer                    | `deck == n`                              |
//! | `cards`    | `majors`, `minors`         | `tarot_index < 22` / `tarot_index > 21`  |
//! | `suit`     | integer (minors only)      | canonical suit `== n`                    |
//! | `rank`     | `acefive`, `fiveten`, `court` (minors only) | rank ranges             |
//! | `order_by` | `rank`, `suit` (default)   | `[rank, suit]` / `[tarot_index, deck]`   |
//! | `search`   | non-empty text             | OR clause over text fields               |
//! | `size`     | `small`, `medium`, `large` (spreads) | position count ranges          |
//!
//! `suit` and `rank` only make sense for the minor arcana, so they are ignored
//! (but left in place) unless `cards=minors`.
//!
//! Card search also looks at meanings: every meaning whose keywords contain
//! the term contributes the ids of the cards that carry its tarot index in a
//! deck using its meaning set. Those ids are OR'd into the one search clause,
//! so a card whose own text doesn't match still shows up if its meaning does.

use crate::error::Result;
use crate::model::MAJOR_ARCANA_COUNT;
use crate::options::{choice, validate_integer, OptionChoice, OptionKey, OptionSet};
use crate::query::{Clause, Cmp, Field, Predicate, Query, TextField};
use crate::store::EntityStore;

/// Tags offered on the spread list, counted against title and description.
pub const SPREAD_TAGS: [&str; 6] = ["daily", "traditional", "love", "work", "advice", "choice"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardsChoice {
    Majors,
    Minors,
}

impl OptionChoice for CardsChoice {
    const KEY: OptionKey = OptionKey::Cards;
    const VALUES: &'static [(&'static str, Self)] =
        &[("majors", CardsChoice::Majors), ("minors", CardsChoice::Minors)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankChoice {
    AceFive,
    FiveTen,
    Court,
}

impl OptionChoice for RankChoice {
    const KEY: OptionKey = OptionKey::Rank;
    const VALUES: &'static [(&'static str, Self)] = &[
        ("acefive", RankChoice::AceFive),
        ("fiveten", RankChoice::FiveTen),
        ("court", RankChoice::Court),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    Rank,
    #[default]
    Suit,
}

impl OptionChoice for OrderBy {
    const KEY: OptionKey = OptionKey::OrderBy;
    const VALUES: &'static [(&'static str, Self)] =
        &[("rank", OrderBy::Rank), ("suit", OrderBy::Suit)];
}

impl OrderBy {
    pub fn sort_keys(self) -> Vec<Field> {
        match self {
            OrderBy::Rank => vec![Field::Rank, Field::Suit],
            OrderBy::Suit => vec![Field::TarotIndex, Field::Deck],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChoice {
    Small,
    Medium,
    Large,
}

impl OptionChoice for SizeChoice {
    const KEY: OptionKey = OptionKey::Size;
    const VALUES: &'static [(&'static str, Self)] = &[
        ("small", SizeChoice::Small),
        ("medium", SizeChoice::Medium),
        ("large", SizeChoice::Large),
    ];
}

/// Which list a query is being compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Cards,
    /// Cards of one deck; the deck comes from the route, not the options.
    DeckCards(i64),
    Spreads,
}

/// A compiled query and the option set that produced it.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub query: Query,
    pub options: OptionSet,
}

impl CompiledQuery {
    pub fn search_term(&self) -> Option<&str> {
        search_term(&self.options)
    }
}

/// Compiles `options` for the given list.
pub fn compile_list_query<S: EntityStore>(
    store: &S,
    kind: ListKind,
    options: &OptionSet,
) -> Result<CompiledQuery> {
    let compiled = match kind {
        ListKind::Cards => compile_card_query(store, options)?,
        ListKind::DeckCards(deck_id) => compile_deck_query(options, deck_id),
        ListKind::Spreads => compile_spread_query(options),
    };
    tracing::debug!(
        ?kind,
        filters = compiled.query.filters.len(),
        clauses = compiled.query.clauses.len(),
        sort = ?compiled.query.sort,
        "compiled list query"
    );
    Ok(compiled)
}

/// The all-cards list: search, deck, arcana, suit, rank and ordering.
pub fn compile_card_query<S: EntityStore>(store: &S, options: &OptionSet) -> Result<CompiledQuery> {
    let mut query = Query::new();

    if let Some(term) = search_term(options) {
        let mut clause = Clause::any(vec![
            Predicate::contains(TextField::Title, term),
            Predicate::contains(TextField::Caption, term),
            Predicate::contains(TextField::Description, term),
        ]);
        let ids = meaning_matched_card_ids(store, term)?;
        clause.or(Predicate::IdIn(ids));
        query.clauses.push(clause);
    }

    let deck = validate_integer(options, OptionKey::Deck.as_str());
    if let Some(deck_id) = deck.value {
        query.filter(Field::Deck, Cmp::Eq, deck_id);
    }

    let options = apply_card_filters(deck.options, &mut query);
    Ok(CompiledQuery { query, options })
}

/// Cards of a single deck. Search is not offered here.
pub fn compile_deck_query(options: &OptionSet, deck_id: i64) -> CompiledQuery {
    let mut query = Query::new();
    query.filter(Field::Deck, Cmp::Eq, deck_id);
    let options = apply_card_filters(options.clone(), &mut query);
    CompiledQuery { query, options }
}

/// Spreads: search over title and description, size buckets, smallest first.
pub fn compile_spread_query(options: &OptionSet) -> CompiledQuery {
    let mut query = Query::new();

    if let Some(term) = search_term(options) {
        query.clauses.push(Clause::any(vec![
            Predicate::contains(TextField::Title, term),
            Predicate::contains(TextField::Description, term),
        ]));
    }

    match choice::<SizeChoice>(options) {
        Some(SizeChoice::Small) => query.filter(Field::Size, Cmp::Lte, 3),
        Some(SizeChoice::Medium) => {
            query.filter(Field::Size, Cmp::Lte, 7);
            query.filter(Field::Size, Cmp::Gte, 4);
        }
        Some(SizeChoice::Large) => query.filter(Field::Size, Cmp::Gte, 8),
        None => {}
    }

    query.sort = vec![Field::Size, Field::Id];
    CompiledQuery {
        query,
        options: options.clone(),
    }
}

/// How many spreads mention each of [`SPREAD_TAGS`].
pub fn spread_tag_counts<S: EntityStore>(store: &S) -> Result<Vec<(String, usize)>> {
    SPREAD_TAGS
        .iter()
        .map(|tag| {
            let query = Query {
                clauses: vec![Clause::any(vec![
                    Predicate::contains(TextField::Title, *tag),
                    Predicate::contains(TextField::Description, *tag),
                ])],
                ..Query::default()
            };
            Ok((tag.to_string(), store.query_spreads(&query)?.len()))
        })
        .collect()
}

/// The search option, unless missing or empty.
pub fn search_term(options: &OptionSet) -> Option<&str> {
    options
        .get(OptionKey::Search.as_str())
        .filter(|term| !term.is_empty())
}

fn meaning_matched_card_ids<S: EntityStore>(store: &S, term: &str) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for meaning in store.meanings_with_keyword(term)? {
        ids.extend(store.card_ids_for_meaning(meaning.tarot_index, meaning.meaning_set_id)?);
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Arcana, suit, rank and ordering, shared by the card lists.
fn apply_card_filters(mut options: OptionSet, query: &mut Query) -> OptionSet {
    let cards = choice::<CardsChoice>(&options);
    match cards {
        Some(CardsChoice::Majors) => query.filter(Field::TarotIndex, Cmp::Lt, MAJOR_ARCANA_COUNT as i64),
        Some(CardsChoice::Minors) => {
            query.filter(Field::TarotIndex, Cmp::Gt, MAJOR_ARCANA_COUNT as i64 - 1);
            query.minors_only = true;
        }
        None => {}
    }

    if cards == Some(CardsChoice::Minors) {
        let suit = validate_integer(&options, OptionKey::Suit.as_str());
        if let Some(suit) = suit.value {
            query.filter(Field::Suit, Cmp::Eq, suit);
        }
        options = suit.options;

        match choice::<RankChoice>(&options) {
            Some(RankChoice::AceFive) => query.filter(Field::Rank, Cmp::Lte, 5),
            Some(RankChoice::FiveTen) => {
                query.filter(Field::Rank, Cmp::Lte, 10);
                query.filter(Field::Rank, Cmp::Gte, 5);
            }
            Some(RankChoice::Court) => query.filter(Field::Rank, Cmp::Gt, 10),
            None => {}
        }
    }

    let order = choice::<OrderBy>(&options).unwrap_or_default();
    options.insert(OptionKey::OrderBy.as_str(), order.as_str());
    query.sort = order.sort_keys();

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        StoreFixture::sample().store
    }

    fn opts(pairs: &[(&str, &str)]) -> OptionSet {
        pairs.iter().copied().collect()
    }

    fn ids(store: &InMemoryStore, compiled: &CompiledQuery) -> Vec<i64> {
        store
            .query_cards(&compiled.query)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn minors_with_suit_and_court_rank() {
        let compiled = compile_card_query(
            &store(),
            &opts(&[("cards", "minors"), ("suit", "2"), ("rank", "court")]),
        )
        .unwrap();

        assert_eq!(compiled.query.filter_value(Field::Suit, Cmp::Eq), Some(2));
        assert_eq!(compiled.query.filter_value(Field::Rank, Cmp::Gt), Some(10));
        assert_eq!(compiled.query.filter_value(Field::TarotIndex, Cmp::Gt), Some(21));
        assert!(compiled.query.minors_only);
    }

    #[test]
    fn suit_is_ignored_for_majors() {
        let compiled =
            compile_card_query(&store(), &opts(&[("cards", "majors"), ("suit", "2")])).unwrap();

        assert!(!compiled.query.has_filter_on(Field::Suit));
        assert_eq!(compiled.query.filter_value(Field::TarotIndex, Cmp::Lt), Some(22));
        // ignored, not dropped
        assert_eq!(compiled.options.get("suit"), Some("2"));
    }

    #[test]
    fn suit_and_rank_ignored_without_cards_option() {
        let compiled =
            compile_card_query(&store(), &opts(&[("suit", "1"), ("rank", "acefive")])).unwrap();
        assert!(!compiled.query.has_filter_on(Field::Suit));
        assert!(!compiled.query.has_filter_on(Field::Rank));
        assert!(!compiled.query.minors_only);
    }

    #[test]
    fn fiveten_is_inclusive_on_both_ends() {
        let store = store();
        let compiled =
            compile_card_query(&store, &opts(&[("cards", "minors"), ("rank", "fiveten")])).unwrap();
        assert_eq!(compiled.query.filter_value(Field::Rank, Cmp::Gte), Some(5));
        assert_eq!(compiled.query.filter_value(Field::Rank, Cmp::Lte), Some(10));
        // Eight of Cups and Ten of Swords
        assert_eq!(ids(&store, &compiled), vec![6, 7]);
    }

    #[test]
    fn invalid_deck_and_suit_are_dropped() {
        let compiled = compile_card_query(
            &store(),
            &opts(&[("deck", "rider"), ("cards", "minors"), ("suit", "cups")]),
        )
        .unwrap();
        assert!(!compiled.options.contains("deck"));
        assert!(!compiled.options.contains("suit"));
        assert!(!compiled.query.has_filter_on(Field::Deck));
    }

    #[test]
    fn order_defaults_to_suit_and_is_written_back() {
        let compiled = compile_card_query(&store(), &opts(&[("order_by", "colour")])).unwrap();
        assert_eq!(compiled.options.get("order_by"), Some("suit"));
        assert_eq!(compiled.query.sort, vec![Field::TarotIndex, Field::Deck]);

        let compiled = compile_card_query(&store(), &opts(&[("order_by", "rank")])).unwrap();
        assert_eq!(compiled.query.sort, vec![Field::Rank, Field::Suit]);
    }

    #[test]
    fn default_order_is_tarot_index_then_deck() {
        let store = store();
        let compiled = compile_card_query(&store, &opts(&[("cards", "majors")])).unwrap();
        assert_eq!(ids(&store, &compiled), vec![1, 9, 2, 11, 3]);
    }

    #[test]
    fn empty_search_adds_no_clause() {
        let compiled = compile_card_query(&store(), &opts(&[("search", "")])).unwrap();
        assert!(compiled.query.clauses.is_empty());
        assert_eq!(compiled.search_term(), None);
    }

    #[test]
    fn search_matches_text_fields_case_insensitively() {
        let store = store();
        let compiled = compile_card_query(&store, &opts(&[("search", "MAGICIAN")])).unwrap();
        assert_eq!(compiled.query.clauses.len(), 1);
        assert_eq!(ids(&store, &compiled), vec![2]);
    }

    #[test]
    fn search_reaches_cards_through_their_meaning() {
        let store = store();
        // "celebration" is only in meaning set 1's keywords for Three of Cups,
        // so only the Rider three (deck 1) should surface, not Thoth's.
        let compiled = compile_card_query(&store, &opts(&[("search", "celebration")])).unwrap();
        assert_eq!(ids(&store, &compiled), vec![5]);

        let compiled = compile_card_query(&store, &opts(&[("search", "friendship")])).unwrap();
        assert_eq!(ids(&store, &compiled), vec![5, 10]);
    }

    #[test]
    fn meaning_ids_join_the_single_search_clause() {
        let compiled = compile_card_query(&store(), &opts(&[("search", "beginnings")])).unwrap();
        assert_eq!(compiled.query.clauses.len(), 1);
        assert_eq!(
            compiled.query.clauses[0].any_of.last(),
            Some(&Predicate::IdIn(vec![1]))
        );
    }

    #[test]
    fn deck_query_ignores_search_and_deck_option() {
        let store = store();
        let compiled = compile_deck_query(&opts(&[("search", "fool"), ("deck", "2")]), 1);
        assert!(compiled.query.clauses.is_empty());
        assert_eq!(compiled.query.filter_value(Field::Deck, Cmp::Eq), Some(1));
        assert_eq!(ids(&store, &compiled).len(), 8);
    }

    #[test]
    fn spread_size_buckets() {
        let store = store();
        let sizes = |size: &str| -> Vec<usize> {
            let compiled = compile_spread_query(&opts(&[("size", size)]));
            store
                .query_spreads(&compiled.query)
                .unwrap()
                .iter()
                .map(|r| r.size)
                .collect()
        };
        assert_eq!(sizes("small"), vec![0, 1, 3]);
        assert_eq!(sizes("medium"), vec![7]);
        assert_eq!(sizes("large"), vec![10]);
        assert_eq!(sizes("huge"), vec![0, 1, 3, 7, 10]);
    }

    #[test]
    fn spread_search_skips_meanings() {
        let store = store();
        let compiled = compile_spread_query(&opts(&[("search", "ADVICE")]));
        let rows = store.query_spreads(&compiled.query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spread.id, 2);
        assert_eq!(compiled.query.clauses[0].any_of.len(), 2);
    }

    #[test]
    fn tag_counts_cover_every_tag() {
        let counts = spread_tag_counts(&store()).unwrap();
        assert_eq!(counts.len(), SPREAD_TAGS.len());
        let get = |tag: &str| counts.iter().find(|(t, _)| t == tag).map(|(_, n)| *n);
        assert_eq!(get("daily"), Some(1));
        assert_eq!(get("traditional"), Some(1));
        assert_eq!(get("love"), Some(0));
    }

    #[test]
    fn list_kind_dispatch() {
        let store = store();
        let compiled =
            compile_list_query(&store, ListKind::DeckCards(2), &OptionSet::new()).unwrap();
        assert_eq!(ids(&store, &compiled), vec![9, 10]);
    }
}
