use super::{Aggregate, Catalog, CardRow, EntityStore, IndexRange, SpreadRow};
use crate::error::{ArcanaError, NotFound, Result};
use crate::model::{Card, CardPosition, Deck, Meaning, Spread, Suit};
use crate::query::Query;

/// In-memory catalog. Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    catalog: Catalog,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    fn card_row(&self, card: &Card) -> CardRow {
        let suit = card.suit_id().and_then(|suit_id| {
            self.catalog
                .suits
                .iter()
                .find(|s| s.id == suit_id)
                .map(|s| s.suit)
        });
        CardRow {
            card: card.clone(),
            suit,
        }
    }

    fn deck_meaning_set(&self, deck_id: i64) -> Option<i64> {
        self.catalog
            .decks
            .iter()
            .find(|d| d.id == deck_id)
            .map(|d| d.meaning_set_id)
    }
}

impl EntityStore for InMemoryStore {
    fn list_decks(&self) -> Result<Vec<Deck>> {
        let mut decks = self.catalog.decks.clone();
        decks.sort_by_key(|d| d.id);
        Ok(decks)
    }

    fn get_deck(&self, id: i64) -> Result<Deck> {
        self.catalog
            .decks
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(ArcanaError::NotFound(NotFound::Deck(id)))
    }

    fn suits_for_deck(&self, deck_id: i64) -> Result<Vec<Suit>> {
        let mut suits: Vec<Suit> = self
            .catalog
            .suits
            .iter()
            .filter(|s| s.deck_id == deck_id)
            .cloned()
            .collect();
        suits.sort_by_key(|s| (s.suit, s.id));
        Ok(suits)
    }

    fn get_card_by_id(&self, id: i64) -> Result<Card> {
        self.catalog
            .cards
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ArcanaError::NotFound(NotFound::CardId(id)))
    }

    fn get_card(&self, deck_id: i64, tarot_index: i64) -> Result<Card> {
        self.catalog
            .cards
            .iter()
            .find(|c| c.deck_id == deck_id && c.tarot_index as i64 == tarot_index)
            .cloned()
            .ok_or(ArcanaError::NotFound(NotFound::Card {
                deck_id,
                tarot_index,
            }))
    }

    fn list_cards(&self) -> Result<Vec<Card>> {
        let mut cards = self.catalog.cards.clone();
        cards.sort_by_key(|c| c.id);
        Ok(cards)
    }

    fn query_cards(&self, query: &Query) -> Result<Vec<Card>> {
        let mut rows: Vec<CardRow> = self.catalog.cards.iter().map(|c| self.card_row(c)).collect();
        rows.sort_by_key(|r| r.card.id);
        Ok(query.apply(rows).into_iter().map(|r| r.card).collect())
    }

    fn tarot_index_aggregate(
        &self,
        deck_id: Option<i64>,
        range: IndexRange,
        aggregate: Aggregate,
    ) -> Result<Option<u8>> {
        let indices = self
            .catalog
            .cards
            .iter()
            .filter(|c| deck_id.is_none_or(|id| c.deck_id == id))
            .map(|c| c.tarot_index)
            .filter(|idx| range.contains(*idx));

        Ok(match aggregate {
            Aggregate::Min => indices.min(),
            Aggregate::Max => indices.max(),
        })
    }

    fn meanings_with_keyword(&self, term: &str) -> Result<Vec<Meaning>> {
        let term = term.to_lowercase();
        let mut meanings: Vec<Meaning> = self
            .catalog
            .meanings
            .iter()
            .filter(|m| m.keywords.to_lowercase().contains(&term))
            .cloned()
            .collect();
        meanings.sort_by_key(|m| (m.meaning_set_id, m.id));
        Ok(meanings)
    }

    fn card_ids_for_meaning(&self, tarot_index: u8, meaning_set_id: i64) -> Result<Vec<i64>> {
        Ok(self
            .catalog
            .cards
            .iter()
            .filter(|c| c.tarot_index == tarot_index)
            .filter(|c| self.deck_meaning_set(c.deck_id) == Some(meaning_set_id))
            .map(|c| c.id)
            .collect())
    }

    fn find_meaning(&self, meaning_set_id: i64, tarot_index: u8) -> Result<Option<Meaning>> {
        Ok(self
            .catalog
            .meanings
            .iter()
            .find(|m| m.meaning_set_id == meaning_set_id && m.tarot_index == tarot_index)
            .cloned())
    }

    fn meanings_for_index(&self, tarot_index: u8) -> Result<Vec<Meaning>> {
        Ok(self
            .catalog
            .meanings
            .iter()
            .filter(|m| m.tarot_index == tarot_index)
            .cloned()
            .collect())
    }

    fn list_spreads(&self) -> Result<Vec<Spread>> {
        let mut spreads = self.catalog.spreads.clone();
        spreads.sort_by_key(|s| s.id);
        Ok(spreads)
    }

    fn get_spread(&self, id: i64) -> Result<Spread> {
        self.catalog
            .spreads
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ArcanaError::NotFound(NotFound::Spread(id)))
    }

    fn positions_for_spread(&self, spread_id: i64) -> Result<Vec<CardPosition>> {
        let mut positions: Vec<CardPosition> = self
            .catalog
            .positions
            .iter()
            .filter(|p| p.spread_id == spread_id)
            .cloned()
            .collect();
        positions.sort_by_key(|p| (p.index, p.id));
        Ok(positions)
    }

    fn query_spreads(&self, query: &Query) -> Result<Vec<SpreadRow>> {
        let rows: Vec<SpreadRow> = self
            .list_spreads()?
            .into_iter()
            .map(|spread| {
                let size = self
                    .catalog
                    .positions
                    .iter()
                    .filter(|p| p.spread_id == spread.id)
                    .count();
                SpreadRow { spread, size }
            })
            .collect();
        Ok(query.apply(rows))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Arcana, MeaningSet, SuitKind};

    /// Tarot index of a minor card: suits occupy consecutive runs of 14
    /// starting right after the majors.
    pub fn minor_index(suit: SuitKind, rank: u8) -> u8 {
        22 + (suit as u8) * 14 + (rank - 1)
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn catalog(&mut self) -> &mut Catalog {
            self.store.catalog_mut()
        }

        pub fn with_meaning_set(mut self, id: i64, title: &str) -> Self {
            self.catalog().meaning_sets.push(MeaningSet {
                id,
                title: title.to_string(),
                author: "Test".to_string(),
                description: String::new(),
            });
            self
        }

        pub fn with_meaning(mut self, meaning_set_id: i64, tarot_index: u8, keywords: &str) -> Self {
            let id = self.catalog().meanings.len() as i64 + 1;
            self.catalog().meanings.push(Meaning {
                id,
                meaning_set_id,
                tarot_index,
                predictions: format!("Predictions for {}", tarot_index),
                keywords: keywords.to_string(),
                reversed_predictions: String::new(),
                reversed_keywords: format!("not {}", keywords),
            });
            self
        }

        pub fn with_deck(mut self, id: i64, name: &str, meaning_set_id: i64) -> Self {
            self.catalog().decks.push(Deck {
                id,
                name: name.to_string(),
                author: "Test".to_string(),
                description: format!("The {} deck", name),
                meaning_set_id,
            });
            self
        }

        pub fn with_suit(mut self, id: i64, deck_id: i64, suit: SuitKind, name: &str) -> Self {
            self.catalog().suits.push(Suit {
                id,
                deck_id,
                suit,
                name: name.to_string(),
            });
            self
        }

        pub fn with_major(mut self, id: i64, deck_id: i64, tarot_index: u8, title: &str) -> Self {
            self.catalog().cards.push(Card {
                id,
                deck_id,
                tarot_index,
                title: title.to_string(),
                caption: String::new(),
                description: format!("{} card", title),
                arcana: Arcana::Major,
            });
            self
        }

        pub fn with_minor(
            mut self,
            id: i64,
            deck_id: i64,
            suit_id: i64,
            suit: SuitKind,
            rank: u8,
            title: &str,
        ) -> Self {
            self.catalog().cards.push(Card {
                id,
                deck_id,
                tarot_index: minor_index(suit, rank),
                title: title.to_string(),
                caption: String::new(),
                description: format!("{} card", title),
                arcana: Arcana::Minor { suit_id, rank },
            });
            self
        }

        pub fn with_spread(mut self, id: i64, title: &str, description: &str, size: u32) -> Self {
            self.catalog().spreads.push(Spread {
                id,
                title: title.to_string(),
                author: "Test".to_string(),
                source: None,
                description: description.to_string(),
            });
            for index in 0..size {
                let position_id = self.catalog().positions.len() as i64 + 1;
                self.catalog().positions.push(CardPosition {
                    id: position_id,
                    spread_id: id,
                    index,
                    x_coordinate: index % 5,
                    y_coordinate: index / 5,
                    title: format!("Position {}", index + 1),
                    description: String::new(),
                });
            }
            self
        }

        /// Three decks, four meaning-bearing indices and five spreads.
        ///
        /// - deck 1 "Rider" (meaning set 1): 0, 1, 21, Ace of Wands, Three
        ///   of Cups, Eight of Cups, Ten of Swords, King of Coins
        /// - deck 2 "Thoth" (meaning set 2): 0, Three of Chalices
        /// - deck 3 "Solo" (meaning set 1): 5 only
        /// - spreads sized 1, 3, 7, 10 and 0
        pub fn sample() -> Self {
            use SuitKind::*;
            Self::new()
                .with_meaning_set(1, "Traditional")
                .with_meaning_set(2, "Whimsical")
                .with_meaning(1, 0, "beginnings, spontaneity")
                .with_meaning(1, minor_index(Cups, 3), "celebration, friendship")
                .with_meaning(2, minor_index(Cups, 3), "abundance, friendship")
                .with_meaning(1, minor_index(Swords, 11), "orphaned keyword")
                .with_deck(1, "Rider", 1)
                .with_deck(2, "Thoth", 2)
                .with_deck(3, "Solo", 1)
                .with_suit(1, 1, Wands, "Wands")
                .with_suit(2, 1, Cups, "Cups")
                .with_suit(3, 1, Swords, "Swords")
                .with_suit(4, 1, Pentacles, "Coins")
                .with_suit(5, 2, Cups, "Chalices")
                .with_suit(6, 2, Swords, "Blades")
                .with_major(1, 1, 0, "The Fool")
                .with_major(2, 1, 1, "The Magician")
                .with_major(3, 1, 21, "The World")
                .with_minor(4, 1, 1, Wands, 1, "Ace")
                .with_minor(5, 1, 2, Cups, 3, "Three")
                .with_minor(6, 1, 2, Cups, 8, "Eight")
                .with_minor(7, 1, 3, Swords, 10, "Ten")
                .with_minor(8, 1, 4, Pentacles, 14, "King")
                .with_major(9, 2, 0, "The Fool")
                .with_minor(10, 2, 5, Cups, 3, "Three")
                .with_major(11, 3, 5, "The Hierophant")
                .with_spread(1, "Card of the Day", "A daily single card", 1)
                .with_spread(2, "Past Present Future", "Three cards for advice", 3)
                .with_spread(3, "Horseshoe", "Seven cards about work", 7)
                .with_spread(4, "Celtic Cross", "The traditional ten card spread", 10)
                .with_spread(5, "Blank Slate", "No positions yet", 0)
        }
    }
}
