use super::memory::InMemoryStore;
use super::{Aggregate, Catalog, EntityStore, IndexRange, SpreadRow};
use crate::error::{ArcanaError, Result};
use crate::model::{Card, CardPosition, Deck, Meaning, Spread, Suit};
use crate::query::Query;
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_FILENAME: &str = "catalog.json";

/// Catalog loaded from `catalog.json` in a data directory.
///
/// The file is read once when the store is opened; queries then run against
/// the loaded copy.
pub struct FileStore {
    root: PathBuf,
    inner: InMemoryStore,
}

impl FileStore {
    /// Opens the catalog in `root`. A missing file is an empty catalog.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let catalog = load_catalog(&root)?;
        tracing::debug!(
            path = %root.display(),
            decks = catalog.decks.len(),
            cards = catalog.cards.len(),
            spreads = catalog.spreads.len(),
            "catalog loaded"
        );
        Ok(Self {
            root,
            inner: InMemoryStore::from_catalog(catalog),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILENAME)
    }

    /// Writes `catalog` to `root`, creating the directory if needed.
    pub fn write_catalog(root: &Path, catalog: &Catalog) -> Result<()> {
        if !root.exists() {
            fs::create_dir_all(root).map_err(ArcanaError::Io)?;
        }
        let content = serde_json::to_string_pretty(catalog).map_err(ArcanaError::Serialization)?;
        fs::write(root.join(CATALOG_FILENAME), content).map_err(ArcanaError::Io)?;
        Ok(())
    }
}

fn load_catalog(root: &Path) -> Result<Catalog> {
    let path = root.join(CATALOG_FILENAME);
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no catalog found, starting empty");
        return Ok(Catalog::default());
    }
    let content = fs::read_to_string(&path).map_err(ArcanaError::Io)?;
    serde_json::from_str(&content).map_err(ArcanaError::Serialization)
}

impl EntityStore for FileStore {
    fn list_decks(&self) -> Result<Vec<Deck>> {
        self.inner.list_decks()
    }

    fn get_deck(&self, id: i64) -> Result<Deck> {
        self.inner.get_deck(id)
    }

    fn suits_for_deck(&self, deck_id: i64) -> Result<Vec<Suit>> {
        self.inner.suits_for_deck(deck_id)
    }

    fn get_card_by_id(&self, id: i64) -> Result<Card> {
        self.inner.get_card_by_id(id)
    }

    fn get_card(&self, deck_id: i64, tarot_index: i64) -> Result<Card> {
        self.inner.get_card(deck_id, tarot_index)
    }

    fn list_cards(&self) -> Result<Vec<Card>> {
        self.inner.list_cards()
    }

    fn query_cards(&self, query: &Query) -> Result<Vec<Card>> {
        self.inner.query_cards(query)
    }

    fn tarot_index_aggregate(
        &self,
        deck_id: Option<i64>,
        range: IndexRange,
        aggregate: Aggregate,
    ) -> Result<Option<u8>> {
        self.inner.tarot_index_aggregate(deck_id, range, aggregate)
    }

    fn meanings_with_keyword(&self, term: &str) -> Result<Vec<Meaning>> {
        self.inner.meanings_with_keyword(term)
    }

    fn card_ids_for_meaning(&self, tarot_index: u8, meaning_set_id: i64) -> Result<Vec<i64>> {
        self.inner.card_ids_for_meaning(tarot_index, meaning_set_id)
    }

    fn find_meaning(&self, meaning_set_id: i64, tarot_index: u8) -> Result<Option<Meaning>> {
        self.inner.find_meaning(meaning_set_id, tarot_index)
    }

    fn meanings_for_index(&self, tarot_index: u8) -> Result<Vec<Meaning>> {
        self.inner.meanings_for_index(tarot_index)
    }

    fn list_spreads(&self) -> Result<Vec<Spread>> {
        self.inner.list_spreads()
    }

    fn get_spread(&self, id: i64) -> Result<Spread> {
        self.inner.get_spread(id)
    }

    fn positions_for_spread(&self, spread_id: i64) -> Result<Vec<CardPosition>> {
        self.inner.positions_for_spread(spread_id)
    }

    fn query_spreads(&self, query: &Query) -> Result<Vec<SpreadRow>> {
        self.inner.query_spreads(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn missing_catalog_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        assert!(store.list_decks().unwrap().is_empty());
        assert_eq!(store.catalog_path(), temp.path().join("catalog.json"));
    }

    #[test]
    fn catalog_round_trips_through_disk() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("nested");
        let catalog = StoreFixture::sample().store.catalog().clone();

        FileStore::write_catalog(&root, &catalog).unwrap();
        let store = FileStore::open(&root).unwrap();

        assert_eq!(store.list_decks().unwrap().len(), 3);
        assert_eq!(store.get_card(1, 21).unwrap().title, "The World");
        assert_eq!(store.get_card_by_id(7).unwrap().rank(), Some(10));
        assert_eq!(store.positions_for_spread(4).unwrap().len(), 10);
    }

    #[test]
    fn corrupt_catalog_is_a_serialization_error() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("catalog.json"), "{ not json").unwrap();
        let err = FileStore::open(temp.path()).err().unwrap();
        assert!(matches!(err, ArcanaError::Serialization(_)));
    }
}
