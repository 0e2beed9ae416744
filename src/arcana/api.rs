//! # API Facade
//!
//! The single entry point for arcana, whatever the UI. It owns the store and
//! the configuration and hands both to the command and core functions, so
//! callers only supply what varies per request: ids, the raw option set, the
//! session deck and a random source.
//!
//! The facade holds no logic of its own. Command behavior lives in
//! `commands/*.rs`; list compilation, paging, the save-string codec, layout
//! and adjacency live in their own modules and are re-exposed here for
//! routers that compose views themselves.
//!
//! `ArcanaApi<S: EntityStore>` is generic over the storage backend:
//! - Production: `ArcanaApi<FileStore>`
//! - Testing: `ArcanaApi<InMemoryStore>`

use crate::adjacency::{self, Neighbors};
use crate::codec;
use crate::commands::{self, CmdResult};
use crate::compile::{self, CompiledQuery, ListKind};
use crate::config::ArcanaConfig;
use crate::error::Result;
use crate::layout::{self, LayoutResult};
use crate::model::{CardPosition, ThrownCard};
use crate::options::OptionSet;
use crate::pager::Page;
use crate::store::EntityStore;
use rand::Rng;

pub struct ArcanaApi<S: EntityStore> {
    store: S,
    config: ArcanaConfig,
}

impl<S: EntityStore> ArcanaApi<S> {
    pub fn new(store: S, config: ArcanaConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ArcanaConfig {
        &self.config
    }

    // --- Core entry points ---

    pub fn compile_list_query(&self, kind: ListKind, options: &OptionSet) -> Result<CompiledQuery> {
        compile::compile_list_query(&self.store, kind, options)
    }

    pub fn paginate<T>(&self, items: Vec<T>, options: &OptionSet) -> (Page<T>, OptionSet) {
        self.config.paginator().paginate(items, options)
    }

    pub fn encode_reading(&self, thrown: &[ThrownCard], positions: &[CardPosition]) -> String {
        codec::encode_reading(thrown, positions)
    }

    pub fn decode_reading(
        &self,
        encoded: &str,
        expected: usize,
        deck_id: i64,
    ) -> Result<Vec<ThrownCard>> {
        codec::decode_reading(&self.store, encoded, expected, deck_id)
    }

    pub fn compute_layout(&self, positions: &[CardPosition], max_x: u32, max_y: u32) -> LayoutResult {
        layout::compute_layout(positions, max_x, max_y, &self.config.layout)
    }

    pub fn nearest_neighbors(&self, tarot_index: u8, deck_id: Option<i64>) -> Result<Neighbors> {
        adjacency::nearest_neighbors(&self.store, tarot_index, deck_id)
    }

    // --- Commands ---

    pub fn deck_list(&self, options: &OptionSet) -> Result<CmdResult> {
        commands::deck_list::run(&self.store, &self.config, options)
    }

    pub fn card_list(&self, options: &OptionSet) -> Result<CmdResult> {
        commands::card_list::run(&self.store, &self.config, options)
    }

    pub fn deck_detail(&self, deck_id: i64, options: &OptionSet) -> Result<CmdResult> {
        commands::deck_detail::run(&self.store, &self.config, deck_id, options)
    }

    pub fn card_detail(&self, deck_id: i64, tarot_index: i64, options: &OptionSet) -> Result<CmdResult> {
        commands::card_detail::run(&self.store, &self.config, deck_id, tarot_index, options)
    }

    pub fn tarot_card_detail(&self, tarot_index: i64, options: &OptionSet) -> Result<CmdResult> {
        commands::tarot_card_detail::run(&self.store, &self.config, tarot_index, options)
    }

    pub fn random_card<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CmdResult> {
        commands::random_card::run(&self.store, &self.config, rng)
    }

    pub fn spread_list(&self, options: &OptionSet, session_deck: Option<i64>) -> Result<CmdResult> {
        commands::spread_list::run(&self.store, &self.config, options, session_deck)
    }

    pub fn reading<R: Rng + ?Sized>(
        &self,
        spread_id: i64,
        deck_id: i64,
        options: &OptionSet,
        session_deck: Option<i64>,
        rng: &mut R,
    ) -> Result<CmdResult> {
        commands::reading::run(
            &self.store,
            &self.config,
            spread_id,
            deck_id,
            options,
            session_deck,
            rng,
        )
    }

    pub fn update_reading_settings(&self, spread_id: i64, options: &OptionSet) -> Result<CmdResult> {
        commands::settings::update_reading_settings(&self.store, &self.config, spread_id, options)
    }

    pub fn random_reading<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CmdResult> {
        commands::settings::random_reading(&self.store, &self.config, rng)
    }
}
