//! # Commands
//!
//! One module per user-facing view. Each exposes a `run` function that takes
//! the store, the config and the request's raw options, and returns a
//! [`CmdResult`] holding the [`View`] to render.
//!
//! A command whose subject does not exist never fails: it runs the command
//! one level up instead and marks the result with what was missing.
//!
//! | missing            | falls back to            |
//! |--------------------|--------------------------|
//! | deck               | [`deck_list`]            |
//! | card in a deck     | [`deck_detail`]          |
//! | any card at index  | [`card_list`]            |
//! | spread             | [`spread_list`]          |
//! | meaning            | a placeholder meaning    |
//!
//! Only store and IO failures propagate as errors.

use crate::error::NotFound;
use crate::layout::{LayoutResult, Offset};
use crate::model::{Card, CardPosition, Deck, Meaning, Spread, Suit, ThrownCard};
use crate::adjacency::Neighbors;
use crate::options::OptionSet;
use crate::pager::Page;
use crate::store::SpreadRow;
use serde::Serialize;

pub mod card_detail;
pub mod card_list;
pub mod deck_detail;
pub mod deck_list;
pub mod helpers;
pub mod random_card;
pub mod reading;
pub mod settings;
pub mod spread_list;
pub mod tarot_card_detail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A card with the names it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    pub card: Card,
    /// "Three of Chalices", using the deck's own suit name.
    pub name: String,
    pub deck_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckEntry {
    pub deck: Deck,
    pub suits: Vec<Suit>,
}

/// An id and a label, for navigation menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub id: i64,
    pub name: String,
}

/// The side menu of the card views: every card of one deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardNav {
    pub majors: Vec<Card>,
    /// Ordered by suit, then tarot index.
    pub minors: Vec<Card>,
    pub first_major: Option<u8>,
    pub first_minor: Option<u8>,
    /// Suits of the deck that hold no cards yet.
    pub empty_suits: Vec<Suit>,
}

/// Another deck's version of the card being shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedCard {
    pub deck_id: i64,
    pub deck_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeckListView {
    pub page: Page<DeckEntry>,
    pub options: OptionSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardListView {
    pub page: Page<CardEntry>,
    pub options: OptionSet,
    pub decks: Vec<NavLink>,
    /// Suits of the first deck, for the suit filter menu.
    pub suits: Vec<Suit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeckDetailView {
    pub deck: Deck,
    pub page: Page<CardEntry>,
    pub options: OptionSet,
    pub suits: Vec<Suit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardDetailView {
    pub card: CardEntry,
    pub meaning: Meaning,
    pub neighbors: Neighbors,
    pub nav: CardNav,
    pub related: Vec<RelatedCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TarotCardDetailView {
    pub tarot_index: u8,
    pub page: Page<CardEntry>,
    pub options: OptionSet,
    pub meaning: Meaning,
    pub neighbors: Neighbors,
    pub nav: CardNav,
    pub related: Vec<RelatedCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpreadListView {
    pub page: Page<SpreadRow>,
    pub options: OptionSet,
    /// `(tag, number of spreads mentioning it)`
    pub tags: Vec<(String, usize)>,
    /// Deck the spread links open a reading with.
    pub deck_id: i64,
}

/// One filled slot of a reading.
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub position: CardPosition,
    pub thrown: ThrownCard,
    pub name: String,
    pub offset: Offset,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingView {
    pub spread: Spread,
    pub deck: Deck,
    pub layout: LayoutResult,
    pub placements: Vec<Placement>,
    /// Replays this reading; absent when the requested one failed to load.
    pub save_string: Option<String>,
    pub error: Option<String>,
    pub decks: Vec<NavLink>,
    pub spreads: Vec<NavLink>,
    /// The deck remembered for this session, or the default deck.
    pub session_deck: NavLink,
}

/// Where the caller should go next: a reading of `spread_id` with `deck_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingTarget {
    pub spread_id: i64,
    pub deck_id: i64,
    /// The deck the session should remember, when it changed.
    pub session_deck: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub enum View {
    DeckList(DeckListView),
    CardList(CardListView),
    DeckDetail(DeckDetailView),
    CardDetail(Box<CardDetailView>),
    TarotCardDetail(Box<TarotCardDetailView>),
    SpreadList(SpreadListView),
    Reading(Box<ReadingView>),
    ReadingTarget(ReadingTarget),
}

#[derive(Debug)]
pub struct CmdResult {
    pub view: View,
    /// Set when the requested entity was missing and `view` is a fallback.
    pub missing: Option<NotFound>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn new(view: View) -> Self {
        Self {
            view,
            missing: None,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.add_message(message);
        self
    }

    /// Marks this result as standing in for `missing`.
    pub fn fallback_for(mut self, missing: NotFound) -> Self {
        tracing::debug!(%missing, "falling back");
        self.add_message(CmdMessage::warning(format!(
            "{} not found",
            capitalize(&missing.to_string())
        )));
        self.missing = Some(missing);
        self
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
