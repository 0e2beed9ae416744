//! # Arcana Architecture
//!
//! Arcana is the core of a tarot catalog and reading application: browsing
//! decks and cards, searching them, and laying out readings that can be
//! shared as a short save-string. It is a library with a CLI client, not a
//! CLI with some library code.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders views, owns the session file   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade holding the store and the config             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One view per command, with not-found fallbacks           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - options, compile, pager, codec, layout, adjacency, draw  │
//! │  - Pure functions over their inputs                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Read-only EntityStore trait                              │
//! │  - FileStore (catalog.json), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Request Flow
//!
//! A list request runs its raw options through the validator and the
//! filter/sort compiler, has the store execute the query, and pages the
//! result. A reading request decodes its save-string or deals at random,
//! then lays the spread out. Card detail views also ask for the previous and
//! next cards.
//!
//! Every option that fails validation is dropped from the *effective* option
//! set that comes back with each list, so links built from it only carry
//! what was actually applied.
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward nothing writes to stdout or stderr, exits the
//! process, or touches files other than through the store. The session deck
//! is passed in and handed back; persisting it is the caller's business.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: One module per view
//! - [`options`]: Raw request options and their validation
//! - [`compile`]: Options to queries
//! - [`query`]: Filters, OR clauses and sort keys a store executes
//! - [`pager`]: Page clamping with orphans
//! - [`codec`]: The reading save-string
//! - [`layout`]: Grid cells to pixels
//! - [`adjacency`]: Previous and next tarot index with wrap-around
//! - [`draw`]: Random readings
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Catalog entities
//! - [`config`]: Configuration management
//! - [`session`]: The remembered deck
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod adjacency;
pub mod api;
pub mod codec;
pub mod commands;
pub mod compile;
pub mod config;
pub mod draw;
pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod pager;
pub mod query;
pub mod session;
pub mod store;
