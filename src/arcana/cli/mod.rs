//! # CLI Behavior
//!
//! This is one possible UI client for arcana, not the application itself.
//! For the overall architecture, see the library documentation.
//!
//! ## Naked Execution
//!
//! Running `arcana` with no arguments lists the decks.
//!
//! ## Options
//!
//! List commands accept `--query` with a raw option string
//! (`cards=minors&suit=1&page=2`), the same string the pager prints for the
//! next page. Explicit flags such as `--page` or `--suit` override it.
//! Invalid values are not errors: the list ignores them and the printed
//! query string shows what was actually applied.
//!
//! ## Readings
//!
//! `arcana reading <spread> [deck]` deals at random and prints a replay
//! command with the save string. Passing that string back through `--cards`
//! lays out the same reading. `arcana settings <spread> --deck <id>`
//! remembers the deck in `session.json` for later readings.
//!
//! ## Data Directory
//!
//! `--data-dir`, then `$ARCANA_HOME`, then the platform data directory.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Template rendering with styles
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles
//! - `templates`: Output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
