//! # Arcana CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/` and this file
//! only invokes `cli::run()` and handles process termination. Everything
//! from the library's `api.rs` inward is UI agnostic; argument parsing,
//! context setup, the session file and rendering all belong to `cli/`.
//!
//! ## Testing Approach
//!
//! - **Commands layer (`commands/`)**: unit tests of the business logic over
//!   in-memory catalogs.
//! - **API layer (`api.rs`)**: dispatch tests.
//! - **CLI layer (`cli/`)**: argument parsing and rendering of canned views,
//!   plus end-to-end runs of the binary in `tests/`.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
