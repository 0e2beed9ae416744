//! # CLI Layer
//!
//! This module is one possible UI client for arcana, not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads and writes the session file
//! - Decides where the data directory lives
//! - Seeds random draws
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments to typed commands via clap
//! 2. **Context Setup**: data dir, config, store, session and renderer
//! 3. **Dispatch**: one `ArcanaApi` call per subcommand
//! 4. **Output**: messages first, then the rendered view

use super::render::Renderer;
use super::setup::{set, CardFilters, Cli, Commands, ListOptions};
use arcana::api::ArcanaApi;
use arcana::commands::{CmdResult, View};
use arcana::config::ArcanaConfig;
use arcana::error::{ArcanaError, Result};
use arcana::options::{OptionKey, OptionSet};
use arcana::session::Session;
use arcana::store::fs::FileStore;
use clap::Parser;
use directories::ProjectDirs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "ARCANA_HOME";

struct AppContext {
    api: ArcanaApi<FileStore>,
    data_dir: PathBuf,
    session: Session,
    renderer: Renderer,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Decks { list }) => handle_decks(&ctx, list),
        Some(Commands::Cards { list, filters }) => handle_cards(&ctx, list, filters),
        Some(Commands::Deck { id, list, filters }) => handle_deck(&ctx, id, list, filters),
        Some(Commands::Card { deck, index }) => handle_card(&ctx, deck, index),
        Some(Commands::Tarot { index, list }) => handle_tarot(&ctx, index, list),
        Some(Commands::RandomCard { seed }) => handle_random_card(&ctx, seed),
        Some(Commands::Spreads { list, size }) => handle_spreads(&ctx, list, size),
        Some(Commands::Reading {
            spread,
            deck,
            cards,
            seed,
        }) => handle_reading(&ctx, spread, deck, cards, seed),
        Some(Commands::RandomReading { seed }) => handle_random_reading(&ctx, seed),
        Some(Commands::Settings { spread, deck }) => handle_settings(&mut ctx, spread, deck),
        Some(Commands::Neighbors { index, deck }) => handle_neighbors(&ctx, index, deck),
        None => handle_decks(&ctx, ListOptions::default()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    tracing::debug!(path = %data_dir.display(), "using data directory");

    let config = ArcanaConfig::load(&data_dir)?;
    let store = FileStore::open(&data_dir)?;
    let session = Session::load(&data_dir);

    let use_color = !cli.no_color && console::Term::stdout().features().colors_supported();

    Ok(AppContext {
        api: ArcanaApi::new(store, config),
        data_dir,
        session,
        renderer: Renderer::new(use_color),
    })
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "arcana", "arcana")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ArcanaError::Config("could not determine a data directory".into()))
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_result(ctx: &AppContext, result: &CmdResult) {
    print!("{}", ctx.renderer.render_messages(&result.messages));
    println!("{}", ctx.renderer.render_view(&result.view));
}

fn handle_decks(ctx: &AppContext, list: ListOptions) -> Result<()> {
    let result = ctx.api.deck_list(&list.to_options())?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_cards(ctx: &AppContext, list: ListOptions, filters: CardFilters) -> Result<()> {
    let mut options = list.to_options();
    filters.apply(&mut options);
    let result = ctx.api.card_list(&options)?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_deck(ctx: &AppContext, id: i64, list: ListOptions, filters: CardFilters) -> Result<()> {
    let mut options = list.to_options();
    filters.apply(&mut options);
    let result = ctx.api.deck_detail(id, &options)?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_card(ctx: &AppContext, deck: i64, index: i64) -> Result<()> {
    let result = ctx.api.card_detail(deck, index, &OptionSet::new())?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_tarot(ctx: &AppContext, index: i64, list: ListOptions) -> Result<()> {
    let result = ctx.api.tarot_card_detail(index, &list.to_options())?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_random_card(ctx: &AppContext, seed: Option<u64>) -> Result<()> {
    let result = ctx.api.random_card(&mut rng(seed))?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_spreads(ctx: &AppContext, list: ListOptions, size: Option<String>) -> Result<()> {
    let mut options = list.to_options();
    set(&mut options, OptionKey::Size, &size);
    let result = ctx.api.spread_list(&options, ctx.session.deck)?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_reading(
    ctx: &AppContext,
    spread: i64,
    deck: Option<i64>,
    cards: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let deck = deck.unwrap_or_else(|| ctx.session.deck_or(ctx.api.config().default_deck_id));
    let mut options = OptionSet::new();
    set(&mut options, OptionKey::Cards, &cards);
    let result = ctx
        .api
        .reading(spread, deck, &options, ctx.session.deck, &mut rng(seed))?;
    print_result(ctx, &result);
    Ok(())
}

/// Prints the messages of a command that resolved to a reading target, then
/// lays that reading out. Fallback views are printed as they are.
fn follow_target(ctx: &AppContext, result: CmdResult, seed: Option<u64>) -> Result<()> {
    match &result.view {
        View::ReadingTarget(target) => {
            print!("{}", ctx.renderer.render_messages(&result.messages));
            handle_reading(ctx, target.spread_id, Some(target.deck_id), None, seed)
        }
        _ => {
            print_result(ctx, &result);
            Ok(())
        }
    }
}

fn handle_random_reading(ctx: &AppContext, seed: Option<u64>) -> Result<()> {
    let mut rng = rng(seed);
    let result = ctx.api.random_reading(&mut rng)?;
    follow_target(ctx, result, seed)
}

fn handle_settings(ctx: &mut AppContext, spread: i64, deck: Option<String>) -> Result<()> {
    let mut options = OptionSet::new();
    set(&mut options, OptionKey::Deck, &deck);
    let result = ctx.api.update_reading_settings(spread, &options)?;

    if let View::ReadingTarget(target) = &result.view {
        if let Some(deck) = target.session_deck {
            ctx.session.deck = Some(deck);
            ctx.session.save(&ctx.data_dir)?;
            tracing::debug!(deck, "session deck saved");
        }
    }

    follow_target(ctx, result, None)
}

fn handle_neighbors(ctx: &AppContext, index: u8, deck: Option<i64>) -> Result<()> {
    let neighbors = ctx.api.nearest_neighbors(index, deck)?;
    println!("{}", ctx.renderer.render_neighbors(&neighbors));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_flag_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/arcana-flag"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/arcana-flag"));
    }

    #[test]
    fn seeded_rng_is_repeatable() {
        use rand::Rng;
        let a: u32 = rng(Some(9)).gen();
        let b: u32 = rng(Some(9)).gen();
        assert_eq!(a, b);
    }
}
