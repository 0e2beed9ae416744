use arcana::options::{OptionKey, OptionSet};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arcana", bin_name = "arcana", version)]
#[command(about = "Browse tarot decks and lay out shareable readings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding catalog.json, config.json and session.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

/// Options shared by every paginated list.
#[derive(Args, Debug, Default, Clone)]
pub struct ListOptions {
    /// Raw option query string, e.g. "cards=minors&suit=1&page=2"
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Page to show
    #[arg(long)]
    pub page: Option<String>,

    /// Search term
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Card filters. Values are passed through as typed; invalid ones are
/// ignored by the list.
#[derive(Args, Debug, Default, Clone)]
pub struct CardFilters {
    /// Only cards of this deck id
    #[arg(long)]
    pub deck: Option<String>,

    /// "majors" or "minors"
    #[arg(long)]
    pub cards: Option<String>,

    /// Canonical suit 0-3, with --cards minors
    #[arg(long)]
    pub suit: Option<String>,

    /// "acefive", "fiveten" or "court", with --cards minors
    #[arg(long)]
    pub rank: Option<String>,

    /// "suit" or "rank"
    #[arg(long, value_name = "ORDER")]
    pub order_by: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List decks
    Decks {
        #[command(flatten)]
        list: ListOptions,
    },

    /// List cards across decks
    #[command(alias = "ls")]
    Cards {
        #[command(flatten)]
        list: ListOptions,
        #[command(flatten)]
        filters: CardFilters,
    },

    /// Show one deck and its cards
    Deck {
        /// Deck id
        id: i64,
        #[command(flatten)]
        list: ListOptions,
        #[command(flatten)]
        filters: CardFilters,
    },

    /// Show one card of a deck
    Card {
        /// Deck id
        deck: i64,
        /// Tarot index, 0-77
        index: i64,
    },

    /// Show every deck's card at one tarot index
    Tarot {
        /// Tarot index, 0-77
        index: i64,
        #[command(flatten)]
        list: ListOptions,
    },

    /// Show a random card
    RandomCard {
        /// Seed for a repeatable pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List spreads
    Spreads {
        #[command(flatten)]
        list: ListOptions,
        /// "small", "medium" or "large"
        #[arg(long)]
        size: Option<String>,
    },

    /// Lay out a reading
    #[command(alias = "r")]
    Reading {
        /// Spread id
        spread: i64,
        /// Deck id, defaults to the session deck
        deck: Option<i64>,
        /// Save string of an earlier reading, e.g. "0.0,21.1"
        #[arg(long)]
        cards: Option<String>,
        /// Seed for a repeatable draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Lay out a reading with a random spread and deck
    RandomReading {
        /// Seed for a repeatable draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Choose the deck for readings and lay out a spread with it
    Settings {
        /// Spread id
        spread: i64,
        /// Deck id to remember
        #[arg(long)]
        deck: Option<String>,
    },

    /// Previous and next occupied tarot index
    Neighbors {
        /// Tarot index, 0-77
        index: u8,
        /// Only consider this deck
        #[arg(long)]
        deck: Option<i64>,
    },
}

impl ListOptions {
    /// Starts from `--query` and lets explicit flags override it.
    pub fn to_options(&self) -> OptionSet {
        let mut options = self
            .query
            .as_deref()
            .map(OptionSet::from_query)
            .unwrap_or_default();
        set(&mut options, OptionKey::Page, &self.page);
        set(&mut options, OptionKey::Search, &self.search);
        options
    }
}

impl CardFilters {
    pub fn apply(&self, options: &mut OptionSet) {
        set(options, OptionKey::Deck, &self.deck);
        set(options, OptionKey::Cards, &self.cards);
        set(options, OptionKey::Suit, &self.suit);
        set(options, OptionKey::Rank, &self.rank);
        set(options, OptionKey::OrderBy, &self.order_by);
    }
}

pub fn set(options: &mut OptionSet, key: OptionKey, value: &Option<String>) {
    if let Some(value) = value {
        options.insert(key.as_str(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana::compile::{CardsChoice, OrderBy, RankChoice, SizeChoice};
    use arcana::options::OptionChoice;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = parse(&["arcana"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_override_query() {
        let cli = parse(&[
            "arcana",
            "cards",
            "--query",
            "cards=majors&page=3",
            "--page",
            "2",
            "--suit",
            "1",
        ]);
        let Some(Commands::Cards { list, filters }) = cli.command else {
            panic!("expected cards");
        };
        let mut options = list.to_options();
        filters.apply(&mut options);
        assert_eq!(options.get("page"), Some("2"));
        assert_eq!(options.get("cards"), Some("majors"));
        assert_eq!(options.get("suit"), Some("1"));
    }

    #[test]
    fn reading_takes_optional_deck_and_save_string() {
        let cli = parse(&["arcana", "reading", "3", "--cards", "0.0,21.1", "--no-color"]);
        assert!(cli.no_color);
        match cli.command {
            Some(Commands::Reading {
                spread, deck, cards, ..
            }) => {
                assert_eq!(spread, 3);
                assert_eq!(deck, None);
                assert_eq!(cards.as_deref(), Some("0.0,21.1"));
            }
            other => panic!("expected reading, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["arcana", "decks", "--data-dir", "/tmp/tarot", "-v"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/tarot")));
        assert!(cli.verbose);
    }

    fn flag_help(subcommand: &str, flag: &str) -> String {
        let cmd = Cli::command();
        let sub = cmd.find_subcommand(subcommand).unwrap();
        let arg = sub
            .get_arguments()
            .find(|a| a.get_long() == Some(flag))
            .unwrap();
        arg.get_help().unwrap().to_string()
    }

    fn names<C: OptionChoice>() -> Vec<&'static str> {
        C::VALUES.iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn choice_flags_list_accepted_values() {
        for (subcommand, flag, values) in [
            ("cards", "rank", names::<RankChoice>()),
            ("cards", "cards", names::<CardsChoice>()),
            ("cards", "order-by", names::<OrderBy>()),
            ("spreads", "size", names::<SizeChoice>()),
        ] {
            let help = flag_help(subcommand, flag);
            for value in values {
                assert!(help.contains(value), "--{} help {:?} lacks {}", flag, help, value);
            }
        }
    }

    #[test]
    fn neighbor_index_must_fit() {
        assert!(Cli::try_parse_from(["arcana", "neighbors", "300"]).is_err());
    }
}
