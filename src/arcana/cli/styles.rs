use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style names the templates refer to.
pub mod names {
    pub const TITLE: &str = "title";
    pub const HEADING: &str = "heading";
    pub const INDEX: &str = "index";
    pub const ID: &str = "id";
    pub const MUTED: &str = "muted";
    pub const REVERSED: &str = "reversed";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

pub static ARCANA_THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        (names::TITLE, Style::new().bold()),
        (names::HEADING, Style::new().cyan()),
        (names::INDEX, Style::new().yellow()),
        (names::ID, Style::new().dim()),
        (names::MUTED, Style::new().color256(246).italic()),
        (names::REVERSED, Style::new().magenta()),
        (names::INFO, Style::new()),
        (names::SUCCESS, Style::new().green()),
        (names::WARNING, Style::new().yellow()),
        (names::ERROR, Style::new().red().bold()),
    ])
});
