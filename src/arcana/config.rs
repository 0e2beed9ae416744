use crate::draw::DEFAULT_REVERSAL_CHANCE;
use crate::error::{ArcanaError, Result};
use crate::layout::LayoutConfig;
use crate::pager::Paginator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DECK_ID: i64 = 1;
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_PAGE_ORPHANS: usize = 3;

/// Configuration for arcana, stored in `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcanaConfig {
    /// Deck used when no deck was selected for the session
    #[serde(default = "default_deck_id")]
    pub default_deck_id: i64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// A last page this short is merged into the one before it
    #[serde(default = "default_page_orphans")]
    pub page_orphans: usize,

    #[serde(default)]
    pub layout: LayoutConfig,

    /// Probability that a randomly drawn card lands reversed
    #[serde(default = "default_reversal_chance")]
    pub reversal_chance: f64,
}

fn default_deck_id() -> i64 {
    DEFAULT_DECK_ID
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_orphans() -> usize {
    DEFAULT_PAGE_ORPHANS
}

fn default_reversal_chance() -> f64 {
    DEFAULT_REVERSAL_CHANCE
}

impl Default for ArcanaConfig {
    fn default() -> Self {
        Self {
            default_deck_id: DEFAULT_DECK_ID,
            page_size: DEFAULT_PAGE_SIZE,
            page_orphans: DEFAULT_PAGE_ORPHANS,
            layout: LayoutConfig::default(),
            reversal_chance: DEFAULT_REVERSAL_CHANCE,
        }
    }
}

impl ArcanaConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ArcanaError::Io)?;
        let config: ArcanaConfig =
            serde_json::from_str(&content).map_err(ArcanaError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ArcanaError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ArcanaError::Serialization)?;
        fs::write(config_path, content).map_err(ArcanaError::Io)?;
        Ok(())
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page_size, self.page_orphans)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ArcanaError::Config("page_size must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.reversal_chance) {
            return Err(ArcanaError::Config(format!(
                "reversal_chance must be between 0 and 1, got {}",
                self.reversal_chance
            )));
        }
        if !(self.layout.aspect_ratio > 0.0 && self.layout.aspect_ratio.is_finite()) {
            return Err(ArcanaError::Config(
                "layout.aspect_ratio must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}
