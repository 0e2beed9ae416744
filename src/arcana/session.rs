//! Per-user session state.
//!
//! The only value carried between requests is the deck chosen for readings.
//! It lives in `session.json` next to the config. Commands never touch the
//! file; they take the selected deck as an argument and return the new one.

use crate::error::{ArcanaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<i64>,
}

impl Session {
    /// A missing or unreadable session is an empty one.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let path = dir.as_ref().join(SESSION_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable session");
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(ArcanaError::Io)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(ArcanaError::Serialization)?;
        fs::write(dir.join(SESSION_FILENAME), content).map_err(ArcanaError::Io)?;
        Ok(())
    }

    /// The selected deck, or `default_deck_id` when none was chosen.
    pub fn deck_or(&self, default_deck_id: i64) -> i64 {
        self.deck.unwrap_or(default_deck_id)
    }
}
