//! Last-used round settings
//!
//! Persisted separately from the scoreboard, one raw string per key, so the
//! start screen can prefill its form.

use crate::persistence::{Storage, StorageError, read_item};
use crate::sim::Difficulty;

/// Settings the start screen remembers between visits
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Background music source; `None` plays the bundled track
    pub audio_url: Option<String>,
}

impl Settings {
    const DIFFICULTY_KEY: &'static str = "truttihunt-difficulty";
    const AUDIO_URL_KEY: &'static str = "truttihunt-audio-url";

    /// Load settings. Missing keys and unknown tiers fall back to defaults.
    pub fn load(storage: &dyn Storage) -> Self {
        let difficulty = read_item(storage, Self::DIFFICULTY_KEY)
            .map(|s| Difficulty::parse_or_default(&s))
            .unwrap_or_default();
        let audio_url = read_item(storage, Self::AUDIO_URL_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            difficulty,
            audio_url,
        }
    }

    /// Save settings. A blank audio url clears the stored one.
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        storage.set_item(Self::DIFFICULTY_KEY, self.difficulty.as_str())?;

        match self.audio_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => storage.set_item(Self::AUDIO_URL_KEY, url)?,
            _ => storage.remove_item(Self::AUDIO_URL_KEY)?,
        }

        log::info!("Settings saved");
        Ok(())
    }
}
