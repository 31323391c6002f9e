use bevy::log::{debug, error, warn};
use bevy::prelude::Resource;
use bits_helpers::storage::Storage;

use crate::progress::Progress;

pub const STORAGE_KEY: &str = "hinkalmania_game_state";

/// Loads and saves the [`Progress`] record through a storage backend.
#[derive(Resource)]
pub struct ProgressStore {
    storage: Box<dyn Storage>,
}

impl ProgressStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Stored progress, or the default record when nothing usable is stored.
    pub fn load(&self) -> Progress {
        let stored = match self.storage.read(STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("No saved progress, starting fresh");
                return Progress::default();
            }
            Err(err) => {
                warn!("Could not read saved progress: {err}");
                return Progress::default();
            }
        };

        decode(&stored).unwrap_or_else(|err| {
            warn!("Saved progress is corrupted, starting fresh: {err}");
            Progress::default()
        })
    }

    pub fn save(&self, progress: &Progress) {
        let encoded = match encode(progress) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!("Could not encode progress: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(STORAGE_KEY, &encoded) {
            error!("Could not save progress: {err}");
        }
    }
}

pub fn encode(progress: &Progress) -> serde_json::Result<String> {
    serde_json::to_string(progress)
}

/// Parses a stored record over the defaults and normalizes it.
pub fn decode(stored: &str) -> serde_json::Result<Progress> {
    let mut progress: Progress = serde_json::from_str(stored)?;
    progress.normalize();
    Ok(progress)
}
