//! Saved games: settings plus the ordered move list

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use std::fs;
use std::path::{Path, PathBuf};

use crate::{config::GameConfig, error::Error, game::GameState, game::Move};

const SAVE_PREFIX: &str = "save_";
const SAVE_EXTENSION: &str = ".json";

/// A new game identifier from the local time, `YYYYmmdd_HHMMSS`
///
/// Identifiers sort in the order the games were started.
pub fn new_game_id() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Everything needed to rebuild a game exactly
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SavedGame {
    pub id: String,
    pub config: GameConfig,
    pub history: Vec<Move>,
}

impl SavedGame {
    /// Records `game` with the settings it is played under
    ///
    /// The board shape and starting player are taken from the game itself.
    pub fn capture(id: &str, config: &GameConfig, game: &GameState) -> Self {
        let shape = game.board().shape();
        Self {
            id: id.to_string(),
            config: GameConfig {
                rows: shape.rows(),
                columns: shape.columns(),
                starting_player: game.starting_player(),
                ..*config
            },
            history: game.history().to_vec(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}{}{}", SAVE_PREFIX, self.id, SAVE_EXTENSION)
    }

    /// Writes the save into `directory`, returning the file path
    pub fn write_to<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf> {
        let path = directory.as_ref().join(self.file_name());
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), moves = self.history.len(), "saved game");
        Ok(path)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let save: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        save.config
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(save)
    }

    /// The most recent save in `directory`, if any
    pub fn latest_in<P: AsRef<Path>>(directory: P) -> Result<Option<PathBuf>> {
        let directory = directory.as_ref();
        let mut latest: Option<PathBuf> = None;
        for entry in fs::read_dir(directory)
            .with_context(|| format!("failed to list {}", directory.display()))?
        {
            let path = entry?.path();
            let is_save = path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| {
                    name.starts_with(SAVE_PREFIX) && name.ends_with(SAVE_EXTENSION)
                });
            if is_save && latest.as_ref().map_or(true, |latest| path > *latest) {
                latest = Some(path);
            }
        }
        Ok(latest)
    }

    /// Replays the recorded moves
    pub fn restore(&self) -> Result<GameState, Error> {
        let shape = self.config.shape()?;
        let game = GameState::reconstruct_from_moves(&self.history, shape, self.config.starting_player)?;
        Ok(game)
    }
}
