//! Game settings and their JSON file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{
    board::{BoardShape, Player},
    controller::Strategy,
    error::Error,
    MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS,
};

/// Default location of the settings file
pub const CONFIG_PATH: &str = "config.json";

/// The deepest search the settings accept
pub const MAX_DEPTH: u8 = 9;

/// Which players are controlled by the computer
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The computer plays both sides
    ComputerOnly,
    /// Player one is human, player two is the computer
    VersusComputer,
    TwoPlayers,
}

impl Mode {
    pub fn is_computer(&self, player: Player) -> bool {
        match self {
            Mode::ComputerOnly => true,
            Mode::VersusComputer => player == Player::Two,
            Mode::TwoPlayers => false,
        }
    }

    /// The mode with `humans` human players
    pub fn from_humans(humans: usize) -> Option<Self> {
        match humans {
            0 => Some(Mode::ComputerOnly),
            1 => Some(Mode::VersusComputer),
            2 => Some(Mode::TwoPlayers),
            _ => None,
        }
    }
}

/// Search depth of the computer player, 0 meaning random moves
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const RANDOM: Difficulty = Difficulty(0);
    pub const EASY: Difficulty = Difficulty(2);
    pub const MEDIUM: Difficulty = Difficulty(4);
    pub const HARD: Difficulty = Difficulty(5);

    const PRESETS: [Difficulty; 4] = [
        Difficulty::RANDOM,
        Difficulty::EASY,
        Difficulty::MEDIUM,
        Difficulty::HARD,
    ];

    pub fn new(depth: u8) -> Result<Self, Error> {
        if depth > MAX_DEPTH {
            return Err(Error::InvalidDepth { depth });
        }
        Ok(Self(depth))
    }

    pub fn depth(&self) -> u8 {
        self.0
    }

    pub fn is_random(&self) -> bool {
        self.0 == 0
    }

    /// The next preset, wrapping around; custom depths move on to medium
    pub fn next(self) -> Self {
        let index = Self::PRESETS
            .iter()
            .position(|&preset| preset == self)
            .unwrap_or(1);
        Self::PRESETS[(index + 1) % Self::PRESETS.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Difficulty::RANDOM => write!(f, "Random"),
            Difficulty::EASY => write!(f, "Easy ({})", self.0),
            Difficulty::MEDIUM => write!(f, "Medium ({})", self.0),
            Difficulty::HARD => write!(f, "Hard ({})", self.0),
            _ => write!(f, "Custom ({})", self.0),
        }
    }
}

/// Settings for a new game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub starting_player: Player,
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// Score the top-level columns on all cores
    pub parallel_search: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 9,
            starting_player: Player::One,
            mode: Mode::VersusComputer,
            difficulty: Difficulty::EASY,
            parallel_search: false,
        }
    }
}

impl GameConfig {
    /// Reads the settings at `path`, writing the defaults there first if the
    /// file does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!(path = %path.display(), "created default configuration");
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.shape()?;
        Difficulty::new(self.difficulty.depth())?;
        Ok(())
    }

    pub fn shape(&self) -> Result<BoardShape, Error> {
        BoardShape::new(self.rows, self.columns)
    }

    pub fn strategy(&self) -> Strategy {
        Strategy::from_difficulty(self.difficulty, self.parallel_search)
    }

    pub fn adjust_rows(&mut self, delta: isize) {
        self.rows = clamp_add(self.rows, delta, MIN_ROWS, MAX_ROWS);
    }

    pub fn adjust_columns(&mut self, delta: isize) {
        self.columns = clamp_add(self.columns, delta, MIN_COLUMNS, MAX_COLUMNS);
    }

    pub fn toggle_starting_player(&mut self) {
        self.starting_player = self.starting_player.opponent();
    }
}

fn clamp_add(value: usize, delta: isize, min: usize, max: usize) -> usize {
    let value = value as isize + delta;
    value.clamp(min as isize, max as isize) as usize
}
