//! A computer opponent and game engine for 'Connect 4' on a configurable grid
//!
//! The computer plays with a depth-limited minimax search with alpha-beta
//! pruning and a sliding-window heuristic. Searches run on a background
//! thread and publish live progress that a front end can poll every frame.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_ai::{board::{BoardShape, Player}, game::GameState, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = GameState::new(BoardShape::new(6, 7)?, Player::One);
//! game.play_columns(&[0, 0, 1, 1, 2, 2])?;
//!
//! let mut solver = Solver::new(game.turn());
//! let result = solver.choose_move(game.board(), 2);
//!
//! assert_eq!(result.column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod win;

pub mod evaluator;

pub mod progress;

pub mod solver;

pub mod task;

pub mod game;

pub mod controller;

pub mod config;

pub mod save;


pub use error::{Error, ReplayError};

/// The number of equal pieces in a line needed to win
pub const CONNECT: usize = 4;

/// The smallest allowed number of rows
pub const MIN_ROWS: usize = 4;
/// The largest allowed number of rows
pub const MAX_ROWS: usize = 12;

/// The smallest allowed number of columns
pub const MIN_COLUMNS: usize = 4;
/// The largest allowed number of columns
pub const MAX_COLUMNS: usize = 15;

// every board must fit at least one winning line in each direction
const_assert!(MIN_ROWS >= CONNECT && MIN_COLUMNS >= CONNECT);
const_assert!(MIN_ROWS <= MAX_ROWS && MIN_COLUMNS <= MAX_COLUMNS);
