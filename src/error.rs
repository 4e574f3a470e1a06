//! Error types for the game engine

use thiserror::Error;

use crate::board::Player;

/// Errors raised by the board, game state and search controller
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "invalid board shape {rows}x{columns}: rows must be between {} and {}, columns between {} and {}",
        crate::MIN_ROWS,
        crate::MAX_ROWS,
        crate::MIN_COLUMNS,
        crate::MAX_COLUMNS
    )]
    InvalidShape { rows: usize, columns: usize },

    #[error("invalid move, column {column} out of range, the board has {columns} columns")]
    InvalidColumn { column: usize, columns: usize },

    #[error("invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("game already over")]
    GameOver,

    #[error("invalid search depth {depth}, must be at most {}", crate::config::MAX_DEPTH)]
    InvalidDepth { depth: u8 },

    #[error("a search is already running for this turn")]
    SearchPending,

    #[error("failed to start the search thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// A recorded move history that cannot be replayed onto an empty board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("move {index}: column {column} is out of range")]
    ColumnOutOfRange { index: usize, column: usize },

    #[error("move {index}: row {row} is out of range")]
    RowOutOfRange { index: usize, row: usize },

    #[error("move {index}: cell ({row}, {column}) is already occupied")]
    CellOccupied {
        index: usize,
        column: usize,
        row: usize,
    },

    #[error("move {index}: cell ({row}, {column}) has an empty cell below it")]
    FloatingPiece {
        index: usize,
        column: usize,
        row: usize,
    },

    #[error("move {index}: played by {found} but it was {expected}'s turn")]
    OutOfTurn {
        index: usize,
        expected: Player,
        found: Player,
    },

    #[error("move {index}: the game was already over")]
    MoveAfterGameOver { index: usize },
}
