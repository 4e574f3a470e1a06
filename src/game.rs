//! The authoritative game: board, turn, history and outcome

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    board::{Board, BoardShape, Player},
    error::{Error, ReplayError},
    win::{find_winning_run, winner, WinningRun},
};

/// Where a piece landed
///
/// Serialized as a `[column, row, player]` triple.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "(usize, usize, Player)", into = "(usize, usize, Player)")]
pub struct Move {
    pub column: usize,
    pub row: usize,
    pub player: Player,
}

impl From<(usize, usize, Player)> for Move {
    fn from((column, row, player): (usize, usize, Player)) -> Self {
        Self {
            column,
            row,
            player,
        }
    }
}

impl From<Move> for (usize, usize, Player) {
    fn from(m: Move) -> Self {
        (m.column, m.row, m.player)
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Status {
    Playing,
    Won { player: Player, run: WinningRun },
    Draw,
}

/// A game in progress, with undo and redo
///
/// The board always equals the moves of `history` replayed in order onto an
/// empty board. Moves removed by [`GameState::undo`] wait in a redo buffer
/// until they are redone or a new move is played.
///
/// The search controller works on a copy of the board, so a `GameState` must
/// not be mutated from another thread; callers hold off moves, undo, redo and
/// resets while a search for this game is running.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    starting_player: Player,
    turn: Player,
    history: Vec<Move>,
    redo: Vec<Move>,
    status: Status,
}

impl GameState {
    pub fn new(shape: BoardShape, starting_player: Player) -> Self {
        Self {
            board: Board::new(shape),
            starting_player,
            turn: starting_player,
            history: Vec::new(),
            redo: Vec::new(),
            status: Status::Playing,
        }
    }

    /// Rebuilds a game by replaying `moves` onto an empty board of `shape`
    ///
    /// Every move must land exactly where gravity puts it, in turn order,
    /// before the game is decided.
    pub fn reconstruct_from_moves(
        moves: &[Move],
        shape: BoardShape,
        starting_player: Player,
    ) -> Result<Self, ReplayError> {
        let mut game = Self::new(shape, starting_player);
        for (index, &m) in moves.iter().enumerate() {
            if let Err(err) = game.replay(index, m) {
                warn!(%err, "rejected move history");
                return Err(err);
            }
        }
        Ok(game)
    }

    fn replay(&mut self, index: usize, m: Move) -> Result<(), ReplayError> {
        if self.is_over() {
            return Err(ReplayError::MoveAfterGameOver { index });
        }
        if m.column >= self.board.cols() {
            return Err(ReplayError::ColumnOutOfRange {
                index,
                column: m.column,
            });
        }
        if m.row >= self.board.rows() {
            return Err(ReplayError::RowOutOfRange { index, row: m.row });
        }
        if m.player != self.turn {
            return Err(ReplayError::OutOfTurn {
                index,
                expected: self.turn,
                found: m.player,
            });
        }
        match self.board.empty_cell_of(m.column) {
            Some(row) if row == m.row => {}
            Some(row) if row < m.row => {
                return Err(ReplayError::FloatingPiece {
                    index,
                    column: m.column,
                    row: m.row,
                })
            }
            _ => {
                return Err(ReplayError::CellOccupied {
                    index,
                    column: m.column,
                    row: m.row,
                })
            }
        }

        self.board
            .place(m.column, m.player)
            .map_err(|_| ReplayError::CellOccupied {
                index,
                column: m.column,
                row: m.row,
            })?;
        self.history.push(m);
        self.settle(m.player);
        Ok(())
    }

    /// Replays the history onto a board of a different shape
    pub fn reshape(&self, shape: BoardShape) -> Result<Self, ReplayError> {
        Self::reconstruct_from_moves(&self.history, shape, self.starting_player)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move next (the winner once the game is won)
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Undone moves, the next one to redo last
    pub fn redo_buffer(&self) -> &[Move] {
        &self.redo
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Playing
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            Status::Won { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn winning_run(&self) -> Option<&WinningRun> {
        match &self.status {
            Status::Won { run, .. } => Some(run),
            _ => None,
        }
    }

    /// Drops a piece for the player to move into `column`
    ///
    /// Nothing changes if the game is over or the column cannot take a piece.
    pub fn apply_move(&mut self, column: usize) -> Result<Move, Error> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let player = self.turn;
        let row = self.board.place(column, player)?;
        let m = Move {
            column,
            row,
            player,
        };
        self.history.push(m);
        self.redo.clear();
        self.settle(player);
        Ok(m)
    }

    /// Plays `columns` one after another, stopping at the first rejected move
    pub fn play_columns(&mut self, columns: &[usize]) -> Result<(), Error> {
        for &column in columns {
            self.apply_move(column)?;
        }
        Ok(())
    }

    /// Takes back the last move, returning it
    ///
    /// The game is always back in play afterwards.
    pub fn undo(&mut self) -> Option<Move> {
        let m = self.history.pop()?;
        self.board.take(m.column);
        self.turn = m.player;
        self.status = Status::Playing;
        self.redo.push(m);
        Some(m)
    }

    /// Plays the last undone move again, returning it
    pub fn redo(&mut self) -> Option<Move> {
        let m = self.redo.pop()?;
        if self.board.empty_cell_of(m.column) != Some(m.row) || self.is_over() {
            // the buffer no longer matches the board
            self.redo.clear();
            return None;
        }
        self.board.place(m.column, m.player).ok()?;
        self.history.push(m);
        self.settle(m.player);
        Some(m)
    }

    // re-evaluates the outcome after `mover` placed a piece
    fn settle(&mut self, mover: Player) {
        if let Some(run) = find_winning_run(&self.board) {
            self.status = Status::Won {
                player: winner(&self.board, &run).unwrap_or(mover),
                run,
            };
        } else if self.board.is_full() {
            self.status = Status::Draw;
        } else {
            self.turn = mover.opponent();
        }
    }
}
