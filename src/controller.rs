//! Runs the computer player in the background while the front end keeps polling

use rand::seq::IteratorRandom;
use tracing::{debug, error, info, warn};

use std::time::Duration;

use crate::{
    board::{Board, BoardShape, Player},
    config::{Difficulty, Mode},
    error::Error,
    game::{GameState, Move},
    progress::{AiProgress, SharedProgress},
    solver::{SearchResult, Solver},
    task::{Task, TaskStatus},
};

/// How long a reset waits for an outstanding search before abandoning it
pub const RESET_JOIN_TIMEOUT: Duration = Duration::from_millis(100);

/// How the computer picks its moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// A uniformly random playable column
    Random,
    Minimax { depth: u8, parallel: bool },
}

impl Strategy {
    pub fn from_difficulty(difficulty: Difficulty, parallel: bool) -> Self {
        if difficulty.is_random() {
            Strategy::Random
        } else {
            Strategy::Minimax {
                depth: difficulty.depth(),
                parallel,
            }
        }
    }

    /// Chooses a column for `player`, reporting to `progress`
    pub fn choose(&self, board: &Board, player: Player, progress: &SharedProgress) -> SearchResult {
        match *self {
            Strategy::Random => {
                let column = board.legal_columns().choose(&mut rand::thread_rng());
                progress.finish();
                SearchResult { column, score: 0 }
            }
            Strategy::Minimax { depth, parallel } => {
                let mut solver = Solver::new(player).with_progress(progress.clone());
                if parallel {
                    solver.choose_move_parallel(board, depth)
                } else {
                    solver.choose_move(board, depth)
                }
            }
        }
    }
}

/// Drives the computer player of one game
///
/// At most one search is in flight at a time. The search works on a copy of
/// the board taken when it starts and only shares its [`AiProgress`] with the
/// caller; the chosen column is applied to the game by the caller's thread.
/// Callers must not change the game while [`AiController::is_computing`].
pub struct AiController {
    mode: Mode,
    strategy: Strategy,
    progress: SharedProgress,
    task: Option<Task<SearchResult>>,
}

impl AiController {
    pub fn new(mode: Mode, strategy: Strategy, columns: usize) -> Self {
        Self {
            mode,
            strategy,
            progress: SharedProgress::new(columns),
            task: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Takes effect from the next search
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn is_computing(&self) -> bool {
        self.task.is_some()
    }

    pub fn is_computer_turn(&self, game: &GameState) -> bool {
        !game.is_over() && self.mode.is_computer(game.turn())
    }

    /// A snapshot of the running (or last) search
    pub fn progress(&self) -> AiProgress {
        self.progress.snapshot()
    }

    /// Starts searching a move for the player to move in `game`
    ///
    /// Refused while another search is pending or once the game is over.
    pub fn start_search(&mut self, game: &GameState) -> Result<(), Error> {
        if self.task.is_some() {
            return Err(Error::SearchPending);
        }
        if game.is_over() {
            return Err(Error::GameOver);
        }

        let board = game.board().clone();
        let player = game.turn();
        let strategy = self.strategy;
        self.progress.reset(board.cols());
        let progress = self.progress.clone();

        let task = Task::spawn("search", move || strategy.choose(&board, player, &progress))
            .map_err(Error::Spawn)?;
        self.task = Some(task);
        debug!(player = player.number(), ?strategy, "search started");
        Ok(())
    }

    /// The column chosen by the pending search, once it is finished
    ///
    /// Returns `None` while the search is running, when no search was started
    /// and when the search found no playable column.
    pub fn poll_search_result(&mut self) -> Option<usize> {
        let status = self.task.as_mut()?.poll();
        match status {
            TaskStatus::Pending => None,
            TaskStatus::Done(result) => {
                self.task = None;
                if result.column.is_none() {
                    warn!("search finished without a playable column");
                }
                result.column
            }
            TaskStatus::Lost => {
                self.task = None;
                error!("search thread ended without a result");
                None
            }
        }
    }

    /// Runs one frame of the computer's turn
    ///
    /// Starts a search when the computer is to move and none is running, and
    /// plays the chosen column once it is ready. Returns the move played.
    pub fn update(&mut self, game: &mut GameState) -> Option<Move> {
        if !self.is_computing() {
            if self.is_computer_turn(game) {
                if let Err(err) = self.start_search(game) {
                    error!(%err, "could not start the computer's move");
                }
            }
            return None;
        }

        let column = self.poll_search_result()?;
        match game.apply_move(column) {
            Ok(m) => Some(m),
            Err(err) => {
                error!(%err, column, "computer chose an unplayable column");
                None
            }
        }
    }

    /// Waits briefly for a pending search, then drops it
    ///
    /// Returns `false` if the search was still running; its result goes
    /// nowhere since the progress report is replaced as well.
    pub fn discard_search(&mut self, columns: usize) -> bool {
        let finished = match self.task.take() {
            Some(task) => task.join(RESET_JOIN_TIMEOUT).is_some(),
            None => true,
        };
        if !finished {
            warn!("abandoned a search that was still running");
        }
        self.progress = SharedProgress::new(columns);
        finished
    }

    /// Starts a new game, abandoning any pending search
    pub fn reset_game(
        &mut self,
        shape: BoardShape,
        mode: Mode,
        strategy: Strategy,
        starting_player: Player,
    ) -> GameState {
        self.discard_search(shape.columns());
        self.mode = mode;
        self.strategy = strategy;
        info!(
            rows = shape.rows(),
            columns = shape.columns(),
            ?mode,
            ?strategy,
            "new game"
        );
        GameState::new(shape, starting_player)
    }
}
