//! A depth-limited minimax agent to play Connect 4

use rand::seq::IteratorRandom;
use rayon::prelude::*;
use tracing::debug;

use crate::{
    board::{Board, Player},
    evaluator,
    progress::{ColumnScore, SharedProgress},
    win::{find_winning_run, winner},
};

/// The score of a position won by the searching player
///
/// Wins are not discounted by distance, so a win in one move and a win in
/// five moves score the same.
pub const WIN_SCORE: i32 = 100_000_000;

/// The outcome of a search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// The chosen column, `None` if no column is playable
    pub column: Option<usize>,
    /// Score from the point of view of the player the search was run for
    pub score: i32,
}

impl SearchResult {
    pub const NO_MOVE: SearchResult = SearchResult {
        column: None,
        score: 0,
    };
}

/// An agent choosing moves for one player with minimax and alpha-beta pruning
///
/// # Notes
/// The search runs on its own copy of the board, placing and removing pieces
/// as it walks the tree. The only state it shares with other threads is the
/// optional [`SharedProgress`] it reports to.
///
/// # Position Scoring
/// Positions won by the searching player score [`WIN_SCORE`], lost positions
/// `-WIN_SCORE` and drawn positions 0. When the depth budget runs out on an
/// undecided position it is scored with [`evaluator::score`].
#[derive(Clone)]
pub struct Solver {
    root: Player,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
    progress: Option<SharedProgress>,
}

impl Solver {
    /// Creates a new `Solver` choosing moves for `root`
    pub fn new(root: Player) -> Self {
        Self {
            root,
            node_count: 0,
            progress: None,
        }
    }

    /// Adds a progress report to an existing `Solver`
    pub fn with_progress(mut self, progress: SharedProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn root(&self) -> Player {
        self.root
    }

    /// Performs game tree search
    ///
    /// `board` is left unchanged on return. Returns the best column for the
    /// side to move (the root player when `maximizing`) and its score.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.node_count += 1;
        if let Some(progress) = &self.progress {
            progress.tick();
        }

        if let Some(run) = find_winning_run(board) {
            let score = if winner(board, &run) == Some(self.root) {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
            return SearchResult {
                column: None,
                score,
            };
        }
        if board.is_full() {
            return SearchResult::NO_MOVE;
        }
        if depth == 0 {
            return SearchResult {
                column: None,
                score: evaluator::score(board, self.root),
            };
        }

        // random fallback, always replaced by the first evaluated child
        let fallback = match board.legal_columns().choose(&mut rand::thread_rng()) {
            Some(column) => column,
            None => return SearchResult::NO_MOVE,
        };

        let player = if maximizing {
            self.root
        } else {
            self.root.opponent()
        };
        let mut best = SearchResult {
            column: Some(fallback),
            score: if maximizing { i32::MIN } else { i32::MAX },
        };

        for column in 0..board.cols() {
            // skip full columns
            if board.place(column, player).is_err() {
                continue;
            }
            let score = self
                .search(board, depth - 1, alpha, beta, !maximizing)
                .score;
            board.take(column);

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        column: Some(column),
                        score,
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        column: Some(column),
                        score,
                    };
                }
                beta = beta.min(best.score);
            }
            // the other side will never let the game reach this branch
            if alpha >= beta {
                break;
            }
        }

        best
    }

    /// Scores every top-level column and returns the best one
    ///
    /// Each playable column is searched `depth - 1` plies deeper and its score
    /// is published to the progress report as soon as it is known; full
    /// columns are published as [`ColumnScore::NotApplicable`]. Ties go to the
    /// lowest column.
    pub fn choose_move(&mut self, board: &Board, depth: u8) -> SearchResult {
        let mut board = board.clone();
        let legal = board.legal_columns().count();
        if let Some(progress) = &self.progress {
            progress.reset(board.cols());
        }

        let mut scores = Vec::with_capacity(legal);
        for column in 0..board.cols() {
            if let Some(progress) = &self.progress {
                let percent = scores.len() as f32 / legal.max(1) as f32 * 100.0;
                progress.begin_column(column, Some(percent));
            }
            if board.place(column, self.root).is_err() {
                self.publish(column, ColumnScore::NotApplicable);
                continue;
            }
            let score = self
                .search(
                    &mut board,
                    depth.saturating_sub(1),
                    i32::MIN,
                    i32::MAX,
                    false,
                )
                .score;
            board.take(column);

            self.publish(column, ColumnScore::Scored(score));
            scores.push((column, score));
        }

        self.finish(scores)
    }

    /// Same as [`Solver::choose_move`] but scores the top-level columns in
    /// parallel, one task per column
    pub fn choose_move_parallel(&mut self, board: &Board, depth: u8) -> SearchResult {
        if let Some(progress) = &self.progress {
            progress.reset(board.cols());
        }

        let template = Solver {
            root: self.root,
            node_count: 0,
            progress: self.progress.clone(),
        };
        let results: Vec<(usize, Option<i32>, usize)> = (0..board.cols())
            .into_par_iter()
            .map(|column| {
                let mut next = template.clone();
                let mut board = board.clone();
                if let Some(progress) = &next.progress {
                    progress.begin_column(column, None);
                }
                if board.place(column, next.root).is_err() {
                    next.publish(column, ColumnScore::NotApplicable);
                    return (column, None, 0);
                }
                let score = next
                    .search(
                        &mut board,
                        depth.saturating_sub(1),
                        i32::MIN,
                        i32::MAX,
                        false,
                    )
                    .score;
                next.publish(column, ColumnScore::Scored(score));
                (column, Some(score), next.node_count)
            })
            .collect();

        let mut scores = Vec::with_capacity(results.len());
        for (column, score, node_count) in results {
            self.node_count += node_count;
            if let Some(score) = score {
                scores.push((column, score));
            }
        }

        self.finish(scores)
    }

    fn publish(&self, column: usize, score: ColumnScore) {
        if let Some(progress) = &self.progress {
            progress.publish(column, score);
        }
    }

    /// Picks the first maximum of `scores`, which are in ascending column order
    fn finish(&self, scores: Vec<(usize, i32)>) -> SearchResult {
        if let Some(progress) = &self.progress {
            progress.finish();
        }

        let mut best: Option<SearchResult> = None;
        for (column, score) in scores {
            if best.map_or(true, |best| score > best.score) {
                best = Some(SearchResult {
                    column: Some(column),
                    score,
                });
            }
        }

        let result = best.unwrap_or(SearchResult::NO_MOVE);
        debug!(
            player = self.root.number(),
            column = ?result.column,
            score = result.score,
            nodes = self.node_count,
            "search finished"
        );
        result
    }
}
