//! Heuristic scoring of non-terminal positions

use crate::{
    board::{Board, Cell, Player},
    win::{windows, WinningRun},
};

/// Bonus for each of a player's pieces in the centre column
pub const CENTRE_WEIGHT: i32 = 3;

const OWN_FOUR: i32 = 100;
const OWN_THREE: i32 = 5;
const OWN_TWO: i32 = 2;
const OPPONENT_THREE: i32 = -4;
const OPPONENT_TWO: i32 = -1;

/// Scores `board` from the point of view of `player`
///
/// Central pieces are rewarded, then every line of four cells in all four
/// orientations adds a weight depending on how many of the player's and the
/// opponent's pieces it holds (see [`score_window`]).
pub fn score(board: &Board, player: Player) -> i32 {
    let centre = board.cols() / 2;
    let own = Cell::from(player);

    let centre_count = (0..board.rows())
        .filter(|&row| board.get(row, centre) == own)
        .count() as i32;

    let windows_score: i32 = windows(board.shape())
        .map(|run| score_window(board, &run, player))
        .sum();

    centre_count * CENTRE_WEIGHT + windows_score
}

/// The weight of a single line of four cells for `player`
pub fn score_window(board: &Board, run: &WinningRun, player: Player) -> i32 {
    let (mut own, mut opponent, mut empty) = (0, 0, 0);
    for coord in run.iter() {
        match board.get(coord.row, coord.column).player() {
            Some(owner) if owner == player => own += 1,
            Some(_) => opponent += 1,
            None => empty += 1,
        }
    }

    let mut score = match (own, empty) {
        (4, _) => OWN_FOUR,
        (3, 1) => OWN_THREE,
        (2, 2) => OWN_TWO,
        _ => 0,
    };
    score += match (opponent, empty) {
        (3, 1) => OPPONENT_THREE,
        (2, 2) => OPPONENT_TWO,
        _ => 0,
    };
    score
}
