//! Detection of four-in-a-row lines

use crate::{
    board::{Board, BoardShape, Player},
    CONNECT,
};

/// A cell position, row 0 being the bottom row
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The cells of a completed line
pub type WinningRun = [Coord; CONNECT];

// (row step, column step) for each line orientation, in scan order:
// horizontal, vertical, falling diagonal, rising diagonal
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

/// Every line of `CONNECT` cells on a board of `shape`
///
/// Lines are produced orientation by orientation in the order horizontal,
/// vertical, falling diagonal, rising diagonal. Within an orientation start
/// cells go from the top row down, and left to right along each row.
/// Vertical and rising lines list their cells bottom-up, horizontal and
/// falling lines left to right.
pub fn windows(shape: BoardShape) -> impl Iterator<Item = WinningRun> {
    let (rows, columns) = (shape.rows() as isize, shape.columns() as isize);
    let reach = CONNECT as isize - 1;

    DIRECTIONS.into_iter().flat_map(move |(d_row, d_column)| {
        // restrict start cells so that the last cell is still on the board
        let row_range = if d_row < 0 {
            reach..rows
        } else {
            0..rows - reach * d_row
        };
        let column_range = 0..columns - reach * d_column;

        row_range.rev().flat_map(move |row| {
            column_range.clone().map(move |column| {
                let mut run = [Coord::new(0, 0); CONNECT];
                for (i, cell) in run.iter_mut().enumerate() {
                    let i = i as isize;
                    *cell = Coord::new((row + i * d_row) as usize, (column + i * d_column) as usize);
                }
                run
            })
        })
    })
}

/// Finds the first line of four equal pieces on `board`, in [`windows`] order
pub fn find_winning_run(board: &Board) -> Option<WinningRun> {
    windows(board.shape()).find(|run| {
        let first = board.get(run[0].row, run[0].column);
        !first.is_empty()
            && run[1..]
                .iter()
                .all(|coord| board.get(coord.row, coord.column) == first)
    })
}

/// The player owning a line found by [`find_winning_run`]
pub fn winner(board: &Board, run: &WinningRun) -> Option<Player> {
    board.get(run[0].row, run[0].column).player()
}

/// A board is terminal once somebody has won or no column is playable
pub fn is_terminal(board: &Board) -> bool {
    board.is_full() || find_winning_run(board).is_some()
}
