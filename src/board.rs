//! Grid representation with gravity-filled columns

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::{error::Error, MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS};

/// One of the two sides of a game
///
/// Serialized as `1` or `2`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The 1-based number of this player
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(format!("invalid player {}, expected 1 or 2", value)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// Validated board dimensions
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BoardShape {
    rows: usize,
    columns: usize,
}

impl BoardShape {
    pub fn new(rows: usize, columns: usize) -> Result<Self, Error> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows) || !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns)
        {
            return Err(Error::InvalidShape { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    /// The standard 6 row, 7 column board
    pub fn standard() -> Self {
        Self {
            rows: 6,
            columns: 7,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// A `rows × columns` grid where pieces fall to the lowest empty cell of a column
///
/// Row 0 is the bottom row. Every column is a contiguous run of pieces
/// starting at row 0, so the height of a column is also the row its next
/// piece lands in.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    shape: BoardShape,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    num_moves: usize,
}

impl Board {
    pub fn new(shape: BoardShape) -> Self {
        Self {
            shape,
            cells: vec![Cell::Empty; shape.rows * shape.columns],
            heights: vec![0; shape.columns],
            num_moves: 0,
        }
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.columns
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Returns the cell at `row`, `column`
    ///
    /// # Panics
    /// If the coordinates are outside the board
    pub fn get(&self, row: usize, column: usize) -> Cell {
        assert!(row < self.rows() && column < self.cols());
        self.cells[column + self.cols() * row]
    }

    /// The lowest empty row of `column`, or `None` if the column is full or
    /// does not exist
    pub fn empty_cell_of(&self, column: usize) -> Option<usize> {
        match self.heights.get(column) {
            Some(&height) if height < self.rows() => Some(height),
            _ => None,
        }
    }

    pub fn playable(&self, column: usize) -> bool {
        self.empty_cell_of(column).is_some()
    }

    /// Drops a piece for `player` into `column`, returning the row it landed in
    pub fn place(&mut self, column: usize, player: Player) -> Result<usize, Error> {
        if column >= self.cols() {
            return Err(Error::InvalidColumn {
                column,
                columns: self.cols(),
            });
        }
        let row = self.empty_cell_of(column).ok_or(Error::ColumnFull { column })?;
        let columns = self.cols();
        self.cells[column + columns * row] = player.into();
        self.heights[column] += 1;
        self.num_moves += 1;
        Ok(row)
    }

    /// Removes the topmost piece of `column`, returning its owner
    pub fn take(&mut self, column: usize) -> Option<Player> {
        let height = *self.heights.get(column)?;
        if height == 0 {
            return None;
        }
        let index = column + self.cols() * (height - 1);
        let player = self.cells[index].player();
        self.cells[index] = Cell::Empty;
        self.heights[column] -= 1;
        self.num_moves -= 1;
        player
    }

    /// Columns that can still take a piece, in ascending order
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols()).filter(move |&column| self.playable(column))
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.cells.len()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows()).rev() {
            for column in 0..self.cols() {
                let symbol = match self.get(row, column) {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
