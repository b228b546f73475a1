//! Board engine: pure evaluation over the fixed 6x7 grid.
//!
//! Cells are stored row-major (`row * COLS + col`), row 0 at the top. Pieces
//! fall toward row `ROWS - 1`.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, InfraErrorKind};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELL_COUNT: usize = ROWS * COLS;

/// Length of a winning alignment.
const LINE: usize = 4;

/// Contents of a single grid cell.
///
/// Persisted as `0` (empty), `1` (player one) and `2` (player two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub fn as_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Player1),
            2 => Some(Cell::Player2),
            _ => None,
        }
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No alignment and at least one empty cell remains.
    Ongoing,
    Player1,
    Player2,
    Draw,
}

/// Row-major index of `(row, col)`.
pub const fn index(row: usize, col: usize) -> usize {
    row * COLS + col
}

/// Immutable 42-cell grid.
///
/// Serializes as a flat array of cell codes, the document layout shared with
/// other clients of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Cell at `(row, col)`. Panics if either coordinate is off the grid.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[index(row, col)]
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Copy of this board with `cell` written at `(row, col)`.
    pub fn with_mark(&self, row: usize, col: usize, cell: Cell) -> Board {
        let mut next = *self;
        next.cells[index(row, col)] = cell;
        next
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.as_u8()).collect()
    }

    /// Build a board from persisted cell codes.
    pub fn from_codes(codes: &[u8]) -> Result<Self, DomainError> {
        if codes.len() != CELL_COUNT {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("board has {} cells, expected {CELL_COUNT}", codes.len()),
            ));
        }
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (slot, code) in cells.iter_mut().zip(codes) {
            *slot = Cell::from_u8(*code).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("invalid cell code {code}"),
                )
            })?;
        }
        Ok(Self { cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = DomainError;

    fn try_from(codes: Vec<u8>) -> Result<Self, Self::Error> {
        Board::from_codes(&codes)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.to_codes()
    }
}

/// Lowest empty row in `column`, or `None` when the column is full.
///
/// Columns outside the grid have no space either; callers range-check first
/// so they can report the two cases separately.
pub fn resolve_drop(board: &Board, column: usize) -> Option<usize> {
    if column >= COLS {
        return None;
    }
    (0..ROWS).rev().find(|row| board.get(*row, column) == Cell::Empty)
}

/// Owner of the four cells starting at `(row, col)` stepping by `(dr, dc)`,
/// if they are equal and non-empty. The caller keeps the line on the grid.
fn line_owner(board: &Board, row: usize, col: usize, dr: usize, dc: isize) -> Option<Cell> {
    let first = board.get(row, col);
    if first == Cell::Empty {
        return None;
    }
    (1..LINE)
        .all(|step| {
            let r = row + dr * step;
            let c = (col as isize + dc * step as isize) as usize;
            board.get(r, c) == first
        })
        .then_some(first)
}

/// Detect a four-in-a-row winner or a draw.
///
/// Scan order is fixed: horizontal rows top to bottom, then vertical, then the
/// down-right diagonal, then the down-left diagonal. The first alignment found
/// decides the outcome. A board holding lines for both players cannot arise
/// from legal play and is resolved by that order.
pub fn evaluate(board: &Board) -> Outcome {
    // horizontal
    for row in 0..ROWS {
        for col in 0..=COLS - LINE {
            if let Some(cell) = line_owner(board, row, col, 0, 1) {
                return winner(cell);
            }
        }
    }

    // vertical
    for row in 0..=ROWS - LINE {
        for col in 0..COLS {
            if let Some(cell) = line_owner(board, row, col, 1, 0) {
                return winner(cell);
            }
        }
    }

    // diagonal, top-left to bottom-right
    for row in 0..=ROWS - LINE {
        for col in 0..=COLS - LINE {
            if let Some(cell) = line_owner(board, row, col, 1, 1) {
                return winner(cell);
            }
        }
    }

    // diagonal, top-right to bottom-left
    for row in 0..=ROWS - LINE {
        for col in LINE - 1..COLS {
            if let Some(cell) = line_owner(board, row, col, 1, -1) {
                return winner(cell);
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

fn winner(cell: Cell) -> Outcome {
    match cell {
        Cell::Player1 => Outcome::Player1,
        Cell::Player2 => Outcome::Player2,
        Cell::Empty => Outcome::Ongoing,
    }
}
