//! Purpose: In-memory 9x9 Sudoku board used by the front end and the codec.
//! Exports: `Board`, `Digit`, `SIZE`, `CELL_COUNT`, `box_index`.
//! Role: Transient UI state; created empty, mutated by input, reset by `clear`.
//! Invariants: Always exactly 81 cells; row/column indices are in [0, 8].
//! Invariants: A cell is either empty or a digit 1..=9 (enforced by `Digit`).
use std::fmt;

use crate::core::error::{Error, ErrorKind};

pub const SIZE: usize = 9;
pub const CELL_COUNT: usize = SIZE * SIZE;

/// A filled cell value in `1..=9`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (1..=9).contains(&value).then_some(Self(value))
    }

    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'1'..=b'9' => Some(Self(byte - b'0')),
            _ => None,
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn to_ascii(self) -> u8 {
        b'0' + self.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of the 3x3 box containing `(row, col)`, numbered row-major from 0.
pub fn box_index(row: usize, col: usize) -> usize {
    (row / 3) * 3 + col / 3
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    cells: [Option<Digit>; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    pub(crate) fn from_cells(cells: [Option<Digit>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Option<Digit>, Error> {
        Ok(self.cells[cell_index(row, col)?])
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<Digit>) -> Result<(), Error> {
        let index = cell_index(row, col)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Sets a cell from a raw number, where 0 clears it.
    pub fn set_number(&mut self, row: usize, col: usize, value: u8) -> Result<(), Error> {
        let digit = match value {
            0 => None,
            value => Some(Digit::new(value).ok_or_else(|| {
                Error::new(ErrorKind::InvalidArgument)
                    .with_message(format!("cell value {value} is outside 1..=9"))
            })?),
        };
        self.set(row, col, digit)
    }

    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    pub fn cells(&self) -> &[Option<Digit>; CELL_COUNT] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Digit>]> {
        self.cells.chunks_exact(SIZE)
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == CELL_COUNT
    }

    /// True when every row, column, and box holds each digit exactly once.
    pub fn is_solved(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let mut rows = [0u16; SIZE];
        let mut cols = [0u16; SIZE];
        let mut boxes = [0u16; SIZE];
        for (index, cell) in self.cells.iter().enumerate() {
            let Some(digit) = cell else {
                return false;
            };
            let (row, col) = (index / SIZE, index % SIZE);
            let bit = 1u16 << (digit.get() - 1);
            let seen = [&mut rows[row], &mut cols[col], &mut boxes[box_index(row, col)]];
            for mask in seen {
                if *mask & bit != 0 {
                    return false;
                }
                *mask |= bit;
            }
        }
        true
    }
}

fn cell_index(row: usize, col: usize) -> Result<usize, Error> {
    if row >= SIZE || col >= SIZE {
        return Err(Error::new(ErrorKind::InvalidArgument)
            .with_message(format!("cell ({row}, {col}) is outside the 9x9 board")));
    }
    Ok(row * SIZE + col)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.rows().enumerate() {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    f.write_str(if col % 3 == 0 { " | " } else { " " })?;
                }
                match cell {
                    Some(digit) => write!(f, "{digit}")?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
