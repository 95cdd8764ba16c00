//! Purpose: Parse human-supplied board text into a `Board`.
//! Exports: `parse_board_text`.
//! Role: Input side of the CLI; accepts the encoded line or a 9x9 token grid.
//! Invariants: Either one 81-byte encoded token, or 81 single-character tokens.
//! Invariants: Grid tokens use '0' or '.' for empty; nothing else is guessed.
use crate::core::board::{Board, CELL_COUNT, Digit};
use crate::core::codec::{EMPTY_CELL, decode};
use crate::core::error::{Error, ErrorKind};

pub fn parse_board_text(text: &str) -> Result<Board, Error> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [line] => decode(line.as_bytes()),
        tokens if tokens.len() == CELL_COUNT => parse_grid_tokens(tokens),
        tokens => Err(Error::new(ErrorKind::Format)
            .with_message(format!(
                "expected one {CELL_COUNT}-character line or {CELL_COUNT} grid tokens, got {} tokens",
                tokens.len()
            ))
            .with_hint("Use '.' or 0 for empty cells, e.g. 53..7.... on each row.")),
    }
}

fn parse_grid_tokens(tokens: &[&str]) -> Result<Board, Error> {
    let mut cells = [None; CELL_COUNT];
    for (index, (cell, token)) in cells.iter_mut().zip(tokens).enumerate() {
        *cell = match token.as_bytes() {
            [b'0'] | [EMPTY_CELL] => None,
            [byte] if Digit::from_ascii(*byte).is_some() => Digit::from_ascii(*byte),
            _ => {
                return Err(Error::new(ErrorKind::Format)
                    .with_message(format!(
                        "grid cell {} (row {}, col {}) is {token:?}",
                        index,
                        index / 9,
                        index % 9
                    ))
                    .with_offset(index));
            }
        };
    }
    Ok(Board::from_cells(cells))
}
