//! Purpose: Positional text encoding of a board for the native solver boundary.
//! Exports: `EncodedBuffer`, `encode`, `decode`, `ENCODED_LEN`, `EMPTY_CELL`.
//! Role: The one wire format crossing into and out of native code.
//! Invariants: Exactly 81 bytes, row-major, '1'..='9' for digits and '.' for empty.
//! Invariants: Shape only; puzzle legality is the native routine's concern.
use std::ffi::CString;
use std::fmt;
use std::str::FromStr;

use crate::core::board::{Board, CELL_COUNT, Digit};
use crate::core::error::{Error, ErrorKind};

pub const ENCODED_LEN: usize = CELL_COUNT;
pub const EMPTY_CELL: u8 = b'.';

/// An 81-byte buffer already known to use only the board alphabet.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct EncodedBuffer {
    bytes: [u8; ENCODED_LEN],
}

impl EncodedBuffer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != ENCODED_LEN {
            return Err(Error::new(ErrorKind::Format).with_message(format!(
                "encoded board must be {ENCODED_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        if let Some(offset) = bytes.iter().position(|byte| !is_board_byte(*byte)) {
            return Err(Error::new(ErrorKind::Format)
                .with_message(format!(
                    "unexpected byte {:?} in encoded board",
                    char::from(bytes[offset])
                ))
                .with_offset(offset));
        }
        let mut out = [EMPTY_CELL; ENCODED_LEN];
        out.copy_from_slice(bytes);
        Ok(Self { bytes: out })
    }

    pub fn as_bytes(&self) -> &[u8; ENCODED_LEN] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        // Alphabet is ASCII by construction.
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    /// NUL-terminated copy for handing to native code.
    pub fn to_c_string(&self) -> Result<CString, Error> {
        CString::new(self.bytes.to_vec()).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("encoded board contains NUL")
                .with_source(err)
        })
    }

    pub fn to_board(&self) -> Board {
        let mut cells = [None; CELL_COUNT];
        for (cell, byte) in cells.iter_mut().zip(self.bytes) {
            *cell = Digit::from_ascii(byte);
        }
        Board::from_cells(cells)
    }
}

impl fmt::Debug for EncodedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedBuffer").field(&self.as_str()).finish()
    }
}

impl fmt::Display for EncodedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodedBuffer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

pub fn encode(board: &Board) -> EncodedBuffer {
    let mut bytes = [EMPTY_CELL; ENCODED_LEN];
    for (byte, cell) in bytes.iter_mut().zip(board.cells()) {
        if let Some(digit) = cell {
            *byte = digit.to_ascii();
        }
    }
    EncodedBuffer { bytes }
}

pub fn decode(bytes: &[u8]) -> Result<Board, Error> {
    EncodedBuffer::from_bytes(bytes).map(|buffer| buffer.to_board())
}

impl Board {
    pub fn encode(&self) -> EncodedBuffer {
        encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }
}

fn is_board_byte(byte: u8) -> bool {
    byte == EMPTY_CELL || Digit::from_ascii(byte).is_some()
}
