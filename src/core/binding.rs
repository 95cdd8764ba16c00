//! Purpose: Safe solve entry point over a native solver.
//! Exports: `SolverBinding`.
//! Role: Validates input, serializes calls, copies the result out, releases it.
//! Invariants: At most one native call in flight per binding.
//! Invariants: The native result is released exactly once, after it has been copied.
//! Invariants: `solve_board` leaves the caller's board untouched on any failure.
use std::sync::{Mutex, PoisonError};

use crate::core::board::Board;
use crate::core::codec::EncodedBuffer;
use crate::core::error::{Error, ErrorKind};
use crate::core::native::{NativeLibrary, NativeSolver, ResultHandle};
use crate::core::platform::ArtifactLocation;

pub struct SolverBinding<N = NativeLibrary> {
    native: N,
    gate: Mutex<()>,
}

impl SolverBinding<NativeLibrary> {
    /// Loads the artifact `location` resolves to.
    pub fn load(location: &ArtifactLocation) -> Result<Self, Error> {
        NativeLibrary::locate(location).map(Self::new)
    }

    /// Unloads the library once no further solves are needed.
    pub fn close(self) -> Result<(), Error> {
        self.native.close()
    }
}

impl<N: NativeSolver> SolverBinding<N> {
    pub fn new(native: N) -> Self {
        Self {
            native,
            gate: Mutex::new(()),
        }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn into_native(self) -> N {
        self.native
    }

    pub fn solve(&self, puzzle: &EncodedBuffer) -> Result<EncodedBuffer, Error> {
        let input = puzzle.to_c_string()?;

        // The gate guards no data, so a poisoned lock is still usable.
        let _in_flight = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(puzzle = %puzzle, "dispatching native solve");
        let handle = ResultHandle::acquire(&self.native, &input)?;
        let bytes = handle.copy_out();
        drop(handle);

        EncodedBuffer::from_bytes(&bytes).inspect_err(|_| {
            tracing::warn!(len = bytes.len(), "native solver returned a malformed board");
        })
    }

    /// Raw-byte variant of `solve`; malformed input is a caller bug.
    pub fn solve_bytes(&self, puzzle: &[u8]) -> Result<EncodedBuffer, Error> {
        let puzzle = EncodedBuffer::from_bytes(puzzle).map_err(|err| {
            let mut invalid = Error::new(ErrorKind::InvalidArgument).with_message(format!(
                "solve input is not an encoded board: {}",
                err.message().unwrap_or("malformed")
            ));
            if let Some(offset) = err.offset() {
                invalid = invalid.with_offset(offset);
            }
            invalid
        })?;
        self.solve(&puzzle)
    }

    /// Solves `board` in place; on error the board keeps its previous contents.
    pub fn solve_board(&self, board: &mut Board) -> Result<(), Error> {
        let solved = self.solve(&board.encode())?;
        *board = solved.to_board();
        Ok(())
    }
}

impl<N> std::fmt::Debug for SolverBinding<N>
where
    N: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverBinding")
            .field("native", &self.native)
            .finish_non_exhaustive()
    }
}
