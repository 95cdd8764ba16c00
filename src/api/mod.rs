//! Purpose: Define the stable public Rust API boundary for sudoku-bridge.
//! Exports: Board model, codec, solver binding, and error types.
//! Role: Public, additive-only surface used by the CLI and integration tests.
//! Invariants: Raw FFI declarations (`core::native::sys`) are not re-exported.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::binding::SolverBinding;
pub use crate::core::board::{Board, CELL_COUNT, Digit, SIZE, box_index};
pub use crate::core::codec::{EMPTY_CELL, ENCODED_LEN, EncodedBuffer, decode, encode};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::native::{NativeLibrary, NativeSolver, ResultHandle};
pub use crate::core::platform::{ArtifactLocation, LIBRARY_BASE_NAME, LIBRARY_DIR, Platform};
pub use crate::core::text::parse_board_text;
