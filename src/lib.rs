//! Purpose: Library crate behind the `sudoku-bridge` CLI and its tests.
//! Exports: `api` (public surface), `core` (board, codec, native boundary, errors).
//! Role: Keeps every native call and raw pointer behind `core::native`.
//! Invariants: Callers receive owned values only; no native memory escapes a solve.
//! Invariants: The loaded library is passed explicitly; there is no global instance.
pub mod api;
pub mod core;
