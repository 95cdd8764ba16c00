//! Purpose: Ownership protocol for buffers returned by the native solver.
//! Exports: `NativeSolver`, `ResultHandle`, `NativeLibrary`, `sys`.
//! Role: Confines raw-pointer handling to this module and `library`.
//! Invariants: A non-null result is released exactly once, by `ResultHandle::drop`.
//! Invariants: A null result is a failure and is never passed to release.
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr::NonNull;
use std::slice;

use crate::core::codec::ENCODED_LEN;
use crate::core::error::{Error, ErrorKind};

mod library;
pub mod sys;

pub use library::NativeLibrary;

/// Entry points of a native solver.
///
/// # Safety
///
/// Implementors guarantee that `solve` returns either null or a pointer to a
/// buffer that is readable up to its NUL or `ENCODED_LEN + 1` bytes, whichever
/// comes first, and that stays valid and unmodified until it is handed back to
/// `release` on the same solver.
pub unsafe trait NativeSolver {
    /// # Safety
    ///
    /// A non-null return must be passed to `release` exactly once. Callers
    /// outside this module should go through `ResultHandle::acquire`.
    unsafe fn solve(&self, puzzle: &CStr) -> *mut c_char;

    /// # Safety
    ///
    /// `handle` must come from `solve` on this solver and must not have been
    /// released before.
    unsafe fn release(&self, handle: NonNull<c_char>);
}

/// Exclusive owner of one native result buffer, released on drop.
#[must_use]
pub struct ResultHandle<'a, N: NativeSolver + ?Sized> {
    ptr: NonNull<c_char>,
    native: &'a N,
}

impl<'a, N: NativeSolver + ?Sized> ResultHandle<'a, N> {
    /// Calls native solve; a null return becomes `NativeCall` with nothing to release.
    pub fn acquire(native: &'a N, puzzle: &CStr) -> Result<Self, Error> {
        // Ownership of a non-null result moves into the handle below.
        let raw = unsafe { native.solve(puzzle) };
        let ptr = NonNull::new(raw).ok_or_else(|| {
            Error::new(ErrorKind::NativeCall)
                .with_message("native solver returned no result")
                .with_hint("The puzzle may be contradictory or unsolvable.")
        })?;
        tracing::debug!(handle = ?ptr, "acquired native result");
        Ok(Self { ptr, native })
    }

    /// Owned copy of the result bytes, without the terminating NUL.
    ///
    /// Reads at most `ENCODED_LEN + 1` bytes, so an unterminated reply yields an
    /// over-long copy instead of a read past the buffer.
    pub fn copy_out(&self) -> Vec<u8> {
        let ptr = self.ptr.as_ptr();
        unsafe {
            let len = libc::strnlen(ptr, ENCODED_LEN + 1);
            slice::from_raw_parts(ptr.cast::<u8>(), len).to_vec()
        }
    }
}

impl<N: NativeSolver + ?Sized> Drop for ResultHandle<'_, N> {
    fn drop(&mut self) {
        tracing::debug!(handle = ?self.ptr, "releasing native result");
        unsafe { self.native.release(self.ptr) };
    }
}
