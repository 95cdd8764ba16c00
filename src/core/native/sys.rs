// Raw C ABI of the native solver library.
use std::os::raw::c_char;

use libc::c_void;

/// `char *Solve(const char *puzzle)`; returns NULL on failure.
pub type SolveFn = unsafe extern "C" fn(puzzle: *const c_char) -> *mut c_char;

/// `void FreeMem(void *ptr)`; only for pointers returned by `Solve`.
pub type FreeMemFn = unsafe extern "C" fn(ptr: *mut c_void);

pub const SOLVE_SYMBOL: &[u8] = b"Solve\0";
pub const FREE_MEM_SYMBOL: &[u8] = b"FreeMem\0";
