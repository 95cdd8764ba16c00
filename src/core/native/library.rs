// Dynamically loaded native solver (`libSudokuPy`), resolved once at startup.
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use libloading::Library;

use super::NativeSolver;
use super::sys::{FREE_MEM_SYMBOL, FreeMemFn, SOLVE_SYMBOL, SolveFn};
use crate::core::error::{Error, ErrorKind};
use crate::core::platform::ArtifactLocation;

pub struct NativeLibrary {
    solve: SolveFn,
    free_mem: FreeMemFn,
    path: PathBuf,
    // Keeps `solve` and `free_mem` mapped; must outlive every call through them.
    library: Library,
}

impl NativeLibrary {
    pub fn locate(location: &ArtifactLocation) -> Result<Self, Error> {
        let path = location.library_path()?;
        Self::open(path)
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        if !path.is_file() {
            return Err(Error::new(ErrorKind::LibraryLoad)
                .with_message("native solver library not found")
                .with_path(&path)
                .with_hint("Build the native solver into <root>/bin, or pass --lib."));
        }

        // Loading runs the library's initializers; the artifact is trusted by installation.
        let library = unsafe { Library::new(&path) }.map_err(|err| {
            Error::new(ErrorKind::LibraryLoad)
                .with_message("failed to load native solver library")
                .with_path(&path)
                .with_source(err)
        })?;
        let solve = unsafe { library.get::<SolveFn>(SOLVE_SYMBOL) }
            .map(|symbol| *symbol)
            .map_err(|err| missing_symbol(&path, "Solve", err))?;
        let free_mem = unsafe { library.get::<FreeMemFn>(FREE_MEM_SYMBOL) }
            .map(|symbol| *symbol)
            .map_err(|err| missing_symbol(&path, "FreeMem", err))?;

        tracing::info!(path = %path.display(), "loaded native solver");
        Ok(Self {
            solve,
            free_mem,
            path,
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unloads the library, surfacing platform unload errors that `drop` would ignore.
    pub fn close(self) -> Result<(), Error> {
        let Self { path, library, .. } = self;
        library.close().map_err(|err| {
            Error::new(ErrorKind::LibraryLoad)
                .with_message("failed to unload native solver library")
                .with_path(&path)
                .with_source(err)
        })?;
        tracing::debug!(path = %path.display(), "unloaded native solver");
        Ok(())
    }
}

// SAFETY: `Solve` returns NULL or a NUL-terminated buffer owned by the library
// allocator, valid until passed to `FreeMem`.
unsafe impl NativeSolver for NativeLibrary {
    unsafe fn solve(&self, puzzle: &CStr) -> *mut c_char {
        unsafe { (self.solve)(puzzle.as_ptr()) }
    }

    unsafe fn release(&self, handle: NonNull<c_char>) {
        unsafe { (self.free_mem)(handle.as_ptr().cast()) }
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn missing_symbol(path: &Path, name: &str, err: libloading::Error) -> Error {
    Error::new(ErrorKind::LibraryLoad)
        .with_message(format!("native solver library has no `{name}` entry point"))
        .with_path(path)
        .with_source(err)
}
