//! Purpose: Resolve which native solver artifact the CLI loads.
//! Exports: `LibrarySource`, `resolve_library_source`, `default_install_root`, env names.
//! Role: One place for the flag > env > install-root precedence.
//! Invariants: An explicit library path is used as given, with no suffix selection.
//! Invariants: Default install root is the parent of the executable's directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use sudoku_bridge::api::{ArtifactLocation, Error, NativeLibrary, Platform, SolverBinding};

pub(crate) const LIB_ENV: &str = "SUDOKU_SOLVER_LIB";
pub(crate) const ROOT_ENV: &str = "SUDOKU_SOLVER_ROOT";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum LibrarySource {
    Explicit(PathBuf),
    Installed(ArtifactLocation),
}

impl LibrarySource {
    pub(crate) fn path(&self) -> Result<PathBuf, Error> {
        match self {
            LibrarySource::Explicit(path) => Ok(path.clone()),
            LibrarySource::Installed(location) => location.library_path(),
        }
    }

    pub(crate) fn platform(&self) -> Platform {
        match self {
            LibrarySource::Explicit(_) => Platform::host(),
            LibrarySource::Installed(location) => location.platform().clone(),
        }
    }

    pub(crate) fn load(&self) -> Result<SolverBinding, Error> {
        match self {
            LibrarySource::Explicit(path) => NativeLibrary::open(path).map(SolverBinding::new),
            LibrarySource::Installed(location) => SolverBinding::load(location),
        }
    }
}

pub(crate) fn default_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub(crate) fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value: &OsString| !value.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn resolve_library_source(
    lib: Option<PathBuf>,
    root: Option<PathBuf>,
    platform: Platform,
) -> LibrarySource {
    if let Some(path) = lib {
        return LibrarySource::Explicit(path);
    }
    let root = root.unwrap_or_else(default_install_root);
    LibrarySource::Installed(ArtifactLocation::new(root, platform))
}
