//! Purpose: Map the host platform to the native solver artifact on disk.
//! Exports: `Platform`, `ArtifactLocation`, `LIBRARY_BASE_NAME`, `LIBRARY_DIR`.
//! Role: Pure suffix table plus `<root>/bin/libSudokuPy<suffix>` path assembly.
//! Invariants: Unknown platforms are an explicit variant, never a missing suffix.
//! Invariants: Suffix table: linux `.so`, macos `.dylib`, windows `.dll`.
use std::path::PathBuf;

use crate::core::error::{Error, ErrorKind};

pub const LIBRARY_BASE_NAME: &str = "libSudokuPy";
pub const LIBRARY_DIR: &str = "bin";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Unsupported(String),
}

impl Platform {
    pub fn host() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Accepts `std::env::consts::OS` values plus `darwin`, case-insensitively.
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "macos" | "darwin" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Unsupported(os.to_string()),
        }
    }

    pub fn library_suffix(&self) -> Result<&'static str, Error> {
        match self {
            Self::Linux => Ok(".so"),
            Self::MacOs => Ok(".dylib"),
            Self::Windows => Ok(".dll"),
            Self::Unsupported(os) => Err(Error::new(ErrorKind::UnsupportedPlatform)
                .with_message(format!("no native solver build for platform {os:?}"))
                .with_hint("Pass --lib with an explicit library path.")),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Unsupported(os) => os,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArtifactLocation {
    root: PathBuf,
    platform: Platform,
}

impl ArtifactLocation {
    pub fn new(root: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            root: root.into(),
            platform,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn library_path(&self) -> Result<PathBuf, Error> {
        let suffix = self.platform.library_suffix()?;
        Ok(self
            .root
            .join(LIBRARY_DIR)
            .join(format!("{LIBRARY_BASE_NAME}{suffix}")))
    }
}
