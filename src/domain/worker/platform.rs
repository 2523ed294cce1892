//! Host platform conventions for worker invocation

use std::path::{Path, PathBuf};

/// Path and interpreter conventions of a host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    /// Detect the platform the process is running on
    pub fn current() -> Self {
        if std::env::consts::OS == "windows" {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Canonical path separator
    pub const fn separator(&self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Posix => '/',
        }
    }

    /// Interpreter inside a worker virtualenv
    ///
    /// Windows venvs keep executables under `Scripts` with an `.exe`
    /// suffix, POSIX venvs under `bin`.
    pub fn venv_interpreter(&self, worker_dir: &Path) -> PathBuf {
        let venv = worker_dir.join("venv");
        match self {
            Self::Windows => venv.join("Scripts").join("python.exe"),
            Self::Posix => venv.join("bin").join("python"),
        }
    }
}
