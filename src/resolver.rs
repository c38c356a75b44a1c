//! Interpreter resolution for the backend.
//!
//! Picks the runtime used to run the backend script. A project-local virtual
//! environment wins over the system interpreter, which wins over a bare name
//! looked up on PATH at spawn time. Resolution never fails; the worst case is
//! the bare name, and spawning reports whether that actually exists.

use crate::config::BridgeConfig;
use crate::context::ProjectLayout;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a resolved interpreter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// `<project-root>/.venv/bin/<runtime>`.
    ProjectVenv,
    /// `/usr/bin/<runtime>` (or the configured system directory).
    System,
    /// Bare name, left to the PATH search of the spawning process.
    SearchPath,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::ProjectVenv => write!(f, "project virtualenv"),
            ResolutionSource::System => write!(f, "system"),
            ResolutionSource::SearchPath => write!(f, "PATH lookup"),
        }
    }
}

/// Interpreter chosen for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    pub path: PathBuf,
    pub source: ResolutionSource,
}

/// Ordered interpreter candidates for a project.
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
    venv_interpreter: PathBuf,
    system_interpreter: PathBuf,
    bare_name: String,
}

impl ExecutableResolver {
    /// Build the resolver from a layout and the configured runtime names.
    pub fn new(layout: &ProjectLayout, config: &BridgeConfig) -> Self {
        Self {
            venv_interpreter: layout.venv_interpreter.clone(),
            system_interpreter: Path::new(&config.system_bin_dir).join(&config.system_runtime),
            bare_name: config.system_runtime.clone(),
        }
    }

    /// Resolve the interpreter. First existing candidate wins.
    pub fn resolve(&self) -> ResolvedExecutable {
        if self.venv_interpreter.exists() {
            tracing::debug!(path = %self.venv_interpreter.display(), "using project virtualenv interpreter");
            return ResolvedExecutable {
                path: self.venv_interpreter.clone(),
                source: ResolutionSource::ProjectVenv,
            };
        }

        if self.system_interpreter.exists() {
            tracing::debug!(path = %self.system_interpreter.display(), "using system interpreter");
            return ResolvedExecutable {
                path: self.system_interpreter.clone(),
                source: ResolutionSource::System,
            };
        }

        tracing::warn!(
            venv = %self.venv_interpreter.display(),
            system = %self.system_interpreter.display(),
            name = %self.bare_name,
            "no interpreter found at known paths, falling back to PATH lookup"
        );
        ResolvedExecutable {
            path: PathBuf::from(&self.bare_name),
            source: ResolutionSource::SearchPath,
        }
    }
}
