//! Project layout resolution for the command bridge.
//!
//! The backend script lives at a fixed location relative to the project root,
//! and the project root is derived from where the bridge itself is installed.
//! This module finds that root and exposes every path the bridge needs.

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved paths for one bridge instance.
///
/// All paths are absolute when the root they were built from is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Directory containing the backend script and the virtual environment.
    pub project_root: PathBuf,

    /// Backend script passed as the interpreter's first argument.
    pub script_path: PathBuf,

    /// Project-local interpreter (`{project_root}/.venv/bin/python` by default).
    pub venv_interpreter: PathBuf,
}

impl ProjectLayout {
    /// Build the layout for an explicit project root.
    pub fn new<P: AsRef<Path>>(project_root: P, config: &BridgeConfig) -> Self {
        let project_root = project_root.as_ref().to_path_buf();
        let script_path = project_root.join(&config.script_name);
        let venv_interpreter = project_root
            .join(&config.venv_dir)
            .join("bin")
            .join(&config.venv_runtime);

        Self {
            project_root,
            script_path,
            venv_interpreter,
        }
    }

    /// Locate the project root from the bridge's installation location.
    ///
    /// Search order:
    /// 1. the nearest ancestor of the running executable containing the script
    /// 2. the nearest ancestor of the current directory containing the script
    /// 3. the executable's own directory
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The project root
    /// * `Err(BridgeError::UserError)` - Neither the executable nor the
    ///   current directory could be determined
    pub fn discover_root(script_name: &str) -> Result<PathBuf> {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        if let Some(root) = exe_dir
            .as_deref()
            .and_then(|dir| find_ancestor_with(dir, script_name))
        {
            return Ok(root);
        }

        if let Ok(cwd) = env::current_dir()
            && let Some(root) = find_ancestor_with(&cwd, script_name)
        {
            return Ok(root);
        }

        exe_dir.ok_or_else(|| {
            BridgeError::UserError(format!(
                "could not locate the project root containing '{}'\n\
                 Fix: pass --project-root explicitly.",
                script_name
            ))
        })
    }

    /// Resolve a layout, discovering the project root when none is given.
    pub fn resolve(project_root: Option<&Path>, config: &BridgeConfig) -> Result<Self> {
        match project_root {
            Some(root) => Ok(Self::new(root, config)),
            None => {
                let root = Self::discover_root(&config.script_name)?;
                tracing::debug!(root = %root.display(), "discovered project root");
                Ok(Self::new(root, config))
            }
        }
    }
}

/// Walk up from `start` until a directory containing `file_name` is found.
fn find_ancestor_with(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file_name).is_file())
        .map(Path::to_path_buf)
}
