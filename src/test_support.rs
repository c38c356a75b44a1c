use crate::command::{BridgeCommand, CommandRequest, CommandResult};
use crate::config::BridgeConfig;
use crate::context::ProjectLayout;
use crate::error::{BridgeError, Result};
use crate::transport::{ProcessTransport, Transport};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Duration;
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Temp project whose `.venv/bin/python` is a shell script standing in for
/// the real backend. The script sees the same argv the interpreter would:
/// `$1` is the backend script, `$2` the command, `$3...` the arguments.
pub(crate) struct FakeBackend {
    _temp_dir: TempDir,
    config: BridgeConfig,
    layout: ProjectLayout,
}

impl FakeBackend {
    #[cfg(unix)]
    pub(crate) fn new(body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let backend = Self::without_interpreter();
        let interpreter = &backend.layout.venv_interpreter;
        std::fs::create_dir_all(interpreter.parent().unwrap()).unwrap();
        std::fs::write(interpreter, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(interpreter, std::fs::Permissions::from_mode(0o755)).unwrap();
        backend
    }

    /// Project with a backend script but no interpreter anywhere it will look.
    pub(crate) fn without_interpreter() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let project_root = temp_dir.path().join("project");
        let system_dir = temp_dir.path().join("usr-bin");
        std::fs::create_dir_all(&project_root).unwrap();
        std::fs::create_dir_all(&system_dir).unwrap();

        let config = BridgeConfig {
            system_bin_dir: system_dir.to_string_lossy().to_string(),
            system_runtime: "aichef-no-such-interpreter".to_string(),
            ..Default::default()
        };
        let layout = ProjectLayout::new(&project_root, &config);
        std::fs::write(&layout.script_path, "# backend lives here\n").unwrap();

        Self {
            _temp_dir: temp_dir,
            config,
            layout,
        }
    }

    pub(crate) fn with_config(mut self, update: impl FnOnce(&mut BridgeConfig)) -> Self {
        update(&mut self.config);
        self
    }

    #[cfg(unix)]
    pub(crate) fn make_interpreter_non_executable(&self) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(
            &self.layout.venv_interpreter,
            std::fs::Permissions::from_mode(0o644),
        )
        .unwrap();
    }

    pub(crate) fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub(crate) fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> ProcessTransport {
        ProcessTransport::new(self.layout.clone(), &self.config)
    }
}

enum Canned {
    Respond(Value),
    Fail(fn(String) -> BridgeError, String),
}

/// In-memory transport with canned responses per command.
///
/// Commands without a canned response return an empty object.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: HashMap<BridgeCommand, Canned>,
    delay: Option<Duration>,
    calls: Mutex<Vec<CommandRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Respond to `command` with `value`, which should be a JSON object.
    pub(crate) fn respond(mut self, command: BridgeCommand, value: Value) -> Self {
        self.responses.insert(command, Canned::Respond(value));
        self
    }

    /// Fail `command` with an error of the same kind and message as `error`.
    pub(crate) fn fail(mut self, command: BridgeCommand, error: BridgeError) -> Self {
        let canned = match error {
            BridgeError::Spawn(msg) => Canned::Fail(BridgeError::Spawn, msg),
            BridgeError::Decode(msg) => Canned::Fail(BridgeError::Decode, msg),
            BridgeError::Timeout(msg) => Canned::Fail(BridgeError::Timeout, msg),
            other => Canned::Fail(BridgeError::UserError, other.to_string()),
        };
        self.responses.insert(command, canned);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in arrival order.
    pub(crate) fn calls(&self) -> Vec<CommandRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl Transport for FakeTransport {
    fn call(&self, request: &CommandRequest) -> Result<CommandResult> {
        self.calls
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(request.clone());

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        match self.responses.get(&request.command) {
            None => Ok(CommandResult::new()),
            Some(Canned::Respond(Value::Object(map))) => Ok(map.clone()),
            Some(Canned::Respond(other)) => Err(BridgeError::Decode(format!(
                "canned response for '{}' is not an object: {}",
                request.command, other
            ))),
            Some(Canned::Fail(make, msg)) => Err(make(msg.clone())),
        }
    }
}
