//! Backend subprocess executor.
//!
//! Runs `<interpreter> <script> <command> [args...]` once per call, captures
//! its output to an anonymous temp file, waits for exit and decodes the
//! capture. Both streams share one capture unless `capture: separate` is set.

use super::Transport;
use super::decode::decode_output;
use crate::command::{CommandRequest, CommandResult};
use crate::config::{BridgeConfig, CaptureMode, ExitStatusPolicy};
use crate::context::ProjectLayout;
use crate::error::{BridgeError, Result};
use crate::resolver::{ExecutableResolver, ResolvedExecutable};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// How often a running backend is checked for exit, deadline and output size.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How much of a separately captured stderr is kept for error messages.
const STDERR_TAIL_BYTES: u64 = 2048;

/// Raw outcome of one backend process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Interpreter that was launched.
    pub executable: ResolvedExecutable,
    /// Shell-quoted rendering of the full invocation (for logging).
    pub command_line: String,
    /// Exit code of the process (None if terminated by a signal).
    pub exit_code: Option<i32>,
    /// Captured output that is decoded as JSON.
    pub output: Vec<u8>,
    /// Tail of stderr; always empty when stderr is merged into `output`.
    pub stderr: Vec<u8>,
    /// Wall time from spawn to exit.
    pub duration: Duration,
}

impl ProcessOutput {
    /// Check if the backend exited with status zero.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Transport that spawns the backend interpreter for every call.
#[derive(Debug, Clone)]
pub struct ProcessTransport {
    layout: ProjectLayout,
    resolver: ExecutableResolver,
    timeout: Option<Duration>,
    max_output_bytes: Option<u64>,
    capture: CaptureMode,
    exit_status: ExitStatusPolicy,
}

impl ProcessTransport {
    /// Build a transport for a resolved project layout.
    pub fn new(layout: ProjectLayout, config: &BridgeConfig) -> Self {
        let resolver = ExecutableResolver::new(&layout, config);
        Self {
            layout,
            resolver,
            timeout: config.timeout(),
            max_output_bytes: config.max_output_bytes,
            capture: config.capture,
            exit_status: config.exit_status,
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn resolver(&self) -> &ExecutableResolver {
        &self.resolver
    }

    /// Spawn the backend for `request` and wait for it to exit.
    ///
    /// Does not look at the output beyond enforcing the size cap; decoding
    /// and exit status policy are applied by [`Transport::call`].
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessOutput)` - The process ran to completion
    /// * `Err(BridgeError::Spawn)` - The interpreter could not be started
    /// * `Err(BridgeError::Timeout)` - The deadline passed; the process was killed
    /// * `Err(BridgeError::OutputTooLarge)` - The cap was exceeded; the process was killed
    pub fn run(&self, request: &CommandRequest) -> Result<ProcessOutput> {
        let executable = self.resolver.resolve();
        let command_line = render_command_line(&executable, &self.layout, request);
        tracing::debug!(command = %request.command, command_line = %command_line, "spawning backend");

        let capture = capture_file()?;
        let stderr_capture = match self.capture {
            CaptureMode::Merged => None,
            CaptureMode::Separate => Some(capture_file()?),
        };
        let stderr_target = stdio_for(stderr_capture.as_ref().unwrap_or(&capture))?;

        let start_time = Instant::now();
        let mut child = Command::new(&executable.path)
            .arg(&self.layout.script_path)
            .arg(request.command.as_str())
            .args(&request.arguments)
            .stdin(Stdio::null())
            .stdout(stdio_for(&capture)?)
            .stderr(stderr_target)
            .spawn()
            .map_err(|e| {
                BridgeError::Spawn(format!(
                    "failed to execute '{}' ({}): {}\n\
                     Fix: install the interpreter or create the project virtualenv.",
                    executable.path.display(),
                    executable.source,
                    e
                ))
            })?;

        let status = self.wait(&mut child, &capture, &command_line)?;
        let duration = start_time.elapsed();

        let output = read_capture(capture, self.max_output_bytes)?;
        let stderr = match stderr_capture {
            Some(file) => read_tail(file, STDERR_TAIL_BYTES)?,
            None => Vec::new(),
        };

        tracing::info!(
            command = %request.command,
            interpreter = %executable.source,
            exit_code = ?status.code(),
            duration_ms = duration.as_millis() as u64,
            bytes = output.len(),
            "backend call finished"
        );

        Ok(ProcessOutput {
            executable,
            command_line,
            exit_code: status.code(),
            output,
            stderr,
            duration,
        })
    }

    /// Wait for the child, killing it on deadline or when the decoded capture
    /// exceeds the cap. Separately captured stderr does not count toward it.
    fn wait(&self, child: &mut Child, capture: &File, command_line: &str) -> Result<ExitStatus> {
        let start = Instant::now();

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if let Some(timeout) = self.timeout
                        && start.elapsed() >= timeout
                    {
                        kill_process(child);
                        return Err(BridgeError::Timeout(format!(
                            "'{}' did not exit within {}s and was killed",
                            command_line,
                            timeout.as_secs()
                        )));
                    }

                    if let Some(limit) = self.max_output_bytes
                        && captured_len(capture) > limit
                    {
                        kill_process(child);
                        return Err(BridgeError::OutputTooLarge(format!(
                            "'{}' wrote more than {} bytes and was killed",
                            command_line, limit
                        )));
                    }

                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    kill_process(child);
                    return Err(BridgeError::Spawn(format!(
                        "failed to check backend process status: {}",
                        e
                    )));
                }
            }
        }
    }
}

impl Transport for ProcessTransport {
    fn call(&self, request: &CommandRequest) -> Result<CommandResult> {
        let output = self.run(request)?;

        if !output.is_success() {
            match self.exit_status {
                ExitStatusPolicy::Ignore => tracing::debug!(
                    command = %request.command,
                    exit_code = ?output.exit_code,
                    "backend exited non-zero, exit status ignored"
                ),
                ExitStatusPolicy::RequireSuccess => {
                    let err = BridgeError::BackendExit(format!(
                        "'{}' exited with {}{}",
                        output.command_line,
                        describe_exit(output.exit_code),
                        diagnostics(&output)
                    ));
                    tracing::warn!(command = %request.command, error = %err, "backend call failed");
                    return Err(err);
                }
            }
        }

        decode_output(&output.output).map_err(|err| {
            let err = match err {
                BridgeError::Decode(msg) => {
                    BridgeError::Decode(format!("{}{}", msg, diagnostics(&output)))
                }
                other => other,
            };
            tracing::warn!(command = %request.command, error = %err, "backend call failed");
            err
        })
    }
}

/// Render the invocation the way a user would type it into a shell.
fn render_command_line(
    executable: &ResolvedExecutable,
    layout: &ProjectLayout,
    request: &CommandRequest,
) -> String {
    let mut words = vec![executable.path.to_string_lossy().to_string()];
    words.extend(request.argv(&layout.script_path.to_string_lossy()));
    shell_words::join(words)
}

fn capture_file() -> Result<File> {
    tempfile::tempfile().map_err(|e| {
        BridgeError::Spawn(format!("failed to create backend capture file: {}", e))
    })
}

/// Stdio handle sharing the capture file's offset, so writes from both
/// streams append instead of overwriting each other.
fn stdio_for(file: &File) -> Result<Stdio> {
    let handle = file.try_clone().map_err(|e| {
        BridgeError::Spawn(format!("failed to duplicate backend capture handle: {}", e))
    })?;
    Ok(Stdio::from(handle))
}

fn captured_len(file: &File) -> u64 {
    file.metadata().map(|m| m.len()).unwrap_or(0)
}

/// Read the whole capture, refusing anything over `limit` bytes.
fn read_capture(mut file: File, limit: Option<u64>) -> Result<Vec<u8>> {
    file.seek(SeekFrom::Start(0)).map_err(|e| {
        BridgeError::Decode(format!("failed to rewind backend capture: {}", e))
    })?;

    let mut output = Vec::new();
    let read = match limit {
        Some(limit) => file.take(limit.saturating_add(1)).read_to_end(&mut output),
        None => file.read_to_end(&mut output),
    };
    read.map_err(|e| BridgeError::Decode(format!("failed to read backend output: {}", e)))?;

    if let Some(limit) = limit
        && output.len() as u64 > limit
    {
        return Err(BridgeError::OutputTooLarge(format!(
            "backend wrote more than {} bytes",
            limit
        )));
    }

    Ok(output)
}

/// Read at most the last `max` bytes of a capture.
fn read_tail(mut file: File, max: u64) -> Result<Vec<u8>> {
    let len = captured_len(&file);
    file.seek(SeekFrom::Start(len.saturating_sub(max)))
        .map_err(|e| BridgeError::Decode(format!("failed to rewind backend stderr: {}", e)))?;

    let mut tail = Vec::new();
    file.read_to_end(&mut tail)
        .map_err(|e| BridgeError::Decode(format!("failed to read backend stderr: {}", e)))?;
    Ok(tail)
}

/// Kill a process and wait for it to terminate.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Separately captured stderr, formatted for appending to an error message.
fn diagnostics(output: &ProcessOutput) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\nBackend stderr: {}", stderr)
    }
}
