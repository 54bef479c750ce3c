//! Process-based hook runner
//!
//! This module provides [`ProcessHookRunner`], which executes a hook as a
//! child process with the event payload piped to its stdin.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::error::WireError;
use crate::event::HookEvent;
use crate::runner::{HookExecutor, HookInvocation, HookResolver, InvocationStatus};
use uuid::Uuid;

/// How long a timed-out child gets to react to SIGTERM before SIGKILL
const KILL_GRACE: Duration = Duration::from_secs(2);

/// How long to wait for the stream readers to drain after process exit
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Executes hooks as child processes
///
/// # Invocation Lifecycle
///
/// 1. **Resolve** - Locate the executable via [`HookResolver`]
/// 2. **Spawn** - Start the process with piped stdin/stdout/stderr
/// 3. **Feed** - Write the event's raw JSON to stdin, then close it
/// 4. **Stream** - Reader tasks tee stdout/stderr to the dispatcher's own
///    streams in real time while capturing them for the record
/// 5. **Wait** - Await exit within the wall-clock timeout; on expiry the
///    child is killed (SIGTERM, short grace, then SIGKILL on Unix)
///
/// # Example
///
/// ```no_run
/// use hookwire::event::{EventKind, HookEvent};
/// use hookwire::runner::{HookExecutor, HookResolver, ProcessHookRunner, DEFAULT_HOOK_TIMEOUT};
/// use serde_json::json;
///
/// # async fn example() {
/// let runner = ProcessHookRunner::new(HookResolver::default());
/// let event = HookEvent::tool_use(
///     EventKind::PreToolUse,
///     "session-1",
///     "Bash",
///     json!({"command": "npm install left-pad"}),
/// );
/// let record = runner.run("check-package-age", &event, DEFAULT_HOOK_TIMEOUT).await;
/// println!("exit: {:?}", record.exit_code);
/// # }
/// ```
pub struct ProcessHookRunner {
    /// Locates hook executables
    resolver: HookResolver,
    /// Whether child output is echoed to the dispatcher's own streams
    echo: bool,
}

impl ProcessHookRunner {
    /// Create a runner that echoes child output live (the normal mode)
    pub fn new(resolver: HookResolver) -> Self {
        Self {
            resolver,
            echo: true,
        }
    }

    /// Disable live echoing of child output; capture only
    ///
    /// Used by tests that assert on captured output without polluting the
    /// test harness's streams.
    pub fn silent(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Spawn a reader task that tees one child stream
    ///
    /// Each line is echoed to the dispatcher's corresponding stream as it
    /// arrives (when echoing is on) and appended to the capture buffer.
    fn spawn_capture_task<R>(
        stream: R,
        buffer: Arc<Mutex<String>>,
        echo: bool,
        to_stderr: bool,
    ) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if echo {
                    if to_stderr {
                        eprintln!("{line}");
                    } else {
                        println!("{line}");
                    }
                }
                let mut buf = buffer.lock().await;
                buf.push_str(&line);
                buf.push('\n');
            }
        })
    }

    /// Kill a timed-out child: SIGTERM, short grace, then SIGKILL
    async fn kill_child(child: &mut Child) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = child.id() {
                debug!("Sending SIGTERM to pid {}", pid);
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);

                if timeout(KILL_GRACE, child.wait()).await.is_ok() {
                    return;
                }

                warn!("SIGTERM ignored, sending SIGKILL to pid {}", pid);
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
            }
            let _ = child.wait().await;
        }

        #[cfg(not(unix))]
        {
            debug!("Force killing timed-out hook process");
            let _ = child.kill().await;
        }
    }

    /// Spawn the hook and see it through to a terminal state
    ///
    /// Returns `Err` only for spawn-time failures; the caller converts those
    /// into `SpawnError` records.
    async fn spawn_and_wait(
        &self,
        hook_name: &str,
        path: &Path,
        event: &HookEvent,
        deadline: Duration,
    ) -> Result<HookInvocation, WireError> {
        let payload = serde_json::to_vec(event.raw())?;
        let started = Instant::now();

        let mut cmd = Command::new(path);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("HOOKWIRE_HOOK_NAME", hook_name)
            .env("HOOKWIRE_EVENT", event.kind.as_str())
            .kill_on_drop(true);

        debug!("Spawning hook '{}' at {}", hook_name, path.display());

        let mut child = cmd.spawn().map_err(|e| WireError::Spawn {
            hook: hook_name.to_string(),
            source: e,
        })?;

        let capture_failure = || WireError::Spawn {
            hook: hook_name.to_string(),
            source: std::io::Error::other("failed to capture child stdio"),
        };
        let mut stdin = child.stdin.take().ok_or_else(capture_failure)?;
        let stdout = child.stdout.take().ok_or_else(capture_failure)?;
        let stderr = child.stderr.take().ok_or_else(capture_failure)?;

        let stdout_buf = Arc::new(Mutex::new(String::new()));
        let stderr_buf = Arc::new(Mutex::new(String::new()));
        let mut stdout_task =
            Self::spawn_capture_task(stdout, stdout_buf.clone(), self.echo, false);
        let mut stderr_task = Self::spawn_capture_task(stderr, stderr_buf.clone(), self.echo, true);

        // Writer runs as its own task: a hook that never reads its stdin must
        // not stall the wait below. A broken pipe here just means the hook
        // exited without consuming the payload.
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(&payload).await {
                debug!("Hook did not consume its event payload: {}", e);
            }
            let _ = stdin.shutdown().await;
        });

        let exit = match timeout(deadline, child.wait()).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(e)) => {
                return Err(WireError::Spawn {
                    hook: hook_name.to_string(),
                    source: e,
                });
            }
            Err(_) => {
                warn!(
                    "Hook '{}' exceeded its {}ms timeout, killing",
                    hook_name,
                    deadline.as_millis()
                );
                Self::kill_child(&mut child).await;
                None
            }
        };

        // Drain the readers; a grandchild holding the pipes open must not
        // hang the dispatch past the drain grace.
        if timeout(DRAIN_GRACE, &mut stdout_task).await.is_err() {
            stdout_task.abort();
        }
        if timeout(DRAIN_GRACE, &mut stderr_task).await.is_err() {
            stderr_task.abort();
        }

        let (status, exit_code) = match exit {
            Some(status) => {
                debug!("Hook '{}' exited with {:?}", hook_name, status.code());
                (InvocationStatus::Completed, status.code())
            }
            None => (InvocationStatus::TimedOut, None),
        };

        Ok(HookInvocation {
            id: Uuid::new_v4(),
            hook_name: hook_name.to_string(),
            status,
            exit_code,
            stdout: stdout_buf.lock().await.clone(),
            stderr: stderr_buf.lock().await.clone(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl HookExecutor for ProcessHookRunner {
    async fn run(&self, hook_name: &str, event: &HookEvent, timeout: Duration) -> HookInvocation {
        let Some(path) = self.resolver.find(hook_name) else {
            warn!(
                "Hook '{}' not found in {:?}",
                hook_name,
                self.resolver.search_dirs()
            );
            return HookInvocation::not_found(hook_name, self.resolver.searched());
        };

        match self.spawn_and_wait(hook_name, &path, event, timeout).await {
            Ok(record) => record,
            Err(e) => {
                error!("{e}");
                HookInvocation::spawn_error(hook_name, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    fn test_event() -> HookEvent {
        HookEvent::tool_use(
            EventKind::PreToolUse,
            "session-test",
            "Bash",
            json!({"command": "ls"}),
        )
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn runner_for(dir: &Path) -> ProcessHookRunner {
        ProcessHookRunner::new(HookResolver::new(vec![dir.to_path_buf()])).silent()
    }

    #[tokio::test]
    async fn test_missing_hook_yields_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner_for(dir.path());

        let record = runner
            .run("no-such-hook", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.status, InvocationStatus::NotFound);
        assert_eq!(record.exit_code, None);
        assert!(record.stderr.contains("no-such-hook"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_hook_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "greeter", "echo all good\nexit 0");
        let runner = runner_for(dir.path());

        let record = runner
            .run("greeter", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.status, InvocationStatus::Completed);
        assert_eq!(record.exit_code, Some(0));
        assert_eq!(record.stdout, "all good\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_blocking_exit_code_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "vetoer", "echo nope >&2\nexit 2");
        let runner = runner_for(dir.path());

        let record = runner
            .run("vetoer", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.status, InvocationStatus::Completed);
        assert_eq!(record.exit_code, Some(2));
        assert!(record.stderr.contains("nope"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_event_payload_arrives_on_stdin() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "echoer", "cat");
        let runner = runner_for(dir.path());

        let record = runner
            .run("echoer", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.status, InvocationStatus::Completed);
        let payload: serde_json::Value = serde_json::from_str(record.stdout.trim()).unwrap();
        assert_eq!(payload["hook_event_name"], "PreToolUse");
        assert_eq!(payload["tool_input"]["command"], "ls");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hook_env_attribution() {
        let dir = tempfile::tempdir().unwrap();
        write_script(
            dir.path(),
            "env-probe",
            "echo \"$HOOKWIRE_HOOK_NAME/$HOOKWIRE_EVENT\"",
        );
        let runner = runner_for(dir.path());

        let record = runner
            .run("env-probe", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.stdout.trim(), "env-probe/PreToolUse");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_the_process() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "sleeper", "sleep 60");
        let runner = runner_for(dir.path());

        let started = Instant::now();
        let record = runner
            .run("sleeper", &test_event(), Duration::from_millis(200))
            .await;

        assert_eq!(record.status, InvocationStatus::TimedOut);
        assert_eq!(record.exit_code, None);
        // timeout + SIGTERM grace + drain grace, with margin
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_executable_hook_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        // Present on disk but not executable
        fs::write(dir.path().join("broken"), "#!/bin/sh\nexit 0\n").unwrap();
        let runner = runner_for(dir.path());

        let record = runner
            .run("broken", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.status, InvocationStatus::SpawnError);
        assert_eq!(record.exit_code, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hook_that_ignores_stdin_still_completes() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "ignorer", "exit 0");
        let runner = runner_for(dir.path());

        let record = runner
            .run("ignorer", &test_event(), Duration::from_secs(5))
            .await;

        assert_eq!(record.status, InvocationStatus::Completed);
        assert_eq!(record.exit_code, Some(0));
    }
}
