use super::relay::spawn_relay;
use crate::error::{BuildError, Result};
use crate::progress::{OutputStream, ProgressEvent, ProgressHandler};
use crate::toolchain::ComposedCommand;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How long to wait for both relays to drain once the child has exited.
/// Background grandchildren can hold the pipes open past the shell's exit.
const RELAY_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Termination report for a build process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Raw exit code; `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

pub struct ProcessRunner;

impl ProcessRunner {
    /// Spawns `command` through the platform shell and returns immediately.
    ///
    /// Output relays start right away and run for the lifetime of the child.
    pub fn spawn(
        command: &ComposedCommand,
        progress: Arc<dyn ProgressHandler>,
    ) -> Result<RunningBuild> {
        let mut cmd = shell_command(&command.command_line);
        cmd.current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // The build tool runs as a grandchild of the shell; its own process
        // group lets terminate() reach it.
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn().map_err(|e| BuildError::Launch {
            command: command.command_line.clone(),
            reason: e.to_string(),
        })?;

        let pid = child.id();
        debug!(pid = ?pid, dir = %command.working_dir.display(), "Spawned build process");
        progress.on_progress(&ProgressEvent::ProcessSpawned { pid });

        let mut relays = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            relays.push(spawn_relay(stdout, OutputStream::Stdout, progress.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            relays.push(spawn_relay(stderr, OutputStream::Stderr, progress.clone()));
        }

        Ok(RunningBuild {
            child,
            relays,
            started: Instant::now(),
        })
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

enum WaitOutcome {
    Exited(std::io::Result<ExitStatus>),
    Cancelled,
    TimedOut(Duration),
}

/// Handle to a spawned build process
pub struct RunningBuild {
    child: Child,
    relays: Vec<JoinHandle<()>>,
    started: Instant,
}

impl RunningBuild {
    /// Waits for the child to exit.
    ///
    /// A non-zero exit code is not an error here. Cancellation through
    /// `cancel` or expiry of `timeout` kills the child and returns
    /// [`BuildError::Cancelled`] or [`BuildError::Timeout`].
    pub async fn wait(
        mut self,
        cancel: &CancellationToken,
        timeout: Option<Duration>,
    ) -> Result<ProcessExit> {
        let outcome = {
            let deadline = async {
                match timeout {
                    Some(limit) => {
                        tokio::time::sleep(limit).await;
                        limit
                    }
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                status = self.child.wait() => WaitOutcome::Exited(status),
                _ = cancel.cancelled() => WaitOutcome::Cancelled,
                limit = deadline => WaitOutcome::TimedOut(limit),
            }
        };

        match outcome {
            WaitOutcome::Exited(Ok(status)) => {
                self.drain_relays().await;
                Ok(ProcessExit {
                    exit_code: status.code(),
                    elapsed: self.started.elapsed(),
                })
            }
            WaitOutcome::Exited(Err(e)) => {
                self.abort_relays();
                Err(BuildError::Launch {
                    command: "build process".to_string(),
                    reason: format!("failed to wait for process: {}", e),
                })
            }
            WaitOutcome::Cancelled => {
                self.terminate().await;
                Err(BuildError::Cancelled)
            }
            WaitOutcome::TimedOut(limit) => {
                self.terminate().await;
                Err(BuildError::Timeout { limit })
            }
        }
    }

    async fn terminate(&mut self) {
        #[cfg(unix)]
        {
            if let Some(pid) = self.child.id() {
                kill_process_group(pid);
            }
        }

        if let Err(e) = self.child.kill().await {
            warn!(error = %e, "Failed to kill build process");
        }
        self.abort_relays();
    }

    async fn drain_relays(&mut self) {
        let handles: Vec<_> = self.relays.drain(..).collect();
        let aborts: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();

        let joined = async {
            for handle in handles {
                let _ = handle.await;
            }
        };

        if tokio::time::timeout(RELAY_DRAIN_TIMEOUT, joined).await.is_err() {
            debug!("Output relay still open after process exit, detaching");
            for abort in aborts {
                abort.abort();
            }
        }
    }

    fn abort_relays(&mut self) {
        for handle in self.relays.drain(..) {
            handle.abort();
        }
    }
}

/// Kills every process in the build's group, including tools the shell started
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        debug!(pid, error = %e, "Failed to kill build process group");
    }
}
