//! Test entry point execution
//!
//! The entry point runs in its own process group with stdout and stderr
//! captured. Once the entry point exits or times out the whole group is
//! killed, so helpers spawned by the driver do not outlive the test.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long to wait for output pipes to drain after the process is gone
const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Program and fixed arguments used to launch every test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl EntryPoint {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Append a fixed argument; empty arguments are ignored
    pub fn with_arg<S: Into<String>>(mut self, arg: S) -> Self {
        let arg = arg.into();
        if !arg.is_empty() {
            self.args.push(arg);
        }
        self
    }

    pub fn with_env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Captured result of one test process
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// `None` when the process was killed or ended by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
    pub elapsed: Duration,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Run `entry` with `args` from `cwd`, killing it after `timeout`
///
/// Fails only if the process cannot be spawned.
pub async fn run_test_process(
    entry: &EntryPoint,
    cwd: &Path,
    args: &[String],
    timeout: Duration,
) -> std::io::Result<ProcessOutcome> {
    let mut command = Command::new(&entry.program);
    command
        .args(&entry.args)
        .args(args)
        .current_dir(cwd)
        .envs(entry.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    let started = Instant::now();
    let mut child = command.spawn()?;
    // The id is gone once the child is reaped; the group outlives it.
    let pid = child.id();
    debug!(program = %entry.program, ?pid, cwd = %cwd.display(), "Test process started");

    let stdout = OutputCapture::spawn(child.stdout.take());
    let stderr = OutputCapture::spawn(child.stderr.take());

    let waited = tokio::time::timeout(timeout, child.wait()).await;
    let (status, timed_out) = match waited {
        Ok(status) => (Some(status?), false),
        Err(_) => {
            warn!(?pid, ?timeout, "Test process timed out, killing it");
            if let Err(e) = child.kill().await {
                debug!(error = %e, "Failed to kill test process");
            }
            (None, true)
        }
    };
    // Background helpers may still hold the output pipes open.
    kill_process_group(pid);

    Ok(ProcessOutcome {
        exit_code: status.as_ref().and_then(ExitStatus::code),
        stdout: stdout.finish().await,
        stderr: stderr.finish().await,
        timed_out,
        elapsed: started.elapsed(),
    })
}

/// Output read so far by a background task
struct OutputCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl OutputCapture {
    fn spawn<R: AsyncRead + Unpin + Send + 'static>(reader: Option<R>) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let task = tokio::spawn(async move {
            let Some(mut reader) = reader else {
                return;
            };
            let mut chunk = [0_u8; 8192];
            loop {
                match reader.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        let mut buffer = sink.lock().unwrap_or_else(PoisonError::into_inner);
                        buffer.extend_from_slice(&chunk[..n]);
                    }
                    Err(e) => {
                        debug!(error = %e, "Failed to read test process output");
                        break;
                    }
                }
            }
        });
        Self { buffer, task }
    }

    /// Wait for the pipe to close, keeping partial output if it never does
    async fn finish(mut self) -> String {
        match tokio::time::timeout(OUTPUT_DRAIN_TIMEOUT, &mut self.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "Output reader task failed"),
            Err(_) => {
                debug!("Output pipe still open, keeping what was read");
                self.task.abort();
            }
        }
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn kill_process_group(pid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        let Some(pid) = pid.and_then(|id| i32::try_from(id).ok()) else {
            return;
        };
        match killpg(Pid::from_raw(pid), Signal::SIGKILL) {
            Ok(()) => debug!(pid, "Killed leftover test process group"),
            Err(Errno::ESRCH) => {}
            Err(e) => debug!(pid, error = %e, "Failed to kill process group"),
        }
    }
    #[cfg(not(unix))]
    let _ = pid;
}
