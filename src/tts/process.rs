use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{ChildStderr, Command};

/// How long to keep draining stderr once the child is gone.
const STDERR_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, `None` when killed by a signal or on timeout.
    pub status: Option<i32>,
    pub stderr: String,
    pub outcome: Outcome,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Run an external tool to completion, killing it once `timeout` elapses.
///
/// The child is spawned with `kill_on_drop`, so dropping the returned future
/// (for example when the HTTP client goes away) also terminates the process.
/// Only spawn failures surface as `Err`; exit status and timeouts are reported
/// through [`ToolOutput`]. Stderr is read concurrently, so whatever the tool
/// printed before a timeout is still returned.
pub async fn run_tool<I, S>(program: &Path, args: I, timeout: Duration) -> io::Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let captured = Arc::new(Mutex::new(Vec::new()));
    let reader = child
        .stderr
        .take()
        .map(|pipe| tokio::spawn(drain(pipe, Arc::clone(&captured))));

    let (status, outcome) = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => {
            let status = status?;
            let outcome = if status.success() {
                Outcome::Success
            } else {
                Outcome::Failed
            };
            (status.code(), outcome)
        }
        Err(_) => {
            if let Err(e) = child.kill().await {
                tracing::warn!("Failed to kill {}: {}", program.display(), e);
            }
            (None, Outcome::TimedOut)
        }
    };

    // A grandchild may still hold the pipe open; don't wait on it forever
    if let Some(mut reader) = reader {
        if tokio::time::timeout(STDERR_GRACE, &mut reader).await.is_err() {
            reader.abort();
        }
    }

    let stderr = {
        let buf = captured.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).trim().to_string()
    };

    Ok(ToolOutput {
        status,
        stderr,
        outcome,
    })
}

async fn drain(mut pipe: ChildStderr, sink: Arc<Mutex<Vec<u8>>>) {
    let mut chunk = [0u8; 4096];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => sink
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(&chunk[..n]),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const SH: &str = "/bin/sh";

    #[tokio::test]
    async fn test_success() {
        let out = run_tool(Path::new(SH), ["-c", "exit 0"], Duration::from_secs(5))
            .await
            .unwrap();
        assert!(out.success());
        assert_eq!(out.status, Some(0));
    }

    #[tokio::test]
    async fn test_failure_captures_stderr() {
        let out = run_tool(
            Path::new(SH),
            ["-c", "echo 'model exploded' >&2; exit 3"],
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(out.outcome, Outcome::Failed);
        assert_eq!(out.status, Some(3));
        assert_eq!(out.stderr, "model exploded");
    }

    #[tokio::test]
    async fn test_timeout() {
        let start = std::time::Instant::now();
        let out = run_tool(Path::new(SH), ["-c", "sleep 10"], Duration::from_millis(200))
            .await
            .unwrap();
        assert_eq!(out.outcome, Outcome::TimedOut);
        assert_eq!(out.status, None);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_timeout_keeps_stderr() {
        let out = run_tool(
            Path::new(SH),
            ["-c", "echo 'loading model xyz' >&2; sleep 10"],
            Duration::from_millis(500),
        )
        .await
        .unwrap();
        assert_eq!(out.outcome, Outcome::TimedOut);
        assert_eq!(out.stderr, "loading model xyz");
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = run_tool(
            Path::new("/definitely/not/a/program"),
            Vec::<String>::new(),
            Duration::from_secs(1),
        )
        .await;
        assert!(result.is_err());
    }
}
