use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Command;

#[derive(Debug)]
pub enum RunError {
    /// The program could not be started (missing binary, permissions)
    Spawn(std::io::Error),
    /// The process was still running when the deadline passed and has been killed
    TimedOut,
}

/// Extension trait for external tool execution with a hard deadline.
pub trait CommandTimeoutExt {
    /// Runs the command to completion, killing it if it outlives `timeout`.
    fn status_within(
        &mut self,
        timeout: Duration,
    ) -> futures::future::BoxFuture<'_, Result<ExitStatus, RunError>>;
}

impl CommandTimeoutExt for Command {
    fn status_within(
        &mut self,
        timeout: Duration,
    ) -> futures::future::BoxFuture<'_, Result<ExitStatus, RunError>> {
        Box::pin(async move {
            let mut child = self.kill_on_drop(true).spawn().map_err(RunError::Spawn)?;
            match tokio::time::timeout(timeout, child.wait()).await {
                Ok(status) => status.map_err(RunError::Spawn),
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to kill timed out process: {}", e);
                    }
                    Err(RunError::TimedOut)
                }
            }
        })
    }
}
