// Kernel release query (getUname)

use super::constants::{DEFAULT_QUERY_TIMEOUT, LOG_TARGET};
use super::lifecycle::ShutdownToken;
use crate::domain::{error_string, CommandResult};
use crate::port::{CommandRunner, CommandSpec, FirstLineOutput, QueryError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Runs `uname -r` once per call and shapes the result
///
/// Holds no per-call state, so one instance can serve concurrent callers;
/// each call spawns its own child.
pub struct KernelVersionQuery {
    runner: Arc<dyn CommandRunner>,
    timeout: Option<Duration>,
    cancel: Option<ShutdownToken>,
}

impl KernelVersionQuery {
    /// Create a query with the default timeout and no cancellation
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            timeout: Some(DEFAULT_QUERY_TIMEOUT),
            cancel: None,
        }
    }

    /// Bound each run; `None` waits for the child indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Abort in-flight runs when `token` fires
    pub fn with_cancellation(mut self, token: ShutdownToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Typed form of the query
    ///
    /// Logs the exit code on success and one error line on failure.
    pub async fn query(&self) -> Result<CommandResult, QueryError> {
        let command = CommandSpec::UNAME_RELEASE;

        match self.run_bounded(&command).await {
            Ok(output) => {
                let code = output
                    .exit_code
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string());
                info!(
                    target: LOG_TARGET,
                    exit_code = ?output.exit_code,
                    "{} has exited with {}",
                    command,
                    code
                );

                Ok(CommandResult::from_first_line(
                    output.first_line,
                    output.exit_code,
                ))
            }
            Err(e) => {
                error!(
                    target: LOG_TARGET,
                    command = %command,
                    error = %e,
                    "Failed to execute command '{}'",
                    command
                );
                Err(e)
            }
        }
    }

    /// getUname: always returns a non-empty string
    ///
    /// Failures come back as `"Error: <description>"`.
    pub async fn get_uname(&self) -> String {
        match self.query().await {
            Ok(result) => result.value,
            Err(e) => error_string(&e),
        }
    }

    async fn run_bounded(&self, command: &CommandSpec) -> Result<FirstLineOutput, QueryError> {
        let Some(token) = &self.cancel else {
            return self.run_with_timeout(command).await;
        };

        if token.is_shutdown() {
            return Err(QueryError::Cancelled);
        }

        let mut token = token.clone();
        tokio::select! {
            result = self.run_with_timeout(command) => result,
            _ = token.wait() => Err(QueryError::Cancelled),
        }
    }

    async fn run_with_timeout(&self, command: &CommandSpec) -> Result<FirstLineOutput, QueryError> {
        let Some(limit) = self.timeout else {
            return self.runner.run_first_line(command).await;
        };

        tokio::time::timeout(limit, self.runner.run_first_line(command))
            .await
            .map_err(|_| QueryError::Timeout {
                command: command.to_string(),
                timeout_ms: limit.as_millis() as u64,
            })?
    }
}
