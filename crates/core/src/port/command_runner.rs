// Command Runner Port
// Abstraction over spawning the fixed external command and reading one line

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// A fixed argv invocation (never routed through a shell)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl CommandSpec {
    /// `uname -r`: report kernel release
    pub const UNAME_RELEASE: CommandSpec = CommandSpec::new("uname", &["-r"]);

    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What the child produced before it exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstLineOutput {
    /// First stdout line with its terminator stripped, `None` on EOF
    pub first_line: Option<String>,
    /// Exit code, `None` if the platform reported none
    pub exit_code: Option<i32>,
}

/// Query errors
///
/// Display renders the bare description; callers prepend `"Error: "`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{0}")]
    SpawnFailed(String),

    #[error("{0}")]
    StreamRead(String),

    #[error("{0}")]
    InterruptedWait(String),

    #[error("{command} timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },

    #[error("query cancelled by service shutdown")]
    Cancelled,
}

/// Command Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns the real child process
/// - MockCommandRunner: scripted output for tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn `command`, read its first stdout line, then wait for exit
    ///
    /// # Errors
    /// - QueryError::SpawnFailed if the process cannot be started
    /// - QueryError::StreamRead if reading stdout fails
    /// - QueryError::InterruptedWait if waiting for the exit status fails
    async fn run_first_line(&self, command: &CommandSpec) -> Result<FirstLineOutput, QueryError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Child exits with `exit_code` after printing `first_line`
        Output {
            first_line: Option<String>,
            exit_code: Option<i32>,
        },
        /// Fail with the given error
        Fail(QueryError),
        /// Never complete (simulates a hung child)
        Hang,
    }

    /// Mock Command Runner for testing
    pub struct MockCommandRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<CommandSpec>>>,
    }

    impl MockCommandRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_output(first_line: impl Into<String>, exit_code: i32) -> Self {
            Self::new(MockBehavior::Output {
                first_line: Some(first_line.into()),
                exit_code: Some(exit_code),
            })
        }

        pub fn new_silent(exit_code: i32) -> Self {
            Self::new(MockBehavior::Output {
                first_line: None,
                exit_code: Some(exit_code),
            })
        }

        pub fn new_spawn_failure(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(QueryError::SpawnFailed(message.into())))
        }

        pub fn new_hang() -> Self {
            Self::new(MockBehavior::Hang)
        }

        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.lock().unwrap() = behavior;
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_command(&self) -> Option<CommandSpec> {
            self.calls.lock().unwrap().last().copied()
        }
    }

    #[async_trait]
    impl CommandRunner for MockCommandRunner {
        async fn run_first_line(
            &self,
            command: &CommandSpec,
        ) -> Result<FirstLineOutput, QueryError> {
            self.calls.lock().unwrap().push(*command);

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Output {
                    first_line,
                    exit_code,
                } => Ok(FirstLineOutput {
                    first_line,
                    exit_code,
                }),
                MockBehavior::Fail(err) => Err(err),
                MockBehavior::Hang => std::future::pending().await,
            }
        }
    }
}
