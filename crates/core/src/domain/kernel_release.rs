// Kernel release result model

use std::fmt::Display;

/// Returned when `uname -r` produced no usable first line
pub const KERNEL_RELEASE_NOT_FOUND: &str = "Kernel release version not found";

/// Prefix of every failure string handed to callers
pub const ERROR_PREFIX: &str = "Error: ";

/// Outcome of one successful `uname -r` invocation
///
/// `exit_code` is kept for logging only. The caller-facing string is
/// decided by the first output line alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub value: String,
    pub exit_code: Option<i32>,
}

impl CommandResult {
    /// Build a result from the first stdout line of the child
    ///
    /// An absent or empty line yields [`KERNEL_RELEASE_NOT_FOUND`].
    pub fn from_first_line(first_line: Option<String>, exit_code: Option<i32>) -> Self {
        let value = match first_line {
            Some(line) if !line.is_empty() => line,
            _ => KERNEL_RELEASE_NOT_FOUND.to_string(),
        };

        Self { value, exit_code }
    }
}

/// Serialize a failure to the caller-facing string form
pub fn error_string(reason: &impl Display) -> String {
    format!("{}{}", ERROR_PREFIX, reason)
}
