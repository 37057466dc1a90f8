// Domain Layer - Pure result shaping, no I/O

pub mod kernel_release;

// Re-exports
pub use kernel_release::{error_string, CommandResult, ERROR_PREFIX, KERNEL_RELEASE_NOT_FOUND};
