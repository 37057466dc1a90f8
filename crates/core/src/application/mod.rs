// Application Layer - Use Cases

pub mod constants;
pub mod lifecycle;
pub mod uname_query;

// Re-exports
pub use lifecycle::{shutdown_channel, ServiceLifecycle, ShutdownSender, ShutdownToken};
pub use uname_query::KernelVersionQuery;
