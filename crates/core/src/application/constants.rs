// Service constants (no magic values)
use std::time::Duration;

/// Log target shared by the query and lifecycle hooks
pub const LOG_TARGET: &str = "user_service";

/// Upper bound on one `uname -r` run (10s)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default RPC bind address (localhost only)
pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";

/// Default RPC port
pub const DEFAULT_RPC_PORT: u16 = 9531;

/// Burst of `get_uname` calls allowed before throttling
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 20;

/// Sustained `get_uname` calls per second
pub const DEFAULT_RATE_LIMIT_PER_SEC: u32 = 10;
