// Service lifecycle hooks (destroy / exit)

mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use super::constants::LOG_TARGET;
use tracing::info;

/// Lifecycle hooks a remote caller may trigger
///
/// `destroy` does not exit the process itself. It raises the shutdown
/// signal; the host observes it, stops serving and exits with status 0.
pub struct ServiceLifecycle {
    sender: ShutdownSender,
}

impl ServiceLifecycle {
    pub fn new(sender: ShutdownSender) -> Self {
        Self { sender }
    }

    /// Request process-wide shutdown with a successful exit status
    pub fn destroy(&self) {
        info!(target: LOG_TARGET, "destroy");
        self.sender.shutdown();
    }

    /// Alias of [`ServiceLifecycle::destroy`]
    pub fn exit(&self) {
        self.destroy();
    }

    /// Token for anything that must stop with the service
    pub fn token(&self) -> ShutdownToken {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_signals_shutdown() {
        let (tx, token) = shutdown_channel();
        let lifecycle = ServiceLifecycle::new(tx);

        lifecycle.destroy();
        assert!(token.is_shutdown());
        assert!(lifecycle.token().is_shutdown());
    }

    #[test]
    fn test_exit_delegates_to_destroy() {
        let (tx, token) = shutdown_channel();
        let lifecycle = ServiceLifecycle::new(tx);

        lifecycle.exit();
        assert!(token.is_shutdown());
    }

    #[test]
    fn test_destroy_is_repeatable() {
        let (tx, token) = shutdown_channel();
        let lifecycle = ServiceLifecycle::new(tx);

        lifecycle.destroy();
        lifecycle.exit();
        assert!(token.is_shutdown());
    }
}
