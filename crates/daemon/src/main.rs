//! Kernver Service - Main Entry Point
//! Hosts getUname and the destroy/exit hooks over JSON-RPC

mod logging;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

// Import workspace crates
use kernver_api_rpc::{RpcServer, RpcServerConfig};
use kernver_core::application::{
    shutdown_channel, KernelVersionQuery, ServiceLifecycle, ShutdownToken,
};
use kernver_core::config::ServiceConfig;
use kernver_infra_system::SubprocessRunner;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    logging::init_logging()?;

    info!("Kernver service v{} starting...", VERSION);

    // 2. Load configuration
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    info!(
        rpc_host = %config.rpc_host,
        rpc_port = config.rpc_port,
        query_timeout = ?config.query_timeout,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let lifecycle = Arc::new(ServiceLifecycle::new(shutdown_tx));

    let query = Arc::new(
        KernelVersionQuery::new(Arc::new(SubprocessRunner::new()))
            .with_timeout(config.query_timeout)
            .with_cancellation(lifecycle.token()),
    );

    // 4. Start JSON-RPC server
    let rpc_server = RpcServer::new(RpcServerConfig::from(&config), query, lifecycle.clone());
    let started = rpc_server
        .start()
        .await
        .context("RPC server start failed")?;

    info!(local_addr = %started.local_addr, "System ready. Waiting for calls...");
    info!("Press Ctrl+C to shutdown");

    // 5. Wait for destroy/exit or Ctrl+C
    wait_for_shutdown(&lifecycle, shutdown_rx).await?;

    // 6. Graceful shutdown
    started
        .handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    started.handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}

async fn wait_for_shutdown(lifecycle: &ServiceLifecycle, mut token: ShutdownToken) -> Result<()> {
    tokio::select! {
        _ = token.wait() => {
            info!("Shutdown requested by caller. Exiting...");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Shutdown signal received. Exiting gracefully...");
            lifecycle.destroy();
        }
    }

    Ok(())
}
