//! JSON-RPC Server
//!
//! Serves the kernel release query over JSON-RPC 2.0 on localhost TCP.

use crate::error::ServerError;
use crate::handler::RpcHandler;
use crate::rate_limiter::RateLimiter;
use crate::types::{METHOD_DESTROY, METHOD_EXIT, METHOD_GET_UNAME};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use kernver_core::application::{KernelVersionQuery, ServiceLifecycle};
use kernver_core::config::ServiceConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_burst: u32,
    pub rate_limit_per_sec: u32,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self::from(&ServiceConfig::default())
    }
}

impl From<&ServiceConfig> for RpcServerConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            host: config.rpc_host.clone(),
            port: config.rpc_port,
            rate_limit_burst: config.rate_limit_burst,
            rate_limit_per_sec: config.rate_limit_per_sec,
        }
    }
}

/// Running server plus the address it actually bound
pub struct StartedServer {
    pub handle: ServerHandle,
    pub local_addr: SocketAddr,
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        query: Arc<KernelVersionQuery>,
        lifecycle: Arc<ServiceLifecycle>,
    ) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_burst,
            config.rate_limit_per_sec,
        ));

        Self {
            config,
            handler: Arc::new(RpcHandler::new(query, lifecycle, rate_limiter)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Port 0 binds an ephemeral port; see [`StartedServer::local_addr`].
    pub async fn start(self) -> Result<StartedServer, ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        let local_addr = server.local_addr().map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

        let module = self.build_module()?;

        info!(local_addr = %local_addr, "JSON-RPC server started successfully");

        Ok(StartedServer {
            handle: server.start(module),
            local_addr,
        })
    }

    fn build_module(&self) -> Result<RpcModule<()>, ServerError> {
        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module.register_async_method(METHOD_GET_UNAME, move |_params, _, _| {
            let handler = handler.clone();
            async move { handler.get_uname().await }
        })?;

        let handler = self.handler.clone();
        module.register_async_method(METHOD_DESTROY, move |_params, _, _| {
            let handler = handler.clone();
            async move { handler.destroy().await }
        })?;

        let handler = self.handler.clone();
        module.register_async_method(METHOD_EXIT, move |_params, _, _| {
            let handler = handler.clone();
            async move { handler.exit().await }
        })?;

        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonrpsee::core::client::ClientT;
    use jsonrpsee::http_client::HttpClientBuilder;
    use jsonrpsee::rpc_params;
    use kernver_core::application::shutdown_channel;
    use kernver_core::port::command_runner::mocks::MockCommandRunner;

    fn local_config() -> RpcServerConfig {
        RpcServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_uname_over_http() {
        let (tx, _token) = shutdown_channel();
        let query = Arc::new(KernelVersionQuery::new(Arc::new(
            MockCommandRunner::new_output("6.1.21-android13", 0),
        )));
        let server = RpcServer::new(local_config(), query, Arc::new(ServiceLifecycle::new(tx)));

        let started = server.start().await.unwrap();
        let client = HttpClientBuilder::default()
            .build(format!("http://{}", started.local_addr))
            .unwrap();

        let release: String = client.request(METHOD_GET_UNAME, rpc_params![]).await.unwrap();
        assert_eq!(release, "6.1.21-android13");

        started.handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_exit_over_http_fires_shutdown() {
        let (tx, mut token) = shutdown_channel();
        let query = Arc::new(KernelVersionQuery::new(Arc::new(MockCommandRunner::new_silent(0))));
        let server = RpcServer::new(local_config(), query, Arc::new(ServiceLifecycle::new(tx)));

        let started = server.start().await.unwrap();
        let client = HttpClientBuilder::default()
            .build(format!("http://{}", started.local_addr))
            .unwrap();

        let response: serde_json::Value = client.request(METHOD_EXIT, rpc_params![]).await.unwrap();
        assert_eq!(response, serde_json::json!({ "accepted": true }));

        token.wait().await;
        assert!(token.is_shutdown());

        started.handle.stop().unwrap();
    }
}
