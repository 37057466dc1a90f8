//! RPC Method Handlers
//!
//! Thin adapters from JSON-RPC calls to the query and lifecycle hooks.

use crate::error::to_rpc_error;
use crate::rate_limiter::RateLimiter;
use crate::types::LifecycleResponse;
use jsonrpsee::types::ErrorObjectOwned;
use kernver_core::application::{KernelVersionQuery, ServiceLifecycle};
use kernver_core::error::AppError;
use std::sync::Arc;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    query: Arc<KernelVersionQuery>,
    lifecycle: Arc<ServiceLifecycle>,
    rate_limiter: Arc<RateLimiter>,
}

impl RpcHandler {
    pub fn new(
        query: Arc<KernelVersionQuery>,
        lifecycle: Arc<ServiceLifecycle>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            query,
            lifecycle,
            rate_limiter,
        }
    }

    /// user_service.get_uname.v1
    ///
    /// Query failures are part of the string result; only throttling is an
    /// RPC error.
    pub async fn get_uname(&self) -> Result<String, ErrorObjectOwned> {
        if !self.rate_limiter.check().await {
            return Err(to_rpc_error(AppError::Throttled(
                "Rate limit exceeded. Please slow down.".to_string(),
            )));
        }

        Ok(self.query.get_uname().await)
    }

    /// user_service.destroy.v1
    pub async fn destroy(&self) -> Result<LifecycleResponse, ErrorObjectOwned> {
        self.lifecycle.destroy();
        Ok(LifecycleResponse { accepted: true })
    }

    /// user_service.exit.v1
    pub async fn exit(&self) -> Result<LifecycleResponse, ErrorObjectOwned> {
        self.lifecycle.exit();
        Ok(LifecycleResponse { accepted: true })
    }
}
