//! Kernver Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{LifecycleResponse, METHOD_DESTROY, METHOD_EXIT, METHOD_GET_UNAME};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use std::time::Duration;
use tracing::error;

const LOG_TARGET: &str = "kernver_sdk";

/// Kernver service client
///
/// # Example
///
/// ```no_run
/// use kernver_sdk::KernverClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = KernverClient::connect("http://127.0.0.1:9531").await?;
/// # Ok(())
/// # }
/// ```
pub struct KernverClient {
    client: HttpClient,
}

impl KernverClient {
    /// Connect to the service daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9531`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Kernel release string exactly as the service reports it
    ///
    /// Service-side failures arrive as `Ok("Error: ...")`; only transport
    /// and RPC failures are `Err`.
    pub async fn get_uname(&self) -> Result<String> {
        let release: String = self.client.request(METHOD_GET_UNAME, rpc_params![]).await?;
        Ok(release)
    }

    /// Like [`KernverClient::get_uname`] but always yields a display string
    pub async fn get_uname_display(&self) -> String {
        match self.get_uname().await {
            Ok(release) => release,
            Err(e) => {
                error!(target: LOG_TARGET, error = %e, "Error getting uname version");
                format!("Error fetching uname release version: {}", e)
            }
        }
    }

    /// Ask the service process to shut down
    pub async fn destroy(&self) -> Result<LifecycleResponse> {
        let response: LifecycleResponse = self.client.request(METHOD_DESTROY, rpc_params![]).await?;
        Ok(response)
    }

    /// Alias of [`KernverClient::destroy`] on the service side
    pub async fn exit(&self) -> Result<LifecycleResponse> {
        let response: LifecycleResponse = self.client.request(METHOD_EXIT, rpc_params![]).await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_connection_error() {
        let result = KernverClient::connect("not a url").await;
        assert!(matches!(result, Err(SdkError::Connection(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_reported_as_string() {
        // Port 1 on localhost is not expected to accept connections
        let client = KernverClient::connect("http://127.0.0.1:1").await.unwrap();

        let display = client.get_uname_display().await;
        assert!(display.starts_with("Error fetching uname release version: "));
    }
}
