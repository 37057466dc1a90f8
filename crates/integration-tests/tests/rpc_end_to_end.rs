//! JSON-RPC End-to-End Tests
//!
//! Server with a scripted runner, driven through the SDK client.

use kernver_api_rpc::{RpcServer, RpcServerConfig, StartedServer};
use kernver_core::application::{
    shutdown_channel, KernelVersionQuery, ServiceLifecycle, ShutdownToken,
};
use kernver_core::port::command_runner::mocks::MockCommandRunner;
use kernver_core::port::CommandRunner;
use kernver_infra_system::SubprocessRunner;
use kernver_sdk::{KernverClient, SdkError};
use std::sync::Arc;
use std::time::Duration;

async fn start_service(
    runner: Arc<dyn CommandRunner>,
    burst: u32,
) -> (StartedServer, KernverClient, ShutdownToken) {
    let (tx, token) = shutdown_channel();
    let lifecycle = Arc::new(ServiceLifecycle::new(tx));
    let query = Arc::new(
        KernelVersionQuery::new(runner)
            .with_timeout(Some(Duration::from_secs(5)))
            .with_cancellation(lifecycle.token()),
    );

    let config = RpcServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        rate_limit_burst: burst,
        rate_limit_per_sec: 0,
    };

    let started = RpcServer::new(config, query, lifecycle).start().await.unwrap();
    let client = KernverClient::connect(format!("http://{}", started.local_addr))
        .await
        .unwrap();

    (started, client, token)
}

#[tokio::test]
async fn test_release_passes_through() {
    let (started, client, _token) =
        start_service(Arc::new(MockCommandRunner::new_output("5.10.0", 0)), 10).await;

    assert_eq!(client.get_uname().await.unwrap(), "5.10.0");

    started.handle.stop().unwrap();
}

#[tokio::test]
async fn test_fallback_over_the_wire() {
    let (started, client, _token) =
        start_service(Arc::new(MockCommandRunner::new_silent(1)), 10).await;

    assert_eq!(
        client.get_uname().await.unwrap(),
        "Kernel release version not found"
    );

    started.handle.stop().unwrap();
}

#[tokio::test]
async fn test_spawn_failure_is_a_string_not_an_rpc_error() {
    let (started, client, _token) = start_service(
        Arc::new(MockCommandRunner::new_spawn_failure("No such file or directory")),
        10,
    )
    .await;

    assert_eq!(
        client.get_uname().await.unwrap(),
        "Error: No such file or directory"
    );

    started.handle.stop().unwrap();
}

#[tokio::test]
async fn test_throttled_call_is_rpc_error() {
    let (started, client, _token) =
        start_service(Arc::new(MockCommandRunner::new_output("5.10.0", 0)), 1).await;

    assert!(client.get_uname().await.is_ok());

    let err = client.get_uname().await.unwrap_err();
    assert!(matches!(err, SdkError::Rpc { code: 4003, .. }));

    started.handle.stop().unwrap();
}

#[tokio::test]
async fn test_destroy_fires_shutdown_token() {
    let (started, client, mut token) =
        start_service(Arc::new(MockCommandRunner::new_silent(0)), 10).await;

    assert!(client.destroy().await.unwrap().accepted);

    tokio::time::timeout(Duration::from_secs(1), token.wait())
        .await
        .expect("shutdown token should fire");

    started.handle.stop().unwrap();
}

#[tokio::test]
async fn test_exit_then_queries_are_cancelled() {
    let (started, client, _token) =
        start_service(Arc::new(MockCommandRunner::new_output("5.10.0", 0)), 10).await;

    assert!(client.exit().await.unwrap().accepted);

    assert_eq!(
        client.get_uname().await.unwrap(),
        "Error: query cancelled by service shutdown"
    );

    started.handle.stop().unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_uname_over_the_wire() {
    let (started, client, _token) = start_service(Arc::new(SubprocessRunner::new()), 10).await;

    let release = client.get_uname().await.unwrap();
    assert!(!release.is_empty());
    assert!(!release.starts_with("Error: "));

    started.handle.stop().unwrap();
}

#[tokio::test]
async fn test_stopped_server_surfaces_transport_failure() {
    let (started, client, _token) =
        start_service(Arc::new(MockCommandRunner::new_output("5.10.0", 0)), 10).await;

    started.handle.stop().unwrap();
    started.handle.stopped().await;

    let err = client.get_uname().await.unwrap_err();
    assert!(matches!(err, SdkError::Transport(_)));
    assert!(client
        .get_uname_display()
        .await
        .starts_with("Error fetching uname release version: "));
}
