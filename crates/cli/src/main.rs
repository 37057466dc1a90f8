//! Kernver CLI - Command-line interface for the kernel release service

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9531";
const ERROR_PREFIX: &str = "Error: ";

#[derive(Parser)]
#[command(name = "kernver")]
#[command(about = "Kernel release service CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "KERNVER_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the kernel release reported by the service (uname -r)
    Uname,

    /// Ask the service to shut down
    Destroy,

    /// Alias of destroy
    Exit,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to service")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

async fn request_shutdown(url: &str, method: &str) -> Result<()> {
    let result = call_rpc(url, method, json!([])).await?;

    if result["accepted"].as_bool().unwrap_or(false) {
        println!("{}", "✓ Shutdown requested".green().bold());
    } else {
        println!("{}", "⚠ Service did not accept the request".yellow());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Uname => {
            let result = call_rpc(&cli.rpc_url, "user_service.get_uname.v1", json!([])).await?;
            let release = result
                .as_str()
                .context("Service returned a non-string result")?;

            if release.starts_with(ERROR_PREFIX) {
                println!("{}", release.red());
            } else {
                println!("{}", release);
            }
        }

        Commands::Destroy => {
            request_shutdown(&cli.rpc_url, "user_service.destroy.v1").await?;
        }

        Commands::Exit => {
            request_shutdown(&cli.rpc_url, "user_service.exit.v1").await?;
        }
    }

    Ok(())
}
