//! Simple SDK Example
//!
//! Demonstrates basic usage of the Kernver SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package kernver-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use kernver_sdk::KernverClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Kernver SDK - Simple Example");
    println!("============================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = KernverClient::connect("http://127.0.0.1:9531").await?;
    println!("   ✓ Connected\n");

    // 2. Query kernel release
    println!("2. Querying kernel release...");
    let release = client.get_uname().await?;
    if release.starts_with("Error: ") {
        println!("   ⚠ Service reported a failure: {}\n", release);
    } else {
        println!("   ✓ Kernel release: {}\n", release);
    }

    // 3. Same call, display form
    println!("3. Display form: {}", client.get_uname_display().await);

    println!("\n✓ Example completed successfully!");

    Ok(())
}
