//! Kernver SDK - Rust Client Library
//!
//! Provides a client for the kernel release service daemon.
//!
//! # Example
//!
//! ```no_run
//! use kernver_sdk::KernverClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KernverClient::connect("http://127.0.0.1:9531").await?;
//!
//!     let release = client.get_uname().await?;
//!     println!("Kernel release: {}", release);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::KernverClient;
pub use error::{Result, SdkError};
pub use types::{LifecycleResponse, METHOD_DESTROY, METHOD_EXIT, METHOD_GET_UNAME};
