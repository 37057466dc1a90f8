// Kernver Core - Query Logic & Ports
// NO infrastructure dependencies (ports & adapters)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
