// Service configuration (environment driven)

use crate::application::constants::{
    DEFAULT_QUERY_TIMEOUT, DEFAULT_RATE_LIMIT_BURST, DEFAULT_RATE_LIMIT_PER_SEC, DEFAULT_RPC_HOST,
    DEFAULT_RPC_PORT,
};
use crate::error::{AppError, Result};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_RPC_HOST: &str = "KERNVER_RPC_HOST";
pub const ENV_RPC_PORT: &str = "KERNVER_RPC_PORT";
pub const ENV_QUERY_TIMEOUT_MS: &str = "KERNVER_QUERY_TIMEOUT_MS";
pub const ENV_RATE_LIMIT_BURST: &str = "KERNVER_RATE_LIMIT_BURST";
pub const ENV_RATE_LIMIT_RATE: &str = "KERNVER_RATE_LIMIT_RATE";

/// Runtime settings for the daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub rpc_host: String,
    pub rpc_port: u16,
    /// `None` disables the bound on a `uname -r` run
    pub query_timeout: Option<Duration>,
    pub rate_limit_burst: u32,
    pub rate_limit_per_sec: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rpc_host: DEFAULT_RPC_HOST.to_string(),
            rpc_port: DEFAULT_RPC_PORT,
            query_timeout: Some(DEFAULT_QUERY_TIMEOUT),
            rate_limit_burst: DEFAULT_RATE_LIMIT_BURST,
            rate_limit_per_sec: DEFAULT_RATE_LIMIT_PER_SEC,
        }
    }
}

impl ServiceConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (unset keys keep their defaults)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_ms: u64 = parse_var(
            &lookup,
            ENV_QUERY_TIMEOUT_MS,
            DEFAULT_QUERY_TIMEOUT.as_millis() as u64,
        )?;

        let config = Self {
            rpc_host: lookup(ENV_RPC_HOST).unwrap_or(defaults.rpc_host),
            rpc_port: parse_var(&lookup, ENV_RPC_PORT, defaults.rpc_port)?,
            query_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            rate_limit_burst: parse_var(&lookup, ENV_RATE_LIMIT_BURST, defaults.rate_limit_burst)?,
            rate_limit_per_sec: parse_var(
                &lookup,
                ENV_RATE_LIMIT_RATE,
                defaults.rate_limit_per_sec,
            )?,
        };

        if config.rate_limit_burst == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_RATE_LIMIT_BURST
            )));
        }

        // A zero refill rate would throttle every call once the burst is spent
        if config.rate_limit_per_sec == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_RATE_LIMIT_RATE
            )));
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}
