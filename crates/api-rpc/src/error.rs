//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use kernver_core::error::AppError;
use thiserror::Error;

/// RPC Error Codes
pub mod code {
    pub const THROTTLED: i32 = 4003;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Convert AppError to JSON-RPC ErrorObject
///
/// `get_uname` never routes query failures through here; they are part of
/// its string result.
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Throttled(msg) => ErrorObjectOwned::owned(code::THROTTLED, msg, None::<()>),
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

/// Failures while bringing the server up
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to build server on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to register method: {0}")]
    Register(#[from] jsonrpsee::core::RegisterMethodError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttled_maps_to_4003() {
        let err = to_rpc_error(AppError::Throttled("slow down".to_string()));
        assert_eq!(err.code(), code::THROTTLED);
        assert_eq!(err.message(), "slow down");
    }

    #[test]
    fn test_config_maps_to_internal() {
        let err = to_rpc_error(AppError::Config("bad port".to_string()));
        assert_eq!(err.code(), code::INTERNAL_ERROR);
    }
}
