//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

pub const METHOD_GET_UNAME: &str = "user_service.get_uname.v1";
pub const METHOD_DESTROY: &str = "user_service.destroy.v1";
pub const METHOD_EXIT: &str = "user_service.exit.v1";

/// Response from destroy / exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleResponse {
    pub accepted: bool,
}
