//! RPC Request/Response Types
//!
//! Method names and result shapes of the service.

use serde::{Deserialize, Serialize};

/// getUname: no params, result is a plain string
pub const METHOD_GET_UNAME: &str = "user_service.get_uname.v1";

/// destroy: request shutdown of the hosting process
pub const METHOD_DESTROY: &str = "user_service.destroy.v1";

/// exit: alias of destroy
pub const METHOD_EXIT: &str = "user_service.exit.v1";

/// destroy.v1 / exit.v1 result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleResponse {
    pub accepted: bool,
}
