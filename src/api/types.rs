//! API query and error types.

use serde::{Deserialize, Serialize};

/// Optional horizon query parameter shared by `/forecast` and `/summary`.
#[derive(Debug, Deserialize)]
pub struct HorizonQuery {
    /// Days to forecast; must be one of the offered horizons.
    pub days: Option<u32>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
