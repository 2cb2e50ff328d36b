//! DTO for the status endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
}
