//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

/// Query string of `GET /tces`.
///
/// Both fields are kept as raw strings; validation happens in the handler so
/// malformed input gets the HTML error page rather than axum's plain-text
/// rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TceQuery {
    pub tic: Option<String>,
    pub pipeline: Option<String>,
}

/// Readability of each database file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub spoc: bool,
    pub tess_spoc: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub databases: DatabaseStatus,
}
