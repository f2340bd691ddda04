//! Health check payload shared by the HTTP services

use serde::Serialize;

/// Body of `GET /health`: status, module name, and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    /// Healthy response for `module`; pass the binary's own
    /// `env!("CARGO_PKG_VERSION")`
    pub fn ok(module: &'static str, version: &'static str) -> Self {
        Self {
            status: "ok",
            module,
            version,
        }
    }
}
