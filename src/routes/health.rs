//! Liveness endpoint for this documentation service.
//!
//! Reports on x0xmd itself, not the daemon it documents. The content type
//! is `application/health+json` so probes can distinguish liveness payloads
//! from generic artifacts.

use bytes::Bytes;
use chrono::Utc;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::artifacts::{CONTENT_TYPE_HEALTH, SCHEMA_VERSION};

use super::{json_response, CACHE_NO_STORE};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub schema_version: &'static str,
    pub timestamp: String,
}

pub fn health_check() -> Response<Full<Bytes>> {
    let health = HealthResponse {
        status: "ok",
        service: "x0xmd",
        version: env!("CARGO_PKG_VERSION"),
        schema_version: SCHEMA_VERSION,
        timestamp: Utc::now().to_rfc3339(),
    };

    match crate::artifacts::to_pretty(&health) {
        Ok(body) => json_response(StatusCode::OK, CONTENT_TYPE_HEALTH, CACHE_NO_STORE, body),
        Err(err) => {
            tracing::error!("Failed to serialize health response: {err}");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                CONTENT_TYPE_HEALTH,
                CACHE_NO_STORE,
                "{\n  \"status\": \"error\"\n}\n".to_string(),
            )
        }
    }
}
