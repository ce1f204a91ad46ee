//! HTTP routes for x0xmd

pub mod health;
pub mod installer;
pub mod llms;
pub mod machine;
pub mod root;

pub use health::health_check;
pub use installer::handle_installer;
pub use llms::handle_llms;
pub use machine::handle_artifact;
pub use root::handle_root;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

use crate::artifacts::{self, DISCOVERY_PATH};

/// Derived artifacts are deterministic projections of a process constant,
/// so shared caches may hold them briefly.
pub const CACHE_ARTIFACT: &str = "public, max-age=300";
/// Negotiated or stateful responses must never be cached cross-client.
pub const CACHE_NO_STORE: &str = "no-store";
/// Headers the root response varies on.
pub const VARY_NEGOTIATED: &str = "Accept, User-Agent, Sec-Fetch-Mode";

pub(crate) fn json_response(
    status: StatusCode,
    content_type: &str,
    cache_control: &str,
    body: String,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Cache-Control", cache_control)
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

/// 200 artifact response with the shared cache regime. Serialization of an
/// artifact struct cannot realistically fail, but a failure must not produce
/// a half-written body, so it becomes a 500.
pub(crate) fn artifact_response<T: Serialize>(
    artifact: &T,
    content_type: &str,
) -> Response<Full<Bytes>> {
    match artifacts::to_pretty(artifact) {
        Ok(body) => json_response(StatusCode::OK, content_type, CACHE_ARTIFACT, body),
        Err(err) => {
            error!("Failed to serialize artifact: {err}");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                artifacts::CONTENT_TYPE_JSON,
                CACHE_NO_STORE,
                "{\n  \"error\": \"artifact_build_failed\"\n}\n".to_string(),
            )
        }
    }
}

/// Not found response listing the machine entrypoint
pub fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "not_found",
        "path": path,
        "hint": format!("Machine clients should start at {DISCOVERY_PATH}"),
    });

    json_response(
        StatusCode::NOT_FOUND,
        artifacts::CONTENT_TYPE_JSON,
        CACHE_NO_STORE,
        format!("{:#}\n", body),
    )
}

#[cfg(test)]
pub(crate) async fn body_string(response: Response<Full<Bytes>>) -> String {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
