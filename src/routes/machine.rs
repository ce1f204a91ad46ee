//! Dispatch for the machine artifact endpoints.
//!
//! Every machine endpoint is a fixed path string; there are no path
//! parameters anywhere on this surface. Aliases dispatch into the same
//! builder as their canonical path, never a redirect, so machine clients
//! that refuse to follow redirects still get the document in one round
//! trip — and the bytes are identical by construction.

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;

use crate::artifacts::{
    confidence, discovery, events_contract, failure_modes, first_use, install, integration,
    policy, propagation, provenance, release_operations, trust, AGENT_CARD_ALIAS,
    AGENT_JSON_ALIAS, CAPABILITIES_CURRENT_PATH, CAPABILITIES_PLANNED_PATH, CONTENT_TYPE_JSON,
    DISCOVERY_PATH, EVENTS_CONTRACT_PATH, FAILURE_MODES_PATH, FIRST_USE_PATH, FIT_PATH,
    INSTALL_PATH, INTEGRATION_CONFIDENCE_PATH, INTEGRATION_PATH, POLICY_PATH, PROPAGATION_PATH,
    PROVENANCE_PATH, RELEASE_OPERATIONS_PATH, TRUST_PATH,
};
use crate::config::ArtifactSources;
use crate::model::CanonicalModel;

use super::artifact_response;

/// Serve the artifact at `path`, or None if no machine endpoint matches.
pub fn handle_artifact(
    model: &CanonicalModel,
    sources: &ArtifactSources,
    path: &str,
) -> Option<Response<Full<Bytes>>> {
    let response = match path {
        DISCOVERY_PATH | AGENT_JSON_ALIAS | AGENT_CARD_ALIAS => {
            artifact_response(&discovery::build(model), CONTENT_TYPE_JSON)
        }
        CAPABILITIES_CURRENT_PATH => {
            artifact_response(&discovery::build_capabilities_current(model), CONTENT_TYPE_JSON)
        }
        CAPABILITIES_PLANNED_PATH => {
            artifact_response(&discovery::build_capabilities_planned(model), CONTENT_TYPE_JSON)
        }
        FIT_PATH => artifact_response(&discovery::build_fit(model), CONTENT_TYPE_JSON),
        INSTALL_PATH => artifact_response(&install::build(model, sources), CONTENT_TYPE_JSON),
        FIRST_USE_PATH => artifact_response(&first_use::build(model), CONTENT_TYPE_JSON),
        INTEGRATION_PATH => artifact_response(&integration::build(model), CONTENT_TYPE_JSON),
        EVENTS_CONTRACT_PATH => {
            artifact_response(&events_contract::build(model), CONTENT_TYPE_JSON)
        }
        FAILURE_MODES_PATH => artifact_response(&failure_modes::build(model), CONTENT_TYPE_JSON),
        TRUST_PATH => artifact_response(&trust::build(model), CONTENT_TYPE_JSON),
        POLICY_PATH => artifact_response(&policy::build(model), CONTENT_TYPE_JSON),
        PROPAGATION_PATH => match propagation::build(model) {
            Ok(packet) => artifact_response(&packet, CONTENT_TYPE_JSON),
            Err(err) => build_failure_response(&err),
        },
        PROVENANCE_PATH => match provenance::build(model) {
            Ok(artifact) => artifact_response(&artifact, CONTENT_TYPE_JSON),
            Err(err) => build_failure_response(&err),
        },
        INTEGRATION_CONFIDENCE_PATH => {
            artifact_response(&confidence::build(model), CONTENT_TYPE_JSON)
        }
        RELEASE_OPERATIONS_PATH => {
            artifact_response(&release_operations::build(model), CONTENT_TYPE_JSON)
        }
        _ => return None,
    };
    Some(response)
}

/// An artifact that refuses to build is an invariant violation; there is no
/// degraded variant to serve in its place.
fn build_failure_response(err: &crate::types::X0xmdError) -> Response<Full<Bytes>> {
    tracing::error!("Artifact build failed: {err}");
    super::json_response(
        hyper::StatusCode::INTERNAL_SERVER_ERROR,
        CONTENT_TYPE_JSON,
        super::CACHE_NO_STORE,
        "{\n  \"error\": \"artifact_build_failed\"\n}\n".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts;
    use crate::routes::{body_string, CACHE_ARTIFACT};
    use clap::Parser;
    use hyper::StatusCode;

    fn sources() -> ArtifactSources {
        crate::config::Args::parse_from(["x0xmd"]).artifact_sources()
    }

    #[tokio::test]
    async fn aliases_serve_byte_identical_discovery() {
        let model = CanonicalModel::built_in();
        let sources = sources();
        let canonical =
            body_string(handle_artifact(&model, &sources, DISCOVERY_PATH).unwrap()).await;
        let agent_json =
            body_string(handle_artifact(&model, &sources, AGENT_JSON_ALIAS).unwrap()).await;
        let agent_card =
            body_string(handle_artifact(&model, &sources, AGENT_CARD_ALIAS).unwrap()).await;

        assert_eq!(canonical, agent_json);
        assert_eq!(canonical, agent_card);
    }

    #[tokio::test]
    async fn every_registry_path_resolves_with_artifact_caching() {
        let model = CanonicalModel::built_in();
        let sources = sources();
        for entry in artifacts::MACHINE_ENDPOINTS {
            if entry.path == artifacts::HEALTH_PATH {
                continue; // health has its own handler and cache regime
            }
            let response = handle_artifact(&model, &sources, entry.path)
                .unwrap_or_else(|| panic!("no handler for {}", entry.path));
            assert_eq!(response.status(), StatusCode::OK, "{}", entry.path);
            assert_eq!(
                response.headers()["Cache-Control"], CACHE_ARTIFACT,
                "{}",
                entry.path
            );
            assert_eq!(
                response.headers()["Content-Type"], CONTENT_TYPE_JSON,
                "{}",
                entry.path
            );
        }
    }

    #[tokio::test]
    async fn artifact_bodies_are_pretty_printed_with_trailing_newline() {
        let model = CanonicalModel::built_in();
        let body = body_string(handle_artifact(&model, &sources(), TRUST_PATH).unwrap()).await;
        assert!(body.starts_with("{\n"));
        assert!(body.ends_with("}\n"));
        assert!(body.contains("\"schema_version\": \"1.0.0\""));
    }

    #[test]
    fn unknown_path_does_not_dispatch() {
        let model = CanonicalModel::built_in();
        let sources = sources();
        assert!(handle_artifact(&model, &sources, "/machine/unknown").is_none());
        assert!(handle_artifact(&model, &sources, "/").is_none());
    }
}
