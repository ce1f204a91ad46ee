//! Machine artifact builders.
//!
//! Each submodule projects one published artifact from the canonical model.
//! Builders are pure: same model in, same artifact out, no clock and no IO.
//! The endpoint registry here is the single source of truth for what the
//! site serves; the router and the discovery artifact both read it.

pub mod confidence;
pub mod discovery;
pub mod events_contract;
pub mod failure_modes;
pub mod first_use;
pub mod install;
pub mod integration;
pub mod policy;
pub mod propagation;
pub mod provenance;
pub mod release_operations;
pub mod trust;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::types::Result;

pub const SCHEMA_VERSION: &str = "1.0.0";

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const CONTENT_TYPE_HEALTH: &str = "application/health+json; charset=utf-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

pub const DISCOVERY_PATH: &str = "/.well-known/x0x/discovery";
pub const CAPABILITIES_CURRENT_PATH: &str = "/.well-known/x0x/capabilities/current";
pub const CAPABILITIES_PLANNED_PATH: &str = "/.well-known/x0x/capabilities/planned";
pub const FIT_PATH: &str = "/.well-known/x0x/fit";
pub const INSTALL_PATH: &str = "/machine/install";
pub const FIRST_USE_PATH: &str = "/machine/first-use";
pub const INTEGRATION_PATH: &str = "/machine/integration";
pub const EVENTS_CONTRACT_PATH: &str = "/machine/events-contract";
pub const FAILURE_MODES_PATH: &str = "/machine/failure-modes";
pub const PROPAGATION_PATH: &str = "/machine/propagation";
pub const TRUST_PATH: &str = "/machine/trust";
pub const POLICY_PATH: &str = "/machine/policy";
pub const PROVENANCE_PATH: &str = "/machine/provenance";
pub const INTEGRATION_CONFIDENCE_PATH: &str = "/machine/integration-confidence";
pub const RELEASE_OPERATIONS_PATH: &str = "/machine/release-operations";
pub const HEALTH_PATH: &str = "/health";

/// Aliases that must serve byte-identical discovery bodies.
pub const AGENT_JSON_ALIAS: &str = "/.well-known/agent.json";
pub const AGENT_CARD_ALIAS: &str = "/.well-known/agent-card.json";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EndpointEntry {
    pub id: &'static str,
    pub path: &'static str,
    pub method: &'static str,
    pub content_type: &'static str,
    pub summary: &'static str,
}

pub const MACHINE_ENDPOINTS: &[EndpointEntry] = &[
    EndpointEntry {
        id: "discovery",
        path: DISCOVERY_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Root discovery document linking every machine artifact.",
    },
    EndpointEntry {
        id: "capabilities_current",
        path: CAPABILITIES_CURRENT_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Shipped capabilities with evidence citations.",
    },
    EndpointEntry {
        id: "capabilities_planned",
        path: CAPABILITIES_PLANNED_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Planned capabilities with evidence citations.",
    },
    EndpointEntry {
        id: "fit",
        path: FIT_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Criteria for deciding whether x0x fits a deployment.",
    },
    EndpointEntry {
        id: "install",
        path: INSTALL_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Non-interactive install pathways and verification probes.",
    },
    EndpointEntry {
        id: "first_use",
        path: FIRST_USE_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "First operations against a freshly installed daemon.",
    },
    EndpointEntry {
        id: "integration",
        path: INTEGRATION_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Endpoint groups, retry policy, and worked request examples.",
    },
    EndpointEntry {
        id: "events_contract",
        path: EVENTS_CONTRACT_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Event stream envelope, delivery semantics, and transcripts.",
    },
    EndpointEntry {
        id: "failure_modes",
        path: FAILURE_MODES_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Failure taxonomy with retry classes and remediations.",
    },
    EndpointEntry {
        id: "propagation",
        path: PROPAGATION_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Compact agent-to-agent propagation packet.",
    },
    EndpointEntry {
        id: "trust",
        path: TRUST_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Trust level taxonomy, transitions, and gating matrix.",
    },
    EndpointEntry {
        id: "policy",
        path: POLICY_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Deterministic policy rules derived from the gating matrix.",
    },
    EndpointEntry {
        id: "provenance",
        path: PROVENANCE_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Content digests and signer metadata for key artifacts.",
    },
    EndpointEntry {
        id: "integration_confidence",
        path: INTEGRATION_CONFIDENCE_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Readiness gates computed from the canonical model.",
    },
    EndpointEntry {
        id: "release_operations",
        path: RELEASE_OPERATIONS_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_JSON,
        summary: "Release workflow contract and required run evidence.",
    },
    EndpointEntry {
        id: "health",
        path: HEALTH_PATH,
        method: "GET",
        content_type: CONTENT_TYPE_HEALTH,
        summary: "Liveness of this documentation service.",
    },
];

pub fn endpoint_path(id: &str) -> Option<&'static str> {
    MACHINE_ENDPOINTS
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.path)
}

/// Serialize with two-space indentation and a trailing newline. Every JSON
/// body the site serves goes through this, so equal artifacts are equal
/// bytes on the wire.
pub fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    Ok(body)
}

/// Deterministic JSON encoding: object keys sorted lexicographically at
/// every depth, no insignificant whitespace. Digest inputs only; wire
/// bodies use [`to_pretty`].
pub fn stable_stringify(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|key| {
                    format!(
                        "{}:{}",
                        Value::String(key.clone()),
                        stable_stringify(&map[key])
                    )
                })
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(stable_stringify).collect();
            format!("[{}]", parts.join(","))
        }
        other => other.to_string(),
    }
}

pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_version_is_uniform_across_the_crate() {
        assert_eq!(SCHEMA_VERSION, crate::model::MODEL_SCHEMA_VERSION);
    }

    #[test]
    fn registry_paths_are_unique() {
        let mut paths: Vec<&str> = MACHINE_ENDPOINTS.iter().map(|entry| entry.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), MACHINE_ENDPOINTS.len());
    }

    #[test]
    fn stable_stringify_sorts_keys_at_every_depth() {
        let a = json!({ "b": { "y": 1, "x": [ { "q": 2, "p": 3 } ] }, "a": true });
        let b = json!({ "a": true, "b": { "x": [ { "p": 3, "q": 2 } ], "y": 1 } });
        assert_eq!(stable_stringify(&a), stable_stringify(&b));
        assert_eq!(
            stable_stringify(&a),
            r#"{"a":true,"b":{"x":[{"p":3,"q":2}],"y":1}}"#
        );
    }

    #[test]
    fn digest_is_order_independent() {
        let a = json!({ "one": 1, "two": [1, 2] });
        let b = json!({ "two": [1, 2], "one": 1 });
        assert_eq!(
            sha256_hex(&stable_stringify(&a)),
            sha256_hex(&stable_stringify(&b))
        );
    }

    #[test]
    fn pretty_bodies_end_with_single_newline() {
        let body = to_pretty(&json!({ "status": "ok" })).unwrap();
        assert!(body.ends_with('\n'));
        assert!(!body.ends_with("\n\n"));
    }
}
