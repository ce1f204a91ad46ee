//! Offline operations tooling: pre-deploy drift checks and the fail-closed
//! upstream refresh lock.
//!
//! Nothing here runs in the serving path. The drift checks are assertions a
//! CI gate runs before deploy; the refresh lock records which upstream
//! baselines an operator has acknowledged, and refuses automation when a
//! baseline is missing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::artifacts::{self, discovery, propagation};
use crate::model::CanonicalModel;
use crate::types::{Result, X0xmdError};

/// An upstream resource whose drift an operator must acknowledge before the
/// refresh automation may run.
#[derive(Debug, Clone)]
pub struct UpstreamRef {
    pub id: &'static str,
    pub url: &'static str,
}

pub fn upstream_refs() -> Vec<UpstreamRef> {
    vec![
        UpstreamRef {
            id: "x0x-main",
            url: "https://github.com/saorsa-labs/x0x/tree/main",
        },
        UpstreamRef {
            id: "install-script",
            url: "https://github.com/saorsa-labs/x0x/blob/main/scripts/install.sh",
        },
    ]
}

/// Parsed refresh lock: upstream ref id -> acknowledged baseline commit.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshLock {
    pub refs: BTreeMap<String, String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Validate a refresh lock value against the required upstream refs.
///
/// Fail-closed: a missing or empty baseline for any required ref is an
/// error, never a silent skip.
pub fn validate_refresh_lock(lock: &Value, refs: &[UpstreamRef]) -> Result<RefreshLock> {
    if !lock.is_object() {
        return Err(X0xmdError::MalformedRefreshLock(
            "must be a JSON object".to_string(),
        ));
    }
    if !lock.get("refs").is_some_and(Value::is_object) {
        return Err(X0xmdError::MalformedRefreshLock(
            "missing required 'refs' object".to_string(),
        ));
    }

    let parsed: RefreshLock = serde_json::from_value(lock.clone())?;

    let missing: Vec<&str> = refs
        .iter()
        .map(|upstream| upstream.id)
        .filter(|id| {
            parsed
                .refs
                .get(*id)
                .map_or(true, |baseline| baseline.trim().is_empty())
        })
        .collect();

    if !missing.is_empty() {
        return Err(X0xmdError::MissingBaselineRefs(missing.join(", ")));
    }

    Ok(parsed)
}

pub fn load_refresh_lock(path: &Path, refs: &[UpstreamRef]) -> Result<RefreshLock> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    validate_refresh_lock(&value, refs)
}

fn check(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(X0xmdError::Drift(message.to_string()))
    }
}

/// Assert that the propagation packet, the discovery document, and the
/// endpoint registry all agree. Returns the names of the checks that ran.
pub fn check_propagation_drift(model: &CanonicalModel) -> Result<Vec<&'static str>> {
    let packet = propagation::build(model)?;
    let discovery = discovery::build(model);
    let compactness = &model.propagation.compactness;
    let mut passed = Vec::new();

    check(
        packet.schema_version == artifacts::SCHEMA_VERSION,
        "propagation packet schema version mismatch",
    )?;
    passed.push("packet-schema-version");

    check(
        discovery.propagation.packet_schema_version == packet.schema_version,
        "discovery propagation schema version metadata drift",
    )?;
    check(
        discovery.propagation.artifact_version == packet.artifact_version,
        "discovery propagation artifact version metadata drift",
    )?;
    passed.push("discovery-propagation-pointer");

    check(
        packet.current_capabilities.len() <= compactness.max_current_capabilities,
        "propagation current capability compactness limit exceeded",
    )?;
    check(
        packet.fit.len() <= compactness.max_fit_criteria,
        "propagation fit compactness limit exceeded",
    )?;
    check(
        packet.install_verification_probes.len() <= compactness.max_verification_probes,
        "propagation install verification compactness limit exceeded",
    )?;
    check(
        packet.evidence.sources.len() <= compactness.max_sources,
        "propagation source compactness limit exceeded",
    )?;
    passed.push("compactness-limits");

    check(
        packet.evidence.capability_source.endpoint == artifacts::CAPABILITIES_CURRENT_PATH,
        "capability source endpoint drifted from registry",
    )?;
    check(
        packet.evidence.provenance.endpoint == artifacts::PROVENANCE_PATH,
        "provenance endpoint drifted from registry",
    )?;
    check(
        packet.evidence.release_operations.endpoint == artifacts::RELEASE_OPERATIONS_PATH,
        "release operations endpoint drifted from registry",
    )?;
    passed.push("evidence-endpoints");

    let authoritative = &packet.reverify.authoritative_endpoints;
    for (name, endpoint, expected) in [
        ("discovery", authoritative.discovery, artifacts::DISCOVERY_PATH),
        (
            "capabilities_current",
            authoritative.capabilities_current,
            artifacts::CAPABILITIES_CURRENT_PATH,
        ),
        ("fit_criteria", authoritative.fit_criteria, artifacts::FIT_PATH),
        ("install", authoritative.install, artifacts::INSTALL_PATH),
        ("provenance", authoritative.provenance, artifacts::PROVENANCE_PATH),
        (
            "release_operations",
            authoritative.release_operations,
            artifacts::RELEASE_OPERATIONS_PATH,
        ),
    ] {
        check(
            endpoint == expected,
            &format!("reverify {name} endpoint drift"),
        )?;
    }
    passed.push("reverify-endpoints");

    let advertised: Vec<&str> = discovery
        .endpoints
        .iter()
        .map(|entry| entry.path)
        .collect();
    let registry: Vec<&str> = artifacts::MACHINE_ENDPOINTS
        .iter()
        .map(|entry| entry.path)
        .collect();
    check(
        advertised == registry,
        "discovery endpoint list drifted from registry",
    )?;
    passed.push("endpoint-registry-equality");

    Ok(passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn built_in_model_has_no_drift() {
        let passed = check_propagation_drift(&CanonicalModel::built_in()).unwrap();
        assert!(passed.contains(&"discovery-propagation-pointer"));
        assert!(passed.contains(&"endpoint-registry-equality"));
    }

    #[test]
    fn complete_lock_validates() {
        let lock = json!({
            "refs": {
                "x0x-main": "3b1f2c9d",
                "install-script": "77aa01ef"
            },
            "updated_at": "2026-03-01T00:00:00Z"
        });
        let parsed = validate_refresh_lock(&lock, &upstream_refs()).unwrap();
        assert_eq!(parsed.refs.len(), 2);
    }

    #[test]
    fn missing_baseline_fails_closed() {
        let lock = json!({ "refs": { "x0x-main": "3b1f2c9d" } });
        match validate_refresh_lock(&lock, &upstream_refs()) {
            Err(X0xmdError::MissingBaselineRefs(ids)) => assert_eq!(ids, "install-script"),
            other => panic!("expected fail-closed error, got {other:?}"),
        }
    }

    #[test]
    fn empty_baseline_counts_as_missing() {
        let lock = json!({ "refs": { "x0x-main": "3b1f2c9d", "install-script": "  " } });
        assert!(matches!(
            validate_refresh_lock(&lock, &upstream_refs()),
            Err(X0xmdError::MissingBaselineRefs(_))
        ));
    }

    #[test]
    fn non_object_lock_is_malformed() {
        assert!(matches!(
            validate_refresh_lock(&json!([1, 2]), &upstream_refs()),
            Err(X0xmdError::MalformedRefreshLock(_))
        ));
        assert!(matches!(
            validate_refresh_lock(&json!({ "refs": "nope" }), &upstream_refs()),
            Err(X0xmdError::MalformedRefreshLock(_))
        ));
    }
}
