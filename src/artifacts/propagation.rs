//! The propagation packet: a compact, self-contained document one agent can
//! hand to another so the recipient can evaluate, install, and verify x0x
//! on its own. Compactness limits are hard: a list over its cap fails the
//! build, it is never truncated.

use serde::Serialize;
use serde_json::Value;

use crate::model::{CanonicalModel, FitCriterion, SourceEvidence};
use crate::types::{Result, X0xmdError};

use super::{
    CAPABILITIES_CURRENT_PATH, DISCOVERY_PATH, FIT_PATH, INSTALL_PATH, PROVENANCE_PATH,
    RELEASE_OPERATIONS_PATH, SCHEMA_VERSION,
};

#[derive(Debug, Clone, Serialize)]
pub struct PacketCapability {
    pub id: String,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PacketProbe {
    pub id: String,
    pub command_unix: String,
    pub command_windows: String,
    pub expected_signal: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointPointer {
    pub endpoint: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PacketEvidence {
    pub sources: Vec<SourceEvidence>,
    pub capability_source: EndpointPointer,
    pub provenance: EndpointPointer,
    pub release_operations: EndpointPointer,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthoritativeEndpoints {
    pub discovery: &'static str,
    pub capabilities_current: &'static str,
    pub fit_criteria: &'static str,
    pub install: &'static str,
    pub provenance: &'static str,
    pub release_operations: &'static str,
}

/// A command a recipient can run to re-verify a packet claim against the
/// live site or a local daemon.
#[derive(Debug, Clone, Serialize)]
pub struct CommandReference {
    pub id: String,
    pub command_unix: String,
    pub command_windows: String,
    pub expected_signal: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reverify {
    pub authoritative_endpoints: AuthoritativeEndpoints,
    pub command_references: Vec<CommandReference>,
    pub install_probe_commands: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Compatibility {
    pub additive_change_policy: &'static str,
    pub breaking_change_policy: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropagationPacket {
    pub schema_version: String,
    pub artifact: String,
    pub artifact_version: String,
    pub generated_at: String,
    pub purpose: String,
    pub fit: Vec<FitCriterion>,
    pub current_capabilities: Vec<PacketCapability>,
    pub install_verification_probes: Vec<PacketProbe>,
    pub evidence: PacketEvidence,
    pub trust_notes: Vec<String>,
    pub reverify: Reverify,
    pub compatibility: Compatibility,
}

fn check_limit(list: &'static str, actual: usize, limit: usize) -> Result<()> {
    if actual > limit {
        return Err(X0xmdError::CompactnessExceeded {
            list,
            actual,
            limit,
        });
    }
    Ok(())
}

pub fn build(model: &CanonicalModel) -> Result<PropagationPacket> {
    let limits = &model.propagation.compactness;

    let current_capabilities: Vec<PacketCapability> = model
        .capabilities_current
        .iter()
        .map(|capability| PacketCapability {
            id: capability.id.clone(),
            evidence: capability.evidence.clone(),
        })
        .collect();
    let probes: Vec<PacketProbe> = model
        .install
        .current
        .verification_probes
        .iter()
        .map(|probe| PacketProbe {
            id: probe.id.clone(),
            command_unix: probe.command_unix.clone(),
            command_windows: probe.command_windows.clone(),
            expected_signal: probe.expected_signal.clone(),
        })
        .collect();

    check_limit(
        "current_capabilities",
        current_capabilities.len(),
        limits.max_current_capabilities,
    )?;
    check_limit("fit", model.fit_criteria.len(), limits.max_fit_criteria)?;
    check_limit(
        "install_verification_probes",
        probes.len(),
        limits.max_verification_probes,
    )?;
    check_limit(
        "evidence.sources",
        model.source_evidence.len(),
        limits.max_sources,
    )?;

    let docs_base = model.trust.current.disclosure.docs_url.clone();
    let command_references = vec![
        CommandReference {
            id: "fetch-discovery".to_string(),
            command_unix: format!("curl -fsS {docs_base}{DISCOVERY_PATH}"),
            command_windows: format!("curl.exe -fsS {docs_base}{DISCOVERY_PATH}"),
            expected_signal: format!("HTTP 200 with schema_version {SCHEMA_VERSION}"),
        },
        CommandReference {
            id: "fetch-capabilities-current".to_string(),
            command_unix: format!("curl -fsS {docs_base}{CAPABILITIES_CURRENT_PATH}"),
            command_windows: format!("curl.exe -fsS {docs_base}{CAPABILITIES_CURRENT_PATH}"),
            expected_signal: "HTTP 200 listing every capability id in this packet".to_string(),
        },
        CommandReference {
            id: "fetch-provenance".to_string(),
            command_unix: format!("curl -fsS {docs_base}{PROVENANCE_PATH}"),
            command_windows: format!("curl.exe -fsS {docs_base}{PROVENANCE_PATH}"),
            expected_signal: "HTTP 200 with sha256 digests for discovery, trust, and policy"
                .to_string(),
        },
        CommandReference {
            id: "daemon-health".to_string(),
            command_unix: "curl -fsS http://127.0.0.1:12700/health".to_string(),
            command_windows: "curl.exe -fsS http://127.0.0.1:12700/health".to_string(),
            expected_signal: "HTTP 200 with status ok after install".to_string(),
        },
    ];

    Ok(PropagationPacket {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "propagation".to_string(),
        artifact_version: model.propagation.artifact_version.clone(),
        generated_at: model.generated_at.clone(),
        purpose: model.propagation.purpose.clone(),
        fit: model.fit_criteria.clone(),
        current_capabilities,
        install_verification_probes: probes.clone(),
        evidence: PacketEvidence {
            sources: model.source_evidence.clone(),
            capability_source: EndpointPointer {
                endpoint: CAPABILITIES_CURRENT_PATH,
            },
            provenance: EndpointPointer {
                endpoint: PROVENANCE_PATH,
            },
            release_operations: EndpointPointer {
                endpoint: RELEASE_OPERATIONS_PATH,
            },
        },
        trust_notes: model.trust.current.policy_guidance.clone(),
        reverify: Reverify {
            authoritative_endpoints: AuthoritativeEndpoints {
                discovery: DISCOVERY_PATH,
                capabilities_current: CAPABILITIES_CURRENT_PATH,
                fit_criteria: FIT_PATH,
                install: INSTALL_PATH,
                provenance: PROVENANCE_PATH,
                release_operations: RELEASE_OPERATIONS_PATH,
            },
            command_references,
            install_probe_commands: probes
                .iter()
                .map(|probe| probe.command_unix.clone())
                .collect(),
        },
        compatibility: Compatibility {
            additive_change_policy: "minor-version",
            breaking_change_policy: "major-version",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Capability;

    #[test]
    fn packet_carries_current_capabilities_only() {
        let model = CanonicalModel::built_in();
        let packet = build(&model).unwrap();

        assert_eq!(packet.current_capabilities.len(), model.capabilities_current.len());
        for planned in &model.capabilities_planned {
            assert!(!packet
                .current_capabilities
                .iter()
                .any(|capability| capability.id == planned.id));
        }
    }

    #[test]
    fn artifact_version_is_semver() {
        let packet = build(&CanonicalModel::built_in()).unwrap();
        let parts: Vec<&str> = packet.artifact_version.split('.').collect();
        assert_eq!(parts.len(), 3);
        for part in parts {
            part.parse::<u64>().unwrap();
        }
    }

    #[test]
    fn builds_at_exactly_the_capability_limit() {
        let mut model = CanonicalModel::built_in();
        while model.capabilities_current.len() < model.propagation.compactness.max_current_capabilities
        {
            let n = model.capabilities_current.len();
            model.capabilities_current.push(Capability {
                id: format!("filler-{n}"),
                description: "filler".to_string(),
                evidence: vec!["vision".to_string()],
            });
        }
        assert!(build(&model).is_ok());
    }

    #[test]
    fn rejects_one_past_the_capability_limit() {
        let mut model = CanonicalModel::built_in();
        let limit = model.propagation.compactness.max_current_capabilities;
        while model.capabilities_current.len() <= limit {
            let n = model.capabilities_current.len();
            model.capabilities_current.push(Capability {
                id: format!("filler-{n}"),
                description: "filler".to_string(),
                evidence: vec!["vision".to_string()],
            });
        }

        match build(&model) {
            Err(X0xmdError::CompactnessExceeded { list, actual, limit: got }) => {
                assert_eq!(list, "current_capabilities");
                assert_eq!(actual, limit + 1);
                assert_eq!(got, limit);
            }
            other => panic!("expected compactness failure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_too_many_evidence_sources() {
        let mut model = CanonicalModel::built_in();
        model.propagation.compactness.max_sources = model.source_evidence.len() - 1;
        assert!(matches!(
            build(&model),
            Err(X0xmdError::CompactnessExceeded {
                list: "evidence.sources",
                ..
            })
        ));
    }

    #[test]
    fn reverify_block_is_self_sufficient() {
        let packet = build(&CanonicalModel::built_in()).unwrap();
        assert!(packet.reverify.command_references.len() >= 4);
        assert!(!packet.reverify.install_probe_commands.is_empty());
        assert!(!packet.trust_notes.is_empty());
        assert_eq!(packet.reverify.authoritative_endpoints.discovery, DISCOVERY_PATH);
        assert_eq!(packet.compatibility.additive_change_policy, "minor-version");
    }
}
