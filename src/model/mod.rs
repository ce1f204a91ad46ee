//! Canonical model for the x0x discovery surface.
//!
//! A single immutable value describing identity, evidence citations,
//! capability claims, fit criteria, install pathways, trust taxonomy, and
//! policy rules. Every machine artifact is a pure projection of this model;
//! nothing else in the process holds authoritative data.
//!
//! The model is constructed once at startup ([`CanonicalModel::built_in`])
//! and must pass [`validate`] before the server binds. A validation failure
//! is fatal: a mis-specified model must never serve drifted contracts.

mod data;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::types::{Result, X0xmdError};

pub const MODEL_SCHEMA_VERSION: &str = "1.0.0";
pub const CONTRACT_VERSION: &str = "2026-03-01";
pub const GENERATED_AT: &str = "2026-03-01T00:00:00.000Z";

#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub repo: String,
}

/// A citation into the planning corpus. Referenced (never owned) by
/// capabilities via `evidence` ids.
#[derive(Debug, Clone, Serialize)]
pub struct SourceEvidence {
    pub id: String,
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Capability {
    pub id: String,
    pub description: String,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitCriterion {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedItem {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Daemon {
    pub binary: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallPathway {
    pub id: String,
    pub platform: String,
    pub command: String,
    pub non_interactive: bool,
    pub shell: String,
    pub caveats: Vec<String>,
    pub evidence: Vec<String>,
}

/// A client-runnable post-install check with platform-specific commands and
/// a structured expected result (exit code or JSON field assertions).
#[derive(Debug, Clone, Serialize)]
pub struct VerificationProbe {
    pub id: String,
    pub description: String,
    pub command_unix: String,
    pub command_windows: String,
    pub expected_signal: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationMatrixRow {
    pub platform: String,
    pub pathway_ids: Vec<String>,
    pub verify_probe_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallCurrent {
    pub pathways: Vec<InstallPathway>,
    pub verification_probes: Vec<VerificationProbe>,
    pub verification_matrix: Vec<VerificationMatrixRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallModel {
    pub contract_version: String,
    pub daemon: Daemon,
    pub current: InstallCurrent,
    pub planned: Vec<PlannedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationRequest {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpectedResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstUseOperation {
    pub id: String,
    pub summary: String,
    pub request: OperationRequest,
    pub expected_response: ExpectedResponse,
    pub runnable_example: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstUseCurrent {
    pub operations: Vec<FirstUseOperation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstUseModel {
    pub contract_version: String,
    pub daemon_base_url: String,
    pub current: FirstUseCurrent,
    pub planned: Vec<PlannedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointRef {
    pub method: String,
    pub path: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointGroup {
    pub group: String,
    pub endpoints: Vec<EndpointRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Backoff {
    pub strategy: String,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetryPolicy {
    pub retry_status_codes: Vec<u16>,
    pub do_not_retry_status_codes: Vec<u16>,
    pub backoff: Backoff,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reliability {
    pub retry_policy: RetryPolicy,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestResponseExample {
    pub id: String,
    pub request: Value,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationCurrent {
    pub endpoint_groups: Vec<EndpointGroup>,
    pub reliability: Reliability,
    pub request_response_examples: Vec<RequestResponseExample>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationModel {
    pub contract_version: String,
    pub current: IntegrationCurrent,
    pub planned: Vec<PlannedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventStream {
    pub path: String,
    pub method: String,
    pub transport: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub required_fields: Vec<EnvelopeField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reconnect {
    pub strategy: String,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliverySemantics {
    pub delivery_guarantee: String,
    pub ordering: String,
    pub reconnect: Reconnect,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsModel {
    pub contract_version: String,
    pub stream: EventStream,
    pub envelope: Envelope,
    pub delivery_semantics: DeliverySemantics,
    pub transcript_examples: Vec<Value>,
}

/// One row of the static failure taxonomy.
#[derive(Debug, Clone, Serialize)]
pub struct FailureMode {
    pub code: String,
    pub failure_class: String,
    pub retry_class: String,
    pub retryable: bool,
    pub retry_after_hint: String,
    pub recommended_action: String,
    pub escalation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureModesModel {
    pub contract_version: String,
    pub matrix: Vec<FailureMode>,
    pub planned: Vec<PlannedItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrustLevel {
    pub id: String,
    pub semantics: String,
    pub operational_outcome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrustTransition {
    pub from: String,
    pub to: String,
    pub trigger: String,
    pub transition_class: String,
}

/// Policy rule keyed by action class. Sole source for the policy artifact's
/// deterministic rules.
#[derive(Debug, Clone, Serialize)]
pub struct ActionGate {
    pub action_class: String,
    pub allowed_levels: Vec<String>,
    pub blocked_levels: Vec<String>,
    pub required_signatures: bool,
    pub decision_default: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlLabel {
    pub control_id: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlLabels {
    pub current: Vec<ControlLabel>,
    pub planned: Vec<ControlLabel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Disclosure {
    pub security_email: String,
    pub issues_url: String,
    pub docs_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrustCurrent {
    pub trust_levels: Vec<TrustLevel>,
    pub threat_assumptions: Vec<String>,
    pub default_transitions: Vec<TrustTransition>,
    pub action_gating_matrix: Vec<ActionGate>,
    pub controls: Value,
    pub controls_current_vs_planned: ControlLabels,
    pub disclosure: Disclosure,
    pub policy_guidance: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrustModel {
    pub contract_version: String,
    pub current: TrustCurrent,
    pub planned: Vec<PlannedItem>,
}

/// Hard caps on propagation packet list lengths. Exceeding a cap is a build
/// error, never a truncation.
#[derive(Debug, Clone, Serialize)]
pub struct Compactness {
    pub max_current_capabilities: usize,
    pub max_fit_criteria: usize,
    pub max_verification_probes: usize,
    pub max_sources: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropagationModel {
    pub purpose: String,
    pub artifact_version: String,
    pub compactness: Compactness,
}

#[derive(Debug, Clone, Serialize)]
pub struct CanonicalModel {
    pub schema_version: String,
    pub generated_at: String,
    pub identity: Identity,
    pub source_evidence: Vec<SourceEvidence>,
    pub capabilities_current: Vec<Capability>,
    pub capabilities_planned: Vec<Capability>,
    pub fit_criteria: Vec<FitCriterion>,
    pub install: InstallModel,
    pub first_use: FirstUseModel,
    pub integration: IntegrationModel,
    pub events: EventsModel,
    pub failure_modes: FailureModesModel,
    pub trust: TrustModel,
    pub propagation: PropagationModel,
}

/// Check the model's internal invariants.
///
/// Rules, in order:
/// 1. Lifecycle disjointness: a capability id must not appear in both the
///    current and planned sets.
/// 2. Evidence presence: every capability cites at least one evidence id.
/// 3. Evidence closure: every cited evidence id exists in `source_evidence`.
/// 4. Verification matrix closure: every pathway and probe id referenced by
///    a matrix row exists in the install contract.
pub fn validate(model: &CanonicalModel) -> Result<()> {
    let evidence_ids: HashSet<&str> = model
        .source_evidence
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    let current_ids: HashSet<&str> = model
        .capabilities_current
        .iter()
        .map(|capability| capability.id.as_str())
        .collect();

    for capability in &model.capabilities_planned {
        if current_ids.contains(capability.id.as_str()) {
            return Err(X0xmdError::LifecycleConflict(capability.id.clone()));
        }
    }

    for capability in model
        .capabilities_current
        .iter()
        .chain(model.capabilities_planned.iter())
    {
        if capability.evidence.is_empty() {
            return Err(X0xmdError::MissingEvidence(capability.id.clone()));
        }

        for evidence_id in &capability.evidence {
            if !evidence_ids.contains(evidence_id.as_str()) {
                return Err(X0xmdError::UnknownEvidence(evidence_id.clone()));
            }
        }
    }

    let pathway_ids: HashSet<&str> = model
        .install
        .current
        .pathways
        .iter()
        .map(|pathway| pathway.id.as_str())
        .collect();
    let probe_ids: HashSet<&str> = model
        .install
        .current
        .verification_probes
        .iter()
        .map(|probe| probe.id.as_str())
        .collect();

    for row in &model.install.current.verification_matrix {
        for pathway_id in &row.pathway_ids {
            if !pathway_ids.contains(pathway_id.as_str()) {
                return Err(X0xmdError::UnknownVerificationRef {
                    kind: "pathway",
                    id: pathway_id.clone(),
                });
            }
        }
        for probe_id in &row.verify_probe_ids {
            if !probe_ids.contains(probe_id.as_str()) {
                return Err(X0xmdError::UnknownVerificationRef {
                    kind: "probe",
                    id: probe_id.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_model_validates() {
        let model = CanonicalModel::built_in();
        assert!(validate(&model).is_ok());
        assert!(!model.capabilities_current.is_empty());
        assert!(!model.capabilities_planned.is_empty());
    }

    #[test]
    fn rejects_capability_in_both_lifecycles() {
        let mut model = CanonicalModel::built_in();
        let duplicate = model.capabilities_current[0].clone();
        model.capabilities_planned.push(duplicate);

        match validate(&model) {
            Err(X0xmdError::LifecycleConflict(id)) => {
                assert_eq!(id, model.capabilities_current[0].id);
            }
            other => panic!("expected lifecycle conflict, got {other:?}"),
        }
    }

    #[test]
    fn rejects_capability_without_evidence() {
        let mut model = CanonicalModel::built_in();
        model.capabilities_current.push(Capability {
            id: "missing-evidence".to_string(),
            description: "invalid capability".to_string(),
            evidence: vec![],
        });

        assert!(matches!(
            validate(&model),
            Err(X0xmdError::MissingEvidence(id)) if id == "missing-evidence"
        ));
    }

    #[test]
    fn rejects_unknown_evidence_reference() {
        let mut model = CanonicalModel::built_in();
        model.capabilities_planned.push(Capability {
            id: "dangling".to_string(),
            description: "cites nothing real".to_string(),
            evidence: vec!["no-such-evidence".to_string()],
        });

        assert!(matches!(
            validate(&model),
            Err(X0xmdError::UnknownEvidence(id)) if id == "no-such-evidence"
        ));
    }

    #[test]
    fn rejects_matrix_row_with_unknown_probe() {
        let mut model = CanonicalModel::built_in();
        model
            .install
            .current
            .verification_matrix
            .push(VerificationMatrixRow {
                platform: "plan9".to_string(),
                pathway_ids: vec![model.install.current.pathways[0].id.clone()],
                verify_probe_ids: vec!["no-such-probe".to_string()],
            });

        assert!(matches!(
            validate(&model),
            Err(X0xmdError::UnknownVerificationRef { kind: "probe", .. })
        ));
    }

    #[test]
    fn every_matrix_platform_uses_non_interactive_pathways() {
        let model = CanonicalModel::built_in();
        let pathways: std::collections::HashMap<&str, &InstallPathway> = model
            .install
            .current
            .pathways
            .iter()
            .map(|pathway| (pathway.id.as_str(), pathway))
            .collect();

        for row in &model.install.current.verification_matrix {
            for pathway_id in &row.pathway_ids {
                let pathway = pathways[pathway_id.as_str()];
                assert!(pathway.non_interactive, "pathway {pathway_id} is interactive");
            }
        }
    }
}
