//! Integration confidence: a small set of readiness gates evaluated over
//! the built artifacts, not the raw model, so the gates see exactly what a
//! client would fetch. Readiness is computed over the required gates; one
//! required failure flips the release decision.

use serde::Serialize;

use crate::model::CanonicalModel;

use super::{
    events_contract, failure_modes, policy, provenance, EVENTS_CONTRACT_PATH, FAILURE_MODES_PATH,
    POLICY_PATH, PROPAGATION_PATH, PROVENANCE_PATH, SCHEMA_VERSION,
};

const ENVELOPE_FIELDS: &[&str] = &[
    "event_id",
    "topic",
    "publisher_agent_id",
    "payload_base64",
    "signature",
    "received_at",
    "trust_level",
];

const FAILURE_CODES: &[&str] = &[
    "network.timeout",
    "auth.untrusted_sender",
    "signature.invalid",
    "permission.denied",
    "schema.invalid_payload",
    "daemon.unavailable",
];

#[derive(Debug, Clone, Serialize)]
pub struct Gate {
    pub id: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub status: &'static str,
    pub criterion: &'static str,
    pub evidence: String,
}

/// Aggregate readiness over the required gates. One required failure flips
/// the status to fail, the ratio reports how close the surface is.
#[derive(Debug, Clone, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub required_gates: usize,
    pub passed_gates: usize,
    pub evaluated_required_gate_pass_ratio: f64,
    pub release_decision: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    /// The published contracts the gates are evaluated against.
    pub evaluated_contracts: Vec<&'static str>,
    pub gates: Vec<Gate>,
    pub readiness: Readiness,
}

fn gate(
    id: &'static str,
    label: &'static str,
    criterion: &'static str,
    passed: bool,
    evidence: String,
) -> Gate {
    Gate {
        id,
        label,
        required: true,
        status: if passed { "pass" } else { "fail" },
        criterion,
        evidence,
    }
}

fn event_schema_compliance(model: &CanonicalModel) -> Gate {
    let events = events_contract::build(model);
    let names: Vec<&str> = events
        .envelope
        .required_fields
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    let missing: Vec<&&str> = ENVELOPE_FIELDS
        .iter()
        .filter(|field| !names.contains(*field))
        .collect();
    let stream_ok = events.stream.path == "/events"
        && events.stream.method == "GET"
        && events.stream.transport == "sse";
    let has_transcript = !events.transcript_examples.is_empty();
    let passed =
        missing.is_empty() && stream_ok && has_transcript && !events.contract_version.is_empty();

    gate(
        "event-schema-compliance",
        "Event schema compliance",
        "Events contract includes the /events stream metadata, every envelope field consumers deduplicate and verify on, and at least one transcript example.",
        passed,
        if passed {
            format!(
                "{} required fields declared, {} transcript example(s)",
                names.len(),
                events.transcript_examples.len()
            )
        } else {
            format!(
                "missing fields: {missing:?}, stream ok: {stream_ok}, transcripts: {}",
                events.transcript_examples.len()
            )
        },
    )
}

fn policy_enforcement_metadata(model: &CanonicalModel) -> Gate {
    let policy = policy::build(model);
    let output_required = policy.evaluation.output_schema["required"]
        .as_array()
        .map(|fields| {
            fields.iter().any(|f| f.as_str() == Some("decision"))
                && fields.iter().any(|f| f.as_str() == Some("matched_rule"))
        })
        .unwrap_or(false);
    let passed = !policy.policy_id.is_empty()
        && !policy.rules.is_empty()
        && !policy.evaluation_examples.is_empty()
        && output_required;

    gate(
        "policy-enforcement-metadata",
        "Policy enforcement metadata presence",
        "Policy contract exposes a deterministic evaluation contract, rules for every action class, and executable examples.",
        passed,
        format!(
            "{} rules, {} evaluation examples, output contract complete: {output_required}",
            policy.rules.len(),
            policy.evaluation_examples.len()
        ),
    )
}

fn failure_remediation_coverage(model: &CanonicalModel) -> Gate {
    let artifact = failure_modes::build(model);
    let codes: Vec<&str> = artifact.matrix.iter().map(|row| row.code.as_str()).collect();
    let all_known = FAILURE_CODES.iter().all(|code| codes.contains(code));
    let has_retryable = artifact.matrix.iter().any(|row| row.retryable);
    let has_non_retryable = artifact.matrix.iter().any(|row| !row.retryable);
    let all_remediated = artifact
        .matrix
        .iter()
        .all(|row| !row.recommended_action.is_empty() && !row.escalation.is_empty());
    let passed = all_known && has_retryable && has_non_retryable && all_remediated;

    gate(
        "failure-remediation-coverage",
        "Failure remediation coverage",
        "Failure matrix covers retryable and non-retryable paths, every known code, and explicit remediation and escalation actions.",
        passed,
        format!(
            "{} of {} failure codes covered, remediation complete: {all_remediated}",
            codes.len(),
            FAILURE_CODES.len()
        ),
    )
}

fn drift_check_status(model: &CanonicalModel) -> Gate {
    let discovery = super::discovery::build(model);
    let pointer_ok = discovery.propagation.packet_schema_version == SCHEMA_VERSION
        && discovery.propagation.artifact_version == model.propagation.artifact_version;
    let provenance_ok = provenance::build(model).map_or(false, |attestation| {
        let ids: Vec<&str> = attestation
            .artifacts
            .iter()
            .map(|entry| entry.artifact)
            .collect();
        ids.contains(&"discovery") && ids.contains(&"trust") && ids.contains(&"policy")
    });
    let passed = pointer_ok && provenance_ok;

    gate(
        "drift-check-status",
        "Drift and cross-artifact consistency status",
        "Discovery's propagation pointer matches the packet versions and provenance attests discovery, trust, and policy.",
        passed,
        format!(
            "pointer {} vs packet {}, provenance digests present: {provenance_ok}",
            discovery.propagation.artifact_version, model.propagation.artifact_version
        ),
    )
}

pub fn build(model: &CanonicalModel) -> ConfidenceArtifact {
    build_with_overrides(model, &[])
}

/// Operators can force a gate's outcome, for instance to mark the drift
/// check as failed while an upstream incident is open. Overrides apply on
/// top of the computed gates, before the readiness summary.
pub fn build_with_overrides(
    model: &CanonicalModel,
    overrides: &[(&str, bool)],
) -> ConfidenceArtifact {
    let mut gates = vec![
        event_schema_compliance(model),
        policy_enforcement_metadata(model),
        failure_remediation_coverage(model),
        drift_check_status(model),
    ];

    for (id, passed) in overrides {
        if let Some(gate) = gates.iter_mut().find(|gate| gate.id == *id) {
            gate.status = if *passed { "pass" } else { "fail" };
            gate.evidence = format!("operator override: forced {}", gate.status);
        }
    }

    let required: Vec<&Gate> = gates.iter().filter(|gate| gate.required).collect();
    let required_gates = required.len();
    let passed_gates = required.iter().filter(|gate| gate.status == "pass").count();
    let ratio = if required_gates == 0 {
        0.0
    } else {
        passed_gates as f64 / required_gates as f64
    };
    let all_passed = required_gates > 0 && passed_gates == required_gates;

    ConfidenceArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "integration_confidence".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.integration.contract_version.clone(),
        evaluated_contracts: vec![
            EVENTS_CONTRACT_PATH,
            POLICY_PATH,
            FAILURE_MODES_PATH,
            PROVENANCE_PATH,
            PROPAGATION_PATH,
        ],
        gates,
        readiness: Readiness {
            status: if all_passed { "pass" } else { "fail" },
            required_gates,
            passed_gates,
            evaluated_required_gate_pass_ratio: (ratio * 100.0).round() / 100.0,
            release_decision: if all_passed {
                "production-ready"
            } else {
                "not-ready"
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_model_passes_every_gate() {
        let artifact = build(&CanonicalModel::built_in());
        assert_eq!(artifact.readiness.required_gates, 4);
        assert_eq!(artifact.readiness.passed_gates, 4);
        assert_eq!(artifact.readiness.evaluated_required_gate_pass_ratio, 1.0);
        assert_eq!(artifact.readiness.status, "pass");
        assert_eq!(artifact.readiness.release_decision, "production-ready");
        assert!(artifact.evaluated_contracts.contains(&PROPAGATION_PATH));
    }

    #[test]
    fn gates_carry_label_criterion_and_required_flag() {
        let artifact = build(&CanonicalModel::built_in());
        for gate in &artifact.gates {
            assert!(gate.required);
            assert!(!gate.label.is_empty());
            assert!(!gate.criterion.is_empty());
            assert!(!gate.evidence.is_empty());
        }
    }

    #[test]
    fn one_failed_gate_flips_status_and_recomputes_ratio() {
        let mut model = CanonicalModel::built_in();
        model
            .events
            .envelope
            .required_fields
            .retain(|field| field.name != "signature");

        let artifact = build(&model);
        assert_eq!(artifact.readiness.status, "fail");
        assert_eq!(artifact.readiness.passed_gates, 3);
        assert_eq!(artifact.readiness.evaluated_required_gate_pass_ratio, 0.75);
        assert_eq!(artifact.readiness.release_decision, "not-ready");

        let failed = artifact
            .gates
            .iter()
            .find(|gate| gate.status == "fail")
            .unwrap();
        assert_eq!(failed.id, "event-schema-compliance");
    }

    #[test]
    fn empty_transcripts_fail_the_event_gate() {
        let mut model = CanonicalModel::built_in();
        model.events.transcript_examples.clear();

        let artifact = build(&model);
        let event_gate = artifact
            .gates
            .iter()
            .find(|gate| gate.id == "event-schema-compliance")
            .unwrap();
        assert_eq!(event_gate.status, "fail");
        assert_eq!(artifact.readiness.status, "fail");
    }

    #[test]
    fn empty_gating_matrix_fails_the_policy_gate() {
        let mut model = CanonicalModel::built_in();
        model.trust.current.action_gating_matrix.clear();

        let artifact = build(&model);
        let policy_gate = artifact
            .gates
            .iter()
            .find(|gate| gate.id == "policy-enforcement-metadata")
            .unwrap();
        assert_eq!(policy_gate.status, "fail");
    }

    #[test]
    fn missing_remediation_fails_the_coverage_gate() {
        let mut model = CanonicalModel::built_in();
        model.failure_modes.matrix[0].recommended_action.clear();

        let artifact = build(&model);
        let coverage = artifact
            .gates
            .iter()
            .find(|gate| gate.id == "failure-remediation-coverage")
            .unwrap();
        assert_eq!(coverage.status, "fail");
    }

    #[test]
    fn operator_override_forces_a_gate_down() {
        let model = CanonicalModel::built_in();
        let artifact = build_with_overrides(&model, &[("drift-check-status", false)]);

        assert_eq!(artifact.readiness.status, "fail");
        assert_eq!(artifact.readiness.passed_gates, 3);
        assert_eq!(artifact.readiness.evaluated_required_gate_pass_ratio, 0.75);
        assert_eq!(artifact.readiness.release_decision, "not-ready");

        let forced = artifact
            .gates
            .iter()
            .find(|gate| gate.id == "drift-check-status")
            .unwrap();
        assert!(forced.evidence.starts_with("operator override"));
    }
}
