//! Machine-enforceable policy rules, derived row by row from the trust
//! artifact's action gating matrix. The two artifacts can never disagree
//! because neither holds its own copy of the rules.

use serde::Serialize;
use serde_json::{json, Value};

use crate::model::CanonicalModel;

use super::{SCHEMA_VERSION, TRUST_PATH};

pub const POLICY_ID: &str = "x0xmd-trust-enforcement-v1";

#[derive(Debug, Clone, Serialize)]
pub struct PolicyRule {
    pub rule_id: String,
    pub action_class: String,
    pub allow_when_trust_level_in: Vec<String>,
    pub deny_when_trust_level_in: Vec<String>,
    pub required_signatures: bool,
    pub decision_default: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DerivedFrom {
    pub endpoint: &'static str,
    pub section: &'static str,
}

/// What an evaluator feeds a rule and what it gets back.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationContract {
    pub input_schema: Value,
    pub output_schema: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyExample {
    pub id: String,
    pub input: Value,
    pub expected_output: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub policy_id: String,
    pub derived_from: DerivedFrom,
    pub evaluation: EvaluationContract,
    pub evaluation_order: String,
    pub default_decision: String,
    pub rules: Vec<PolicyRule>,
    pub evaluation_examples: Vec<PolicyExample>,
}

/// One allow and one deny example per rule, taken from the first level on
/// each side, so evaluators have concrete fixtures for every action class.
fn evaluation_examples(rules: &[PolicyRule]) -> Vec<PolicyExample> {
    let mut examples = Vec::new();
    for rule in rules {
        if let Some(level) = rule.allow_when_trust_level_in.first() {
            examples.push(PolicyExample {
                id: format!("{}-{}-allow", rule.action_class, level),
                input: json!({
                    "action_class": rule.action_class,
                    "trust_level": level,
                    "signature_valid": true,
                }),
                expected_output: json!({
                    "decision": "allow",
                    "matched_rule": rule.rule_id,
                }),
            });
        }
        if let Some(level) = rule.deny_when_trust_level_in.first() {
            examples.push(PolicyExample {
                id: format!("{}-{}-deny", rule.action_class, level),
                input: json!({
                    "action_class": rule.action_class,
                    "trust_level": level,
                    "signature_valid": true,
                }),
                expected_output: json!({
                    "decision": "deny",
                    "matched_rule": rule.rule_id,
                }),
            });
        }
    }
    examples
}

pub fn build(model: &CanonicalModel) -> PolicyArtifact {
    let rules = model
        .trust
        .current
        .action_gating_matrix
        .iter()
        .map(|gate| PolicyRule {
            rule_id: format!("gate-{}", gate.action_class),
            action_class: gate.action_class.clone(),
            allow_when_trust_level_in: gate.allowed_levels.clone(),
            deny_when_trust_level_in: gate.blocked_levels.clone(),
            required_signatures: gate.required_signatures,
            decision_default: gate.decision_default.clone(),
        })
        .collect::<Vec<PolicyRule>>();
    let examples = evaluation_examples(&rules);

    PolicyArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "policy".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.trust.contract_version.clone(),
        policy_id: POLICY_ID.to_string(),
        derived_from: DerivedFrom {
            endpoint: TRUST_PATH,
            section: "current.action_gating_matrix",
        },
        evaluation: EvaluationContract {
            input_schema: json!({
                "type": "object",
                "required": ["action_class", "trust_level", "signature_valid"],
                "properties": {
                    "action_class": { "type": "string" },
                    "trust_level": { "type": "string" },
                    "signature_valid": { "type": "boolean" },
                },
            }),
            output_schema: json!({
                "type": "object",
                "required": ["decision", "matched_rule"],
                "properties": {
                    "decision": { "enum": ["allow", "deny", "needs-human"] },
                    "matched_rule": { "type": "string" },
                },
            }),
        },
        evaluation_order: "first-match".to_string(),
        default_decision: "deny".to_string(),
        rules,
        evaluation_examples: examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_rule_per_gating_row() {
        let model = CanonicalModel::built_in();
        let artifact = build(&model);
        assert_eq!(
            artifact.rules.len(),
            model.trust.current.action_gating_matrix.len()
        );
        assert_eq!(artifact.policy_id, POLICY_ID);
        assert_eq!(artifact.default_decision, "deny");
    }

    #[test]
    fn rules_mirror_the_gating_matrix_exactly() {
        let model = CanonicalModel::built_in();
        let artifact = build(&model);
        for (rule, gate) in artifact
            .rules
            .iter()
            .zip(&model.trust.current.action_gating_matrix)
        {
            assert_eq!(rule.action_class, gate.action_class);
            assert_eq!(rule.allow_when_trust_level_in, gate.allowed_levels);
            assert_eq!(rule.deny_when_trust_level_in, gate.blocked_levels);
            assert_eq!(rule.required_signatures, gate.required_signatures);
        }
    }

    #[test]
    fn examples_cover_both_sides_of_every_rule() {
        let model = CanonicalModel::built_in();
        let artifact = build(&model);
        assert!(artifact.evaluation_examples.len() >= 4);
        assert_eq!(
            artifact.evaluation_examples.len(),
            artifact.rules.len() * 2
        );
        for example in &artifact.evaluation_examples {
            let decision = example.expected_output["decision"].as_str().unwrap();
            assert!(decision == "allow" || decision == "deny");
            let matched = example.expected_output["matched_rule"].as_str().unwrap();
            assert!(artifact.rules.iter().any(|r| r.rule_id == matched));
        }
    }

    #[test]
    fn evaluation_contract_names_the_decision_space() {
        let model = CanonicalModel::built_in();
        let artifact = build(&model);
        let decisions = artifact.evaluation.output_schema["properties"]["decision"]["enum"]
            .as_array()
            .unwrap();
        assert!(decisions.contains(&json!("needs-human")));
        assert_eq!(artifact.evaluation_order, "first-match");
    }
}
