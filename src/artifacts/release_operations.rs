//! Release operations contract: how this site is deployed and what evidence
//! a release run must leave behind for agents auditing a deployment.

use serde::Serialize;

use crate::model::{CanonicalModel, CONTRACT_VERSION};

use super::{DISCOVERY_PATH, HEALTH_PATH, SCHEMA_VERSION};

#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
    pub provider: &'static str,
    pub workflow_file: &'static str,
    pub trigger: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvidenceKey {
    pub key: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDeployCheck {
    pub endpoint: &'static str,
    pub expectation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseOperationsArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub phase: &'static str,
    pub plan: &'static str,
    pub workflow: Workflow,
    pub required_evidence: Vec<EvidenceKey>,
    /// Statuses a release run may end in after the post-deploy checks.
    pub decision_statuses: Vec<&'static str>,
    pub post_deploy_checks: Vec<PostDeployCheck>,
}

pub fn build(model: &CanonicalModel) -> ReleaseOperationsArtifact {
    ReleaseOperationsArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "release_operations".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: CONTRACT_VERSION.to_string(),
        phase: "03-propagation-and-operations",
        plan: "03-01",
        workflow: Workflow {
            provider: "github-actions",
            workflow_file: ".github/workflows/deploy.yml",
            trigger: "push to main",
        },
        required_evidence: vec![
            EvidenceKey {
                key: "deploy.run_url",
                description: "URL of the workflow run that produced the live deployment.",
            },
            EvidenceKey {
                key: "deploy.commit_sha",
                description: "Commit the deployment was built from.",
            },
            EvidenceKey {
                key: "evaluation.report_path",
                description: "Path to the post-deploy evaluation report artifact.",
            },
            EvidenceKey {
                key: "evaluation.pass",
                description: "Whether every post-deploy check passed.",
            },
        ],
        decision_statuses: vec!["proceed", "hold", "rollback"],
        post_deploy_checks: vec![
            PostDeployCheck {
                endpoint: HEALTH_PATH,
                expectation: "HTTP 200 with status ok",
            },
            PostDeployCheck {
                endpoint: DISCOVERY_PATH,
                expectation: "HTTP 200 and the propagation pointer matches the packet",
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_evidence_names_run_and_report() {
        let artifact = build(&CanonicalModel::built_in());
        let keys: Vec<&str> = artifact
            .required_evidence
            .iter()
            .map(|evidence| evidence.key)
            .collect();
        assert!(keys.contains(&"deploy.run_url"));
        assert!(keys.contains(&"evaluation.report_path"));
        assert!(artifact.decision_statuses.contains(&"rollback"));
        assert_eq!(artifact.phase, "03-propagation-and-operations");
        assert_eq!(artifact.plan, "03-01");
    }
}
