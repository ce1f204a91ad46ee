use serde::Serialize;

use crate::model::{CanonicalModel, PlannedItem, TrustCurrent};

use super::{PROVENANCE_PATH, SCHEMA_VERSION};

/// Pointer to the provenance artifact that attests this document.
#[derive(Debug, Clone, Serialize)]
pub struct ProvenancePointer {
    pub path: &'static str,
    pub schema_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrustArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub current: TrustCurrent,
    pub planned: Vec<PlannedItem>,
    pub provenance: ProvenancePointer,
}

pub fn build(model: &CanonicalModel) -> TrustArtifact {
    TrustArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "trust".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.trust.contract_version.clone(),
        current: model.trust.current.clone(),
        planned: model.trust.planned.clone(),
        provenance: ProvenancePointer {
            path: PROVENANCE_PATH,
            schema_version: SCHEMA_VERSION.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_levels_cover_the_full_taxonomy() {
        let artifact = build(&CanonicalModel::built_in());
        let ids: Vec<&str> = artifact
            .current
            .trust_levels
            .iter()
            .map(|level| level.id.as_str())
            .collect();
        assert_eq!(ids, vec!["unknown", "known", "trusted", "blocked"]);
        for level in &artifact.current.trust_levels {
            assert!(!level.semantics.is_empty());
            assert!(!level.operational_outcome.is_empty());
        }
    }

    #[test]
    fn transitions_reference_known_levels_only() {
        let artifact = build(&CanonicalModel::built_in());
        let ids: Vec<&str> = artifact
            .current
            .trust_levels
            .iter()
            .map(|level| level.id.as_str())
            .collect();

        assert!(artifact.current.default_transitions.len() >= 5);
        for transition in &artifact.current.default_transitions {
            assert!(ids.contains(&transition.from.as_str()));
            assert!(ids.contains(&transition.to.as_str()));
        }
    }

    #[test]
    fn gating_matrix_blocks_unknown_publishers() {
        let artifact = build(&CanonicalModel::built_in());
        let publish = artifact
            .current
            .action_gating_matrix
            .iter()
            .find(|gate| gate.action_class == "publish")
            .unwrap();

        assert!(publish.blocked_levels.contains(&"unknown".to_string()));
        assert!(publish.blocked_levels.contains(&"blocked".to_string()));
        assert!(publish.allowed_levels.contains(&"known".to_string()));
        assert!(publish.required_signatures);
    }

    #[test]
    fn carries_disclosure_and_provenance_pointer() {
        let artifact = build(&CanonicalModel::built_in());
        assert_eq!(
            artifact.current.disclosure.security_email,
            "security@saorsalabs.com"
        );
        assert_eq!(artifact.provenance.path, PROVENANCE_PATH);
        assert_eq!(
            artifact.current.controls["message_signatures"]["status"],
            "current"
        );
    }
}
