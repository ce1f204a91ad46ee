//! Discovery surface: the root discovery document plus the capability and
//! fit listings it links to.

use serde::Serialize;

use crate::model::{
    CanonicalModel, Capability, FitCriterion, Identity, SourceEvidence, CONTRACT_VERSION,
};

use super::{
    EndpointEntry, CAPABILITIES_CURRENT_PATH, CAPABILITIES_PLANNED_PATH, MACHINE_ENDPOINTS,
    PROPAGATION_PATH, SCHEMA_VERSION,
};

#[derive(Debug, Clone, Serialize)]
pub struct CapabilitiesSummary {
    pub current_endpoint: &'static str,
    pub planned_endpoint: &'static str,
    pub current_ids: Vec<String>,
}

/// Pointer from discovery into the propagation packet. The drift check
/// compares these fields against the packet itself.
#[derive(Debug, Clone, Serialize)]
pub struct PropagationPointer {
    pub endpoint: &'static str,
    pub packet_schema_version: String,
    pub artifact_version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub identity: Identity,
    pub capabilities: CapabilitiesSummary,
    pub endpoints: Vec<EndpointEntry>,
    pub propagation: PropagationPointer,
    pub source_evidence: Vec<SourceEvidence>,
}

pub fn build(model: &CanonicalModel) -> DiscoveryArtifact {
    DiscoveryArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "discovery".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: CONTRACT_VERSION.to_string(),
        identity: model.identity.clone(),
        capabilities: CapabilitiesSummary {
            current_endpoint: CAPABILITIES_CURRENT_PATH,
            planned_endpoint: CAPABILITIES_PLANNED_PATH,
            current_ids: model
                .capabilities_current
                .iter()
                .map(|capability| capability.id.clone())
                .collect(),
        },
        endpoints: MACHINE_ENDPOINTS.to_vec(),
        propagation: PropagationPointer {
            endpoint: PROPAGATION_PATH,
            packet_schema_version: SCHEMA_VERSION.to_string(),
            artifact_version: model.propagation.artifact_version.clone(),
        },
        source_evidence: model.source_evidence.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilitiesArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub lifecycle: String,
    pub capabilities: Vec<Capability>,
    pub source_evidence: Vec<SourceEvidence>,
}

pub fn build_capabilities_current(model: &CanonicalModel) -> CapabilitiesArtifact {
    capabilities_artifact(model, "current", &model.capabilities_current)
}

pub fn build_capabilities_planned(model: &CanonicalModel) -> CapabilitiesArtifact {
    capabilities_artifact(model, "planned", &model.capabilities_planned)
}

fn capabilities_artifact(
    model: &CanonicalModel,
    lifecycle: &str,
    capabilities: &[Capability],
) -> CapabilitiesArtifact {
    CapabilitiesArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: format!("capabilities_{lifecycle}"),
        generated_at: model.generated_at.clone(),
        contract_version: CONTRACT_VERSION.to_string(),
        lifecycle: lifecycle.to_string(),
        capabilities: capabilities.to_vec(),
        source_evidence: model.source_evidence.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FitArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub criteria: Vec<FitCriterion>,
    pub evaluation_hint: String,
}

pub fn build_fit(model: &CanonicalModel) -> FitArtifact {
    FitArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "fit".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: CONTRACT_VERSION.to_string(),
        criteria: model.fit_criteria.clone(),
        evaluation_hint: "Adopt when every criterion holds; any single miss is a reason to stop."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_links_every_registry_endpoint() {
        let model = CanonicalModel::built_in();
        let artifact = build(&model);
        assert_eq!(artifact.endpoints.len(), MACHINE_ENDPOINTS.len());
        assert_eq!(artifact.schema_version, SCHEMA_VERSION);
        assert_eq!(artifact.propagation.endpoint, PROPAGATION_PATH);
        assert_eq!(
            artifact.propagation.artifact_version,
            model.propagation.artifact_version
        );
    }

    #[test]
    fn capability_listings_are_lifecycle_scoped() {
        let model = CanonicalModel::built_in();
        let current = build_capabilities_current(&model);
        let planned = build_capabilities_planned(&model);

        assert_eq!(current.lifecycle, "current");
        assert_eq!(planned.lifecycle, "planned");
        for capability in &current.capabilities {
            assert!(!planned
                .capabilities
                .iter()
                .any(|other| other.id == capability.id));
        }
    }

    #[test]
    fn fit_artifact_carries_all_criteria() {
        let model = CanonicalModel::built_in();
        let artifact = build_fit(&model);
        assert_eq!(artifact.criteria.len(), model.fit_criteria.len());
    }
}
