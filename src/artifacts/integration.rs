use serde::Serialize;

use crate::model::{CanonicalModel, IntegrationCurrent, PlannedItem};

use super::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub current: IntegrationCurrent,
    pub planned: Vec<PlannedItem>,
}

pub fn build(model: &CanonicalModel) -> IntegrationArtifact {
    IntegrationArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "integration".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.integration.contract_version.clone(),
        current: model.integration.current.clone(),
        planned: model.integration.planned.clone(),
    }
}
