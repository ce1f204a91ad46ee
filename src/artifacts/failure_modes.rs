use serde::Serialize;

use crate::model::{CanonicalModel, FailureMode, PlannedItem};

use super::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize)]
pub struct FailureModesArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub matrix: Vec<FailureMode>,
    pub planned: Vec<PlannedItem>,
}

pub fn build(model: &CanonicalModel) -> FailureModesArtifact {
    FailureModesArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "failure_modes".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.failure_modes.contract_version.clone(),
        matrix: model.failure_modes.matrix.clone(),
        planned: model.failure_modes.planned.clone(),
    }
}
