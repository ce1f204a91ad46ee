use serde::Serialize;

use crate::model::{CanonicalModel, FirstUseCurrent, PlannedItem};

use super::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize)]
pub struct FirstUseArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub daemon_base_url: String,
    pub current: FirstUseCurrent,
    pub planned: Vec<PlannedItem>,
}

pub fn build(model: &CanonicalModel) -> FirstUseArtifact {
    FirstUseArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "first_use".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.first_use.contract_version.clone(),
        daemon_base_url: model.first_use.daemon_base_url.clone(),
        current: model.first_use.current.clone(),
        planned: model.first_use.planned.clone(),
    }
}
