use serde::Serialize;

use crate::config::ArtifactSources;
use crate::model::{CanonicalModel, Daemon, InstallCurrent, PlannedItem};

use super::SCHEMA_VERSION;

/// Where the installer and its verification material come from. Signature
/// checking is the recipient's job; the contract only promises the URLs.
#[derive(Debug, Clone, Serialize)]
pub struct SignedArtifacts {
    pub installer_url: String,
    pub skill_url: String,
    pub skill_signature_url: String,
    pub gpg_key_url: String,
    pub non_interactive_mode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub daemon: Daemon,
    pub signed_artifacts: SignedArtifacts,
    pub current: InstallCurrent,
    pub planned: Vec<PlannedItem>,
}

pub fn build(model: &CanonicalModel, sources: &ArtifactSources) -> InstallArtifact {
    InstallArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "install".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.install.contract_version.clone(),
        daemon: model.install.daemon.clone(),
        signed_artifacts: SignedArtifacts {
            installer_url: sources.installer_url.clone(),
            skill_url: sources.skill_url.clone(),
            skill_signature_url: sources.skill_signature_url.clone(),
            gpg_key_url: sources.gpg_key_url.clone(),
            non_interactive_mode: "warn_and_continue_if_gpg_missing",
        },
        current: model.install.current.clone(),
        planned: model.install.planned.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CONTRACT_VERSION;
    use clap::Parser;

    fn sources() -> ArtifactSources {
        crate::config::Args::parse_from(["x0xmd"]).artifact_sources()
    }

    #[test]
    fn install_artifact_covers_three_platforms() {
        let model = CanonicalModel::built_in();
        let artifact = build(&model, &sources());

        let platforms: Vec<&str> = artifact
            .current
            .verification_matrix
            .iter()
            .map(|row| row.platform.as_str())
            .collect();
        assert!(platforms.contains(&"linux"));
        assert!(platforms.contains(&"macos"));
        assert!(platforms.contains(&"windows"));
        assert_eq!(artifact.contract_version, CONTRACT_VERSION);
        assert_eq!(artifact.daemon.binary, "x0xd");
    }

    #[test]
    fn all_pathways_are_non_interactive() {
        let artifact = build(&CanonicalModel::built_in(), &sources());
        assert!(artifact
            .current
            .pathways
            .iter()
            .all(|pathway| pathway.non_interactive));
    }

    #[test]
    fn signed_artifact_urls_come_from_configuration() {
        let artifact = build(&CanonicalModel::built_in(), &sources());
        assert!(artifact.signed_artifacts.installer_url.starts_with("https://"));
        assert!(artifact.signed_artifacts.skill_signature_url.ends_with(".sig"));
    }
}
