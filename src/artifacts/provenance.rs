//! Provenance attestation: content digests over the artifacts agents are
//! most likely to act on, plus a pointer to the out-of-band verification
//! procedure. Signature material is deliberately not embedded.

use serde::Serialize;

use crate::model::CanonicalModel;
use crate::types::Result;

use super::{
    discovery, policy, sha256_hex, stable_stringify, trust, DISCOVERY_PATH, POLICY_PATH,
    SCHEMA_VERSION, TRUST_PATH,
};

pub const DIGEST_ALGORITHM: &str = "sha256";

#[derive(Debug, Clone, Serialize)]
pub struct Signer {
    pub id: String,
    pub verification: &'static str,
    pub signature_material: &'static str,
    pub procedure_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactDigest {
    pub artifact: &'static str,
    pub endpoint: &'static str,
    pub digest_algorithm: &'static str,
    pub digest: String,
    pub source_references: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvenanceArtifact {
    pub schema_version: String,
    pub artifact: String,
    pub generated_at: String,
    pub contract_version: String,
    pub signer: Signer,
    pub artifacts: Vec<ArtifactDigest>,
}

/// Digest of an artifact's canonical (key-sorted, compact) JSON encoding.
/// Field order in the builders can change freely without moving the digest.
fn digest_of<T: Serialize>(artifact: &T) -> Result<String> {
    let value = serde_json::to_value(artifact)?;
    Ok(sha256_hex(&stable_stringify(&value)))
}

pub fn build(model: &CanonicalModel) -> Result<ProvenanceArtifact> {
    let artifacts = vec![
        ArtifactDigest {
            artifact: "discovery",
            endpoint: DISCOVERY_PATH,
            digest_algorithm: DIGEST_ALGORITHM,
            digest: digest_of(&discovery::build(model))?,
            source_references: vec!["plan-01-01", "plan-01-02"],
        },
        ArtifactDigest {
            artifact: "trust",
            endpoint: TRUST_PATH,
            digest_algorithm: DIGEST_ALGORITHM,
            digest: digest_of(&trust::build(model))?,
            source_references: vec!["plan-01-02", "plan-02-01"],
        },
        ArtifactDigest {
            artifact: "policy",
            endpoint: POLICY_PATH,
            digest_algorithm: DIGEST_ALGORITHM,
            digest: digest_of(&policy::build(model))?,
            source_references: vec!["plan-02-01"],
        },
    ];

    Ok(ProvenanceArtifact {
        schema_version: SCHEMA_VERSION.to_string(),
        artifact: "provenance".to_string(),
        generated_at: model.generated_at.clone(),
        contract_version: model.trust.contract_version.clone(),
        signer: Signer {
            id: model.identity.id.clone(),
            verification: "verification-procedure-pointer",
            signature_material: "not_embedded",
            procedure_url: format!("{}/docs/verify-provenance", model.trust.current.disclosure.docs_url),
        },
        artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_are_hex_sha256() {
        let artifact = build(&CanonicalModel::built_in()).unwrap();
        assert_eq!(artifact.artifacts.len(), 3);
        for entry in &artifact.artifacts {
            assert_eq!(entry.digest.len(), 64);
            assert!(entry.digest.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(!entry.source_references.is_empty());
        }
    }

    #[test]
    fn digests_are_deterministic_across_builds() {
        let model = CanonicalModel::built_in();
        let first = build(&model).unwrap();
        let second = build(&model).unwrap();
        for (a, b) in first.artifacts.iter().zip(&second.artifacts) {
            assert_eq!(a.digest, b.digest);
        }
    }

    #[test]
    fn trust_digest_moves_when_trust_content_moves() {
        let model = CanonicalModel::built_in();
        let baseline = build(&model).unwrap();

        let mut changed = model.clone();
        changed.trust.current.policy_guidance.push("extra".to_string());
        let after = build(&changed).unwrap();

        assert_ne!(baseline.artifacts[1].digest, after.artifacts[1].digest);
        assert_eq!(baseline.artifacts[0].digest, after.artifacts[0].digest);
    }

    #[test]
    fn signature_material_stays_out_of_band() {
        let artifact = build(&CanonicalModel::built_in()).unwrap();
        assert_eq!(artifact.signer.signature_material, "not_embedded");
        assert_eq!(artifact.signer.verification, "verification-procedure-pointer");
    }
}
