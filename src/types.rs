//! Shared error type for x0xmd.

use thiserror::Error;

/// Errors surfaced by model validation, artifact building, and the server.
#[derive(Debug, Error)]
pub enum X0xmdError {
    /// A capability id appears in both the current and planned lifecycle sets.
    #[error("Capability lifecycle conflict for id: {0}")]
    LifecycleConflict(String),

    /// A capability carries no evidence citations.
    #[error("Capability missing evidence for id: {0}")]
    MissingEvidence(String),

    /// A capability cites an evidence id that does not exist in the model.
    #[error("Capability references unknown evidence id: {0}")]
    UnknownEvidence(String),

    /// A verification matrix row references a pathway or probe id that
    /// does not exist in the install contract.
    #[error("Verification matrix references unknown {kind} id: {id}")]
    UnknownVerificationRef { kind: &'static str, id: String },

    /// A propagation packet list exceeded its compactness limit. The packet
    /// refuses to build rather than silently truncating.
    #[error("Propagation compactness limit exceeded for {list}: {actual} > {limit}")]
    CompactnessExceeded {
        list: &'static str,
        actual: usize,
        limit: usize,
    },

    /// Upstream refresh lock is missing baseline refs; automation must not
    /// proceed without an operator-acknowledged baseline.
    #[error("Upstream refresh lock is missing baseline refs: {0}. Refusing to continue in fail-closed mode.")]
    MissingBaselineRefs(String),

    /// Upstream refresh lock file was not a well-formed lock object.
    #[error("Upstream refresh lock is malformed: {0}")]
    MalformedRefreshLock(String),

    /// Two artifacts disagree about shared metadata. Caught by the
    /// pre-deploy drift check, never served.
    #[error("Propagation drift: {0}")]
    Drift(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, X0xmdError>;
