use thiserror::Error;

/// Governance operation result type
pub type Result<T> = std::result::Result<T, GovernanceError>;

/// Governance errors
///
/// Every variant carries enough structured detail for the caller to build
/// an actionable message; the engine never formats user-facing prose.
/// None of these are retried internally. `OracleUnavailable` is the only
/// variant a caller may reasonably retry after backoff.
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{operation} illegal in status {current}, requires {required}")]
    IllegalState {
        operation: String,
        current: String,
        required: String,
    },

    #[error("duplicate vote on {proposal_id} from voter {voter}")]
    DuplicateVote { proposal_id: String, voter: String },

    #[error("duplicate proposal id: {0}")]
    DuplicateId(String),

    #[error("voting power oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GovernanceError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn illegal_state(
        operation: impl Into<String>,
        current: impl Into<String>,
        required: impl Into<String>,
    ) -> Self {
        Self::IllegalState {
            operation: operation.into(),
            current: current.into(),
            required: required.into(),
        }
    }
}
