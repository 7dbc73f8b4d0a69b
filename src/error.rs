use thiserror::Error;

/// Why a single Graph API fetch produced no records.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GraphError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        GraphError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}
